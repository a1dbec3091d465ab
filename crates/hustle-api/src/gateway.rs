//! Outbound SMS delivery through Africa's Talking.

use std::time::Duration;

use async_trait::async_trait;
use hustle_core::error::DomainError;
use hustle_core::messaging::{MessagingGateway, OutboundMessage};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::config::SmsSettings;
use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body of the bulk SMS endpoint.
#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: SmsMessageData,
}

#[derive(Debug, Deserialize)]
struct SmsMessageData {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Recipients", default)]
    recipients: Vec<Recipient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recipient {
    number: String,
    status: String,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    cost: Option<String>,
}

/// Sends replies through the Africa's Talking bulk SMS API.
#[derive(Debug, Clone)]
pub struct AfricasTalkingGateway {
    client: Client,
    settings: SmsSettings,
}

impl AfricasTalkingGateway {
    /// Builds the HTTP client for the provider.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Gateway` if the HTTP client cannot be built.
    pub fn new(settings: SmsSettings) -> Result<Self, AppError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, settings })
    }
}

fn provider_error(context: &str, err: &reqwest::Error) -> DomainError {
    DomainError::Infrastructure(format!("sms provider {context}: {err}"))
}

#[async_trait]
impl MessagingGateway for AfricasTalkingGateway {
    #[instrument(skip(self, message), fields(recipient = %message.recipient))]
    async fn send(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        let mut form = vec![
            ("username", self.settings.username.as_str()),
            ("to", message.recipient.as_str()),
            ("message", message.text.as_str()),
        ];
        if let Some(sender_id) = &self.settings.sender_id {
            form.push(("from", sender_id.as_str()));
        }

        let response = self
            .client
            .post(&self.settings.endpoint)
            .header("apiKey", &self.settings.api_key)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| provider_error("request failed", &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Infrastructure(format!(
                "sms provider returned {status}: {body}"
            )));
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|e| provider_error("returned an unreadable body", &e))?;

        let data = body.sms_message_data;
        if data.recipients.is_empty() {
            return Err(DomainError::Infrastructure(format!(
                "sms provider accepted no recipients: {}",
                data.message
            )));
        }
        for recipient in &data.recipients {
            if recipient.status == "Success" {
                info!(
                    number = %recipient.number,
                    message_id = recipient.message_id.as_deref(),
                    cost = recipient.cost.as_deref(),
                    "sms accepted by provider"
                );
            } else {
                warn!(
                    number = %recipient.number,
                    status = %recipient.status,
                    "sms rejected by provider"
                );
            }
        }
        Ok(())
    }
}

/// Stands in for the provider when no credentials are configured. Every send
/// fails, which the turn logs and otherwise ignores.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredGateway;

#[async_trait]
impl MessagingGateway for UnconfiguredGateway {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        error!(
            recipient = %message.recipient,
            "sms provider credentials are not configured; cannot send reply"
        );
        Err(DomainError::Infrastructure(
            "sms gateway is not configured".to_owned(),
        ))
    }
}
