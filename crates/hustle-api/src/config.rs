//! Environment configuration.

use std::fmt;
use std::net::SocketAddr;

use crate::error::AppError;

/// Default Africa's Talking bulk SMS endpoint.
pub const DEFAULT_SMS_ENDPOINT: &str = "https://api.africastalking.com/version1/messaging";

/// Credentials and endpoint for the SMS provider.
#[derive(Clone)]
pub struct SmsSettings {
    /// Provider account username.
    pub username: String,
    /// Provider API key.
    pub api_key: String,
    /// Registered sender ID or short code, if any.
    pub sender_id: Option<String>,
    /// Messaging endpoint URL.
    pub endpoint: String,
}

impl fmt::Debug for SmsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsSettings")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("sender_id", &self.sender_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Server configuration read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// SMS provider settings; `None` when credentials are not set.
    pub sms: Option<SmsSettings>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or `PORT` is
    /// not a valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        let sms = match (
            lookup("AFRICASTALKING_USERNAME"),
            lookup("AFRICASTALKING_API_KEY"),
        ) {
            (Some(username), Some(api_key)) => Some(SmsSettings {
                username,
                api_key,
                sender_id: lookup("AFRICASTALKING_SENDER_ID"),
                endpoint: lookup("AFRICASTALKING_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_SMS_ENDPOINT.to_owned()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            sms,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        // Act
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/hustle")]))
                .unwrap();

        // Assert
        assert_eq!(config.database_url, "postgres://db/hustle");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.sms.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "8080")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/hustle"),
            ("PORT", "ninety"),
        ]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_sms_settings_require_username_and_key() {
        // Arrange
        let partial = lookup_from(&[
            ("DATABASE_URL", "postgres://db/hustle"),
            ("AFRICASTALKING_USERNAME", "sandbox"),
        ]);
        let complete = lookup_from(&[
            ("DATABASE_URL", "postgres://db/hustle"),
            ("AFRICASTALKING_USERNAME", "sandbox"),
            ("AFRICASTALKING_API_KEY", "secret"),
            ("AFRICASTALKING_SENDER_ID", "HUSTLE"),
        ]);

        // Act
        let partial = AppConfig::from_lookup(partial).unwrap();
        let complete = AppConfig::from_lookup(complete).unwrap();

        // Assert
        assert!(partial.sms.is_none());
        let sms = complete.sms.unwrap();
        assert_eq!(sms.username, "sandbox");
        assert_eq!(sms.sender_id.as_deref(), Some("HUSTLE"));
        assert_eq!(sms.endpoint, DEFAULT_SMS_ENDPOINT);
        assert!(!format!("{sms:?}").contains("secret"));
    }
}
