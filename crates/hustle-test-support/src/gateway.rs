//! Test gateways — mock `MessagingGateway` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use hustle_core::error::DomainError;
use hustle_core::messaging::{MessagingGateway, OutboundMessage};

/// A gateway that records every message and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl RecordingGateway {
    /// Create a gateway with no recorded messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all messages sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the text of the most recent message.
    ///
    /// # Panics
    ///
    /// Panics if nothing was sent or the internal mutex is poisoned.
    pub fn last_text(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .expect("no message was sent")
            .text
            .clone()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// A gateway that rejects every message, as a provider outage would.
#[derive(Debug)]
pub struct FailingGateway;

#[async_trait]
impl MessagingGateway for FailingGateway {
    async fn send(&self, _message: &OutboundMessage) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("sms provider unavailable".into()))
    }
}
