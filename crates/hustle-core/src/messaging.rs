//! Outbound messaging gateway abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// A text message addressed to a player's device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient identifier exactly as the inbound message carried it.
    pub recipient: String,
    /// Message body.
    pub text: String,
}

/// Capability to deliver a text message. Delivery is not retried by callers.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send one message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), DomainError>;
}
