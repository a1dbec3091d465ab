//! Command abstractions.

use uuid::Uuid;

/// Trait that all inbound commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID used to trace one turn through the logs.
    fn correlation_id(&self) -> Uuid;
}
