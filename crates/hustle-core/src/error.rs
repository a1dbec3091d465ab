//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No progress record exists for the player.
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    /// Optimistic concurrency conflict on a progress save.
    #[error("concurrency conflict on player {phone_number}: version {expected} is stale")]
    ConcurrencyConflict {
        /// The storage key of the player.
        phone_number: String,
        /// The version the writer loaded.
        expected: i64,
    },

    /// A validation error in domain logic or inbound input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (store or messaging provider).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
