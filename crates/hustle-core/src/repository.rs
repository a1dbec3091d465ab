//! Player progress repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Stored representation of one player's progress.
///
/// Optional string columns use `None` for "no game" and "no current node".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    /// Sender identifier with `+` removed; the natural key.
    pub phone_number: String,
    /// Selected game identifier.
    pub game: Option<String>,
    /// `alive` or `dead`.
    pub status: String,
    /// Current net worth in KES.
    pub net_worth: i64,
    /// Days survived (persisted, not used by game logic).
    pub days_survived: i64,
    /// Current narrative node key.
    pub current_q: Option<String>,
    /// Number of successful saves of this record.
    pub version: i64,
    /// Timestamp of the last save.
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for loading and saving player progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the progress record for a player, if one exists.
    async fn load(&self, phone_number: &str) -> Result<Option<ProgressRecord>, DomainError>;

    /// Save a progress record with optimistic concurrency.
    /// `expected_version` is the version the caller loaded (0 for a new record);
    /// the stored version becomes `expected_version + 1`.
    async fn save(
        &self,
        record: &ProgressRecord,
        expected_version: i64,
    ) -> Result<(), DomainError>;
}
