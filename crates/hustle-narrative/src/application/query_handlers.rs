//! Query handlers for the hustle game.
//!
//! This module contains query handlers that rebuild a player's progress from
//! the store and return read-only view DTOs.

use chrono::{DateTime, Utc};
use hustle_core::error::DomainError;
use hustle_core::repository::ProgressRepository;
use serde::Serialize;

use crate::domain::progress::PlayerProgress;

/// Read-only view of a player's progress.
#[derive(Debug, Serialize)]
pub struct PlayerProgressView {
    /// Storage key.
    pub phone_number: String,
    /// Selected game, if any.
    pub game: Option<&'static str>,
    /// `alive` or `dead`.
    pub status: &'static str,
    /// Net worth in KES.
    pub net_worth: i64,
    /// Days survived.
    pub days_survived: i64,
    /// Current node key.
    pub current_q: Option<String>,
    /// Number of saves.
    pub version: i64,
    /// Timestamp of the last save.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PlayerProgress> for PlayerProgressView {
    fn from(progress: PlayerProgress) -> Self {
        Self {
            game: progress.game.map(|game| game.as_str()),
            status: progress.status.as_str(),
            net_worth: progress.net_worth,
            days_survived: progress.days_survived,
            current_q: progress.current_q,
            version: progress.version,
            updated_at: progress.updated_at,
            phone_number: progress.phone_number,
        }
    }
}

/// Retrieves a player's progress. A leading `+` on the phone number is ignored.
///
/// # Errors
///
/// Returns `DomainError::PlayerNotFound` if no record exists.
/// Returns `DomainError::Infrastructure` if the store fails or the record is unreadable.
pub async fn get_progress_by_phone(
    phone_number: &str,
    repo: &dyn ProgressRepository,
) -> Result<PlayerProgressView, DomainError> {
    let phone_number = phone_number.replace('+', "");
    let record = repo
        .load(&phone_number)
        .await?
        .ok_or(DomainError::PlayerNotFound(phone_number))?;
    let progress = PlayerProgress::from_record(record)?;
    Ok(progress.into())
}
