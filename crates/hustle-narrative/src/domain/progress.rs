//! Aggregate root for a player's progress.

use chrono::{DateTime, Utc};
use hustle_core::clock::Clock;
use hustle_core::error::DomainError;
use hustle_core::repository::ProgressRecord;

use super::game::GameId;

/// Whether the player's current run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStatus {
    /// The run continues.
    Alive,
    /// The run ended, by elimination or by winning.
    Dead,
}

impl LifeStatus {
    /// The stored identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
        }
    }

    fn from_storage(value: &str) -> Option<Self> {
        match value {
            "alive" => Some(Self::Alive),
            "dead" => Some(Self::Dead),
            _ => None,
        }
    }
}

/// One player's progress, keyed by phone number.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProgress {
    /// Sender identifier with `+` removed.
    pub(crate) phone_number: String,
    /// Selected game; `None` while awaiting game selection.
    pub(crate) game: Option<GameId>,
    pub(crate) status: LifeStatus,
    /// Never negative while alive once a turn has been resolved.
    pub(crate) net_worth: i64,
    pub(crate) days_survived: i64,
    /// Current node key.
    pub(crate) current_q: Option<String>,
    /// Version loaded from the store (0 if never saved).
    pub(crate) version: i64,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl PlayerProgress {
    /// Creates the record for a first contact: no game, alive, zero net worth.
    #[must_use]
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            game: None,
            status: LifeStatus::Alive,
            net_worth: 0,
            days_survived: 0,
            current_q: None,
            version: 0,
            updated_at: None,
        }
    }

    /// Discards all game state. The store version is kept so the next save
    /// still applies on top of the record that was loaded.
    pub fn restart(&mut self) {
        let version = self.version;
        let updated_at = self.updated_at;
        *self = Self::new(std::mem::take(&mut self.phone_number));
        self.version = version;
        self.updated_at = updated_at;
    }

    /// Starts a game at its intro node.
    pub fn select_game(&mut self, game: GameId, intro: &str) {
        self.game = Some(game);
        self.current_q = Some(intro.to_owned());
    }

    /// Ends the run: dead, no game, no current node.
    pub fn end_game(&mut self) {
        self.status = LifeStatus::Dead;
        self.game = None;
        self.current_q = None;
    }

    /// Whether the run continues.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == LifeStatus::Alive
    }

    /// Storage key.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Selected game.
    #[must_use]
    pub fn game(&self) -> Option<GameId> {
        self.game
    }

    /// Life status.
    #[must_use]
    pub fn status(&self) -> LifeStatus {
        self.status
    }

    /// Net worth in KES.
    #[must_use]
    pub fn net_worth(&self) -> i64 {
        self.net_worth
    }

    /// Current node key.
    #[must_use]
    pub fn current_q(&self) -> Option<&str> {
        self.current_q.as_deref()
    }

    /// Version loaded from the store.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Rebuilds progress from its stored form.
    ///
    /// Empty strings in the optional columns are read as "none".
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the stored game or status is unknown.
    pub fn from_record(record: ProgressRecord) -> Result<Self, DomainError> {
        let game = match record.game.as_deref() {
            None | Some("") => None,
            Some(value) => Some(GameId::from_storage(value).ok_or_else(|| {
                DomainError::Infrastructure(format!("unknown stored game: {value}"))
            })?),
        };
        let status = LifeStatus::from_storage(&record.status).ok_or_else(|| {
            DomainError::Infrastructure(format!("unknown stored status: {}", record.status))
        })?;

        Ok(Self {
            phone_number: record.phone_number,
            game,
            status,
            net_worth: record.net_worth,
            days_survived: record.days_survived,
            current_q: record.current_q.filter(|key| !key.is_empty()),
            version: record.version,
            updated_at: Some(record.updated_at),
        })
    }

    /// Builds the stored form for the next save, one version ahead of the
    /// version that was loaded.
    #[must_use]
    pub fn to_record(&self, clock: &dyn Clock) -> ProgressRecord {
        ProgressRecord {
            phone_number: self.phone_number.clone(),
            game: self.game.map(|game| game.as_str().to_owned()),
            status: self.status.as_str().to_owned(),
            net_worth: self.net_worth,
            days_survived: self.days_survived,
            current_q: self.current_q.clone(),
            version: self.version + 1,
            updated_at: clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hustle_test_support::FixedClock;

    fn stored(game: Option<&str>, status: &str, current_q: Option<&str>) -> ProgressRecord {
        ProgressRecord {
            phone_number: "254700000001".to_owned(),
            game: game.map(str::to_owned),
            status: status.to_owned(),
            net_worth: 7250,
            days_survived: 3,
            current_q: current_q.map(str::to_owned),
            version: 4,
            updated_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_restart_resets_game_fields_and_keeps_version() {
        // Arrange
        let record = stored(Some("hustle"), "alive", Some("hustle_q3"));
        let mut progress = PlayerProgress::from_record(record).unwrap();

        // Act
        progress.restart();

        // Assert
        assert_eq!(progress.phone_number(), "254700000001");
        assert_eq!(progress.game(), None);
        assert_eq!(progress.status(), LifeStatus::Alive);
        assert_eq!(progress.net_worth(), 0);
        assert_eq!(progress.days_survived, 0);
        assert_eq!(progress.current_q(), None);
        assert_eq!(progress.version(), 4);
    }

    #[test]
    fn test_end_game_clears_game_and_node() {
        let mut progress = PlayerProgress::new("254700000001");
        progress.select_game(GameId::Hustle, "hustle_intro");

        progress.end_game();

        assert_eq!(progress.status(), LifeStatus::Dead);
        assert_eq!(progress.game(), None);
        assert_eq!(progress.current_q(), None);
    }

    #[test]
    fn test_record_conversion_preserves_fields_and_bumps_version() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let progress =
            PlayerProgress::from_record(stored(Some("hustle"), "alive", Some("hustle_q2")))
                .unwrap();

        // Act
        let record = progress.to_record(&clock);

        // Assert
        assert_eq!(record.game.as_deref(), Some("hustle"));
        assert_eq!(record.status, "alive");
        assert_eq!(record.net_worth, 7250);
        assert_eq!(record.days_survived, 3);
        assert_eq!(record.current_q.as_deref(), Some("hustle_q2"));
        assert_eq!(record.version, 5);
        assert_eq!(record.updated_at, fixed_now);
    }

    #[test]
    fn test_from_record_reads_empty_strings_as_none() {
        let progress = PlayerProgress::from_record(stored(Some(""), "dead", Some(""))).unwrap();

        assert_eq!(progress.game(), None);
        assert_eq!(progress.current_q(), None);
        assert_eq!(progress.status(), LifeStatus::Dead);
    }

    #[test]
    fn test_from_record_rejects_unknown_status() {
        let result = PlayerProgress::from_record(stored(None, "zombie", None));

        match result {
            Err(DomainError::Infrastructure(message)) => assert!(message.contains("zombie")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
