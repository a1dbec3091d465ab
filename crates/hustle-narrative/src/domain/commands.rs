//! Commands for the hustle game.

use hustle_core::command::Command;
use hustle_core::error::DomainError;
use uuid::Uuid;

/// Reply that wipes the player's record and returns to the menu.
pub const RESET_KEYWORD: &str = "RESTART";

/// Command to play one turn from an inbound text message.
#[derive(Debug, Clone)]
pub struct PlayTurn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Sender identifier as received; replies go here.
    pub sender: String,
    /// Reply text, trimmed and upper-cased.
    pub text: String,
}

impl PlayTurn {
    /// Builds a turn from the raw inbound fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the sender or the text is missing
    /// or blank.
    pub fn new(
        correlation_id: Uuid,
        from: Option<&str>,
        text: Option<&str>,
    ) -> Result<Self, DomainError> {
        let sender = from.map(str::trim).filter(|value| !value.is_empty());
        let text = text.map(str::trim).filter(|value| !value.is_empty());

        match (sender, text) {
            (Some(sender), Some(text)) => Ok(Self {
                correlation_id,
                sender: sender.to_owned(),
                text: text.to_uppercase(),
            }),
            _ => Err(DomainError::Validation(
                "missing 'from' or 'text' in inbound message".to_owned(),
            )),
        }
    }

    /// Storage key: the sender with every `+` removed.
    #[must_use]
    pub fn phone_number(&self) -> String {
        self.sender.replace('+', "")
    }

    /// Whether the text is the reset keyword.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.text == RESET_KEYWORD
    }
}

impl Command for PlayTurn {
    fn command_type(&self) -> &'static str {
        "hustle.play_turn"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
