//! Games offered on the top-level menu.

/// A game a player can select from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameId {
    /// Choose Your Hustle, the implemented game.
    Hustle,
    /// Pick Up or Perish, listed on the menu but not playable yet.
    PickUpOrPerish,
}

impl GameId {
    /// Interprets normalized input as a menu selection, by number or title.
    #[must_use]
    pub fn from_menu_input(input: &str) -> Option<Self> {
        match input {
            "1" | "CHOOSE YOUR HUSTLE" | "HUSTLE" => Some(Self::Hustle),
            "2" | "PICK UP OR PERISH" | "PERISH" => Some(Self::PickUpOrPerish),
            _ => None,
        }
    }

    /// Parses the stored identifier.
    #[must_use]
    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "hustle" => Some(Self::Hustle),
            "pick_up_or_perish" => Some(Self::PickUpOrPerish),
            _ => None,
        }
    }

    /// The stored identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hustle => "hustle",
            Self::PickUpOrPerish => "pick_up_or_perish",
        }
    }

    /// Menu title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Hustle => "Choose Your Hustle",
            Self::PickUpOrPerish => "Pick Up or Perish",
        }
    }

    /// Whether the engine has a script for this game.
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, Self::Hustle)
    }
}
