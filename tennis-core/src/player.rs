//! Player identity and display names

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScoringError;

/// Maximum number of characters kept from a display name
pub const MAX_NAME_LEN: usize = 25;

// ============================================================================
// PLAYER
// ============================================================================

/// One side of a singles match.
///
/// "Nobody holds this" is expressed as `Option<Player>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric id used by external collaborators (1 or 2)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Zero-based index for `[T; 2]` tables
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = ScoringError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(ScoringError::InvalidWinner(other)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.id()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// DISPLAY NAME
// ============================================================================

/// Display name, truncated to [`MAX_NAME_LEN`] characters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: &str) -> Self {
        Self(name.chars().take(MAX_NAME_LEN).collect())
    }

    /// Placeholder name ("Player 1" / "Player 2")
    pub fn placeholder(player: Player) -> Self {
        Self(format!("Player {}", player.id()))
    }

    /// Use `name` unless it is blank, otherwise the placeholder
    pub fn or_placeholder(name: &str, player: Player) -> Self {
        if name.trim().is_empty() {
            Self::placeholder(player)
        } else {
            Self::new(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlayerName {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
