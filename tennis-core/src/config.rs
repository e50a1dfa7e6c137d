//! Match settings

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::{Result, ScoringError};
use crate::player::{Player, PlayerName};

const BEST_OF_RANGE: RangeInclusive<u8> = 1..=5;
const SET_GAMES_RANGE: RangeInclusive<u8> = 2..=6;
const SET_TIEBREAK_RANGE: RangeInclusive<u16> = 3..=11;
const FINAL_SET_TIEBREAK_RANGE: RangeInclusive<u16> = 3..=21;

/// Settings fixed for the lifetime of a match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    #[serde(deserialize_with = "player1_name")]
    pub player1_name: PlayerName,
    #[serde(deserialize_with = "player2_name")]
    pub player2_name: PlayerName,
    /// Server of the first game
    pub server: Player,
    /// Best of N sets (odd)
    pub best_of: u8,
    /// Games needed to win a standard set
    pub set_games: u8,
    /// Points needed to win the tie-break inside a standard set
    pub set_tiebreak_to: u16,
    /// Play the deciding set as a single tie-break
    pub final_set_tiebreak: bool,
    /// Points needed to win the deciding-set tie-break
    pub final_set_tiebreak_to: u16,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player1_name: PlayerName::placeholder(Player::One),
            player2_name: PlayerName::placeholder(Player::Two),
            server: Player::One,
            best_of: 3,
            set_games: 6,
            set_tiebreak_to: 7,
            final_set_tiebreak: false,
            final_set_tiebreak_to: 10,
        }
    }
}

impl MatchConfig {
    /// Create config for a best-of-N match with standard sets
    pub fn best_of(best_of: u8) -> Self {
        Self {
            best_of,
            ..Default::default()
        }
    }

    /// Set display names; blank names fall back to "Player 1" / "Player 2"
    pub fn with_players(mut self, player1: &str, player2: &str) -> Self {
        self.player1_name = PlayerName::or_placeholder(player1, Player::One);
        self.player2_name = PlayerName::or_placeholder(player2, Player::Two);
        self
    }

    pub fn with_server(mut self, server: Player) -> Self {
        self.server = server;
        self
    }

    /// Set games per set and the tie-break target used at games-all
    pub fn with_sets(mut self, set_games: u8, set_tiebreak_to: u16) -> Self {
        self.set_games = set_games;
        self.set_tiebreak_to = set_tiebreak_to;
        self
    }

    /// Decide the final set with a single tie-break to `target`
    pub fn with_final_set_tiebreak(mut self, target: u16) -> Self {
        self.final_set_tiebreak = true;
        self.final_set_tiebreak_to = target;
        self
    }

    /// Sets needed to win the match
    pub fn sets_to_win(&self) -> u8 {
        self.best_of / 2 + 1
    }

    pub fn player_name(&self, player: Player) -> &PlayerName {
        match player {
            Player::One => &self.player1_name,
            Player::Two => &self.player2_name,
        }
    }

    /// Check every setting against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !BEST_OF_RANGE.contains(&self.best_of) || self.best_of % 2 == 0 {
            return Err(ScoringError::InvalidConfig(format!(
                "best_of must be odd and within {:?}, got {}",
                BEST_OF_RANGE, self.best_of
            )));
        }
        check_range("set_games", self.set_games, SET_GAMES_RANGE)?;
        check_range("set_tiebreak_to", self.set_tiebreak_to, SET_TIEBREAK_RANGE)?;
        check_range(
            "final_set_tiebreak_to",
            self.final_set_tiebreak_to,
            FINAL_SET_TIEBREAK_RANGE,
        )?;
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MatchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// Blank names in a settings file get the same placeholders as `with_players`
fn player1_name<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<PlayerName, D::Error> {
    let name = String::deserialize(d)?;
    Ok(PlayerName::or_placeholder(&name, Player::One))
}

fn player2_name<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<PlayerName, D::Error> {
    let name = String::deserialize(d)?;
    Ok(PlayerName::or_placeholder(&name, Player::Two))
}

fn check_range<T>(name: &str, value: T, range: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Debug,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::InvalidConfig(format!(
            "{} must be within {:?}, got {:?}",
            name, range, value
        )))
    }
}
