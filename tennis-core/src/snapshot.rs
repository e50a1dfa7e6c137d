//! Read-only views of a match for scoreboards and point logs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::player::{Player, PlayerName};

/// Court side of the next serve, from the parity of points played in the game.
///
/// Serialized as its id (0 = deuce, 1 = ad), the same digit `point_uuid` uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    Deuce = 0,
    Ad = 1,
}

impl Side {
    pub fn from_points_played(points: u16) -> Self {
        if points % 2 == 0 {
            Side::Deuce
        } else {
            Side::Ad
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Side::Deuce),
            1 => Ok(Side::Ad),
            other => Err(format!("side must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        side.id()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Final games of a completed set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub games: [u8; 2],
    pub winner: Player,
    pub tiebreak_only: bool,
    /// Points of the tie-break that decided the set, if one was played
    pub tiebreak_points: Option<[u16; 2]>,
}

impl SetScore {
    /// Scoreboard figure for `player`: tie-break points for a tie-break-only
    /// set, games otherwise
    pub fn score(&self, player: Player) -> u16 {
        match self.tiebreak_points {
            Some(points) if self.tiebreak_only => points[player.index()],
            _ => u16::from(self.games[player.index()]),
        }
    }
}

/// Scoreboard rows, indexed `[player1, player2]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub names: [PlayerName; 2],
    pub server: Player,
    pub sets: [u8; 2],
    pub games: [u8; 2],
    pub points: [String; 2],
    pub completed_sets: Vec<SetScore>,
    pub winner: Option<Player>,
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in Player::BOTH {
            let i = player.index();
            let serve = if self.server == player { "*" } else { " " };
            let history: Vec<String> = self
                .completed_sets
                .iter()
                .map(|s| s.score(player).to_string())
                .collect();
            write!(
                f,
                "{} {:<25} sets {} [{}] games {} points {:>3}",
                serve,
                self.names[i],
                self.sets[i],
                history.join(" "),
                self.games[i],
                self.points[i]
            )?;
            if player == Player::One {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Everything an event log records about a point, captured before it is played
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub point_uuid: String,
    pub set_number: u32,
    pub game_number: u32,
    pub point_number: u32,
    pub server: Player,
    pub side: Side,
    pub break_point: Option<Player>,
    pub set_point: Option<Player>,
    pub match_point: Option<Player>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_parity() {
        assert_eq!(Side::from_points_played(0), Side::Deuce);
        assert_eq!(Side::from_points_played(1), Side::Ad);
        assert_eq!(Side::from_points_played(6), Side::Deuce);
    }

    #[test]
    fn test_side_serializes_as_id() {
        assert_eq!(serde_json::to_string(&Side::Deuce).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Side::Ad).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Side>("1").unwrap(), Side::Ad);
        assert!(serde_json::from_str::<Side>("2").is_err());
    }

    #[test]
    fn test_set_score_prefers_tiebreak_points_for_tiebreak_sets() {
        let standard = SetScore {
            games: [7, 6],
            winner: Player::One,
            tiebreak_only: false,
            tiebreak_points: Some([7, 5]),
        };
        assert_eq!(standard.score(Player::One), 7);
        assert_eq!(standard.score(Player::Two), 6);

        let tiebreak = SetScore {
            games: [1, 0],
            winner: Player::One,
            tiebreak_only: true,
            tiebreak_points: Some([11, 9]),
        };
        assert_eq!(tiebreak.score(Player::One), 11);
        assert_eq!(tiebreak.score(Player::Two), 9);
    }

    #[test]
    fn test_scoreboard_display() {
        let board = Scoreboard {
            names: [PlayerName::new("Ana"), PlayerName::new("Bea")],
            server: Player::Two,
            sets: [1, 0],
            games: [2, 3],
            points: ["AD".to_string(), String::new()],
            completed_sets: vec![
                SetScore {
                    games: [6, 4],
                    winner: Player::One,
                    tiebreak_only: false,
                    tiebreak_points: None,
                },
                SetScore {
                    games: [0, 1],
                    winner: Player::Two,
                    tiebreak_only: true,
                    tiebreak_points: Some([9, 11]),
                },
            ],
            winner: None,
        };
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  Ana"));
        assert!(lines[0].contains("[6 9]"));
        assert!(lines[0].ends_with("AD"));
        assert!(lines[1].starts_with("* Bea"));
        assert!(lines[1].contains("[4 11]"));
    }
}
