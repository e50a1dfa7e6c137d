//! Tennis Core - Scoring engine for singles tennis
//!
//! This crate turns a stream of "who won this point" events into match
//! progress:
//! - Games (standard 0/15/30/40 and tie-break scoring)
//! - Sets (games to a target with a tie-break, or a single tie-break set)
//! - Matches (best of N sets, optional deciding-set tie-break)
//! - Server rotation and break/set/match point status

pub mod config;
pub mod error;
pub mod game;
pub mod match_play;
pub mod player;
pub mod set;
pub mod snapshot;

// Re-exports for convenient access
pub use config::MatchConfig;
pub use error::{Result, ScoringError};
pub use game::{Game, StandardGame, TieBreakGame};
pub use match_play::Match;
pub use player::{Player, PlayerName, MAX_NAME_LEN};
pub use set::{Set, SetProgress, StandardSet, TieBreakSet};
pub use snapshot::{PointSnapshot, Scoreboard, SetScore, Side};
