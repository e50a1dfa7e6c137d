//! Set scoring within a match, server tracking and match-level status
//!
//! The match owns its current set, which owns its current game. Each point
//! cascades down and the outcome bubbles back up:
//! - Level 1: `Match::add_point` (orchestration, sequence counters)
//! - Level 2: `Set::add_point` (game rollover, tie-break insertion)
//! - Level 3: `Game::add_point` (point counting, tie-break service rotation)

use crate::config::MatchConfig;
use crate::error::{Result, ScoringError};
use crate::game::Game;
use crate::player::{Player, PlayerName};
use crate::set::Set;
use crate::snapshot::{PointSnapshot, Scoreboard, SetScore, Side};

/// A singles match in progress (or finished)
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
    sets_to_win: u8,
    /// Server of the next game, as last reported by the set
    server: Player,
    player1_sets: u8,
    player2_sets: u8,

    /// Sequence counters for the upcoming point; identification only
    set_number: u32,
    game_number: u32,
    point_number: u32,

    set: Set,
    completed_sets: Vec<SetScore>,
    winner: Option<Player>,
}

impl Match {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let sets_to_win = config.sets_to_win();
        let server = config.server;
        let mut tracked = Self {
            set: Set::standard(server, config.set_games, config.set_tiebreak_to),
            config,
            sets_to_win,
            server,
            player1_sets: 0,
            player2_sets: 0,
            set_number: 1,
            game_number: 1,
            point_number: 1,
            completed_sets: Vec::new(),
            winner: None,
        };
        // A best-of-one match with a final-set tie-break is a single tie-break
        tracked.new_set();
        Ok(tracked)
    }

    // ========================================================================
    // POINT ENTRY
    // ========================================================================

    /// Register the winner of the next point.
    ///
    /// Returns the match winner if this point ended the match. Fails with
    /// `MatchFinished` once a winner exists, leaving all state untouched.
    pub fn add_point(&mut self, winner: Player) -> Result<Option<Player>> {
        if self.winner.is_some() {
            return Err(ScoringError::MatchFinished);
        }

        let progress = self.set.add_point(winner);
        self.point_number += 1;
        self.server = progress.server;
        if progress.game_ended {
            self.game_number += 1;
        }

        let Some(set_winner) = progress.winner else {
            return Ok(None);
        };

        let last_game = self.set.game();
        self.completed_sets.push(SetScore {
            games: Player::BOTH.map(|p| self.set.games(p)),
            winner: set_winner,
            tiebreak_only: self.set.is_tiebreak_only(),
            tiebreak_points: last_game
                .is_tiebreak()
                .then(|| Player::BOTH.map(|p| last_game.points(p))),
        });

        if let Some(match_winner) = self.add_set(set_winner) {
            tracing::info!(
                winner = %match_winner,
                player1_sets = self.player1_sets,
                player2_sets = self.player2_sets,
                points = self.point_number - 1,
                "match won"
            );
            self.winner = Some(match_winner);
            return Ok(Some(match_winner));
        }

        self.set_number += 1;
        self.new_set();
        Ok(None)
    }

    /// Register a point by raw player id (1 or 2).
    ///
    /// Any other id fails with `InvalidWinner` and changes nothing.
    pub fn add_point_id(&mut self, winner: u8) -> Result<Option<Player>> {
        let winner = Player::try_from(winner)?;
        self.add_point(winner)
    }

    fn add_set(&mut self, winner: Player) -> Option<Player> {
        match winner {
            Player::One => self.player1_sets += 1,
            Player::Two => self.player2_sets += 1,
        }
        (self.sets(winner) == self.sets_to_win).then_some(winner)
    }

    fn new_set(&mut self) {
        let deciding = self.player1_sets + 1 == self.sets_to_win
            && self.player2_sets + 1 == self.sets_to_win;
        self.set = if self.config.final_set_tiebreak && deciding {
            tracing::debug!(
                target_points = self.config.final_set_tiebreak_to,
                "deciding set played as a tie-break"
            );
            Set::tiebreak(self.server, self.config.final_set_tiebreak_to)
        } else {
            Set::standard(self.server, self.config.set_games, self.config.set_tiebreak_to)
        };
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn player_name(&self, player: Player) -> &PlayerName {
        self.config.player_name(player)
    }

    pub fn sets_to_win(&self) -> u8 {
        self.sets_to_win
    }

    pub fn sets(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player1_sets,
            Player::Two => self.player2_sets,
        }
    }

    pub fn current_set(&self) -> &Set {
        &self.set
    }

    pub fn current_game(&self) -> &Game {
        self.set.game()
    }

    pub fn completed_sets(&self) -> &[SetScore] {
        &self.completed_sets
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn point_number(&self) -> u32 {
        self.point_number
    }

    // ========================================================================
    // STATUS QUERIES
    // ========================================================================

    /// Server of the next point. Follows the game, not the set, since a
    /// tie-break rotates service within the game.
    pub fn current_server(&self) -> Player {
        self.set.game().server()
    }

    pub fn side(&self) -> Side {
        Side::from_points_played(self.set.game().points_played())
    }

    pub fn break_point(&self, player: Player) -> bool {
        !self.is_finished() && self.set.game().break_point(player)
    }

    pub fn set_point(&self, player: Player) -> bool {
        !self.is_finished() && self.set.set_point(player)
    }

    /// Winning the next point would win the match
    pub fn match_point(&self, player: Player) -> bool {
        !self.is_finished()
            && self.set.game().game_point(player)
            && self.set.set_point(player)
            && self.sets(player) + 1 == self.sets_to_win
    }

    pub fn break_point_holder(&self) -> Option<Player> {
        self.holder(Self::break_point)
    }

    pub fn set_point_holder(&self) -> Option<Player> {
        self.holder(Self::set_point)
    }

    pub fn match_point_holder(&self) -> Option<Player> {
        self.holder(Self::match_point)
    }

    fn holder(&self, status: fn(&Self, Player) -> bool) -> Option<Player> {
        Player::BOTH.into_iter().find(|&p| status(self, p))
    }

    /// `{set}-{game}-{point}-{server}-{side}` key for the upcoming point
    pub fn point_uuid(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.set_number,
            self.game_number,
            self.point_number,
            self.current_server(),
            self.side()
        )
    }

    pub fn get_score(&self) -> Scoreboard {
        let game = self.set.game();
        Scoreboard {
            names: [
                self.config.player1_name.clone(),
                self.config.player2_name.clone(),
            ],
            server: self.current_server(),
            sets: [self.player1_sets, self.player2_sets],
            games: Player::BOTH.map(|p| self.set.games(p)),
            points: game.score(),
            completed_sets: self.completed_sets.clone(),
            winner: self.winner,
        }
    }

    /// Status of the upcoming point for an event log
    pub fn snapshot(&self) -> PointSnapshot {
        PointSnapshot {
            point_uuid: self.point_uuid(),
            set_number: self.set_number,
            game_number: self.game_number,
            point_number: self.point_number,
            server: self.current_server(),
            side: self.side(),
            break_point: self.break_point_holder(),
            set_point: self.set_point_holder(),
            match_point: self.match_point_holder(),
        }
    }
}
