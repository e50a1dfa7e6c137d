//! Point scoring within a single game
//!
//! Two variants: the standard game (0/15/30/40 with deuce and advantage)
//! and the tie-break game (race to a configurable target, win by two).

use crate::player::Player;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Points needed to win a standard game
pub const STANDARD_GAME_POINTS: u16 = 4;

/// Display values for standard point counts 0..=4
const POINT_NAMES: [&str; 5] = ["0", "15", "30", "40", "AD"];

/// Minimum winning margin for every game variant
const WIN_MARGIN: i16 = 2;

// ============================================================================
// STANDARD GAME
// ============================================================================

/// Standard game: first to 4 points, win by 2.
///
/// Point counts never exceed 4: a point won against advantage takes the
/// opponent back from 4 to 3 (deuce) instead of raising the winner to 4.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardGame {
    server: Player,
    player1_points: u16,
    player2_points: u16,
    /// `player1_points - player2_points`
    score_difference: i16,
}

impl StandardGame {
    pub fn new(server: Player) -> Self {
        Self {
            server,
            player1_points: 0,
            player2_points: 0,
            score_difference: 0,
        }
    }

    pub fn server(&self) -> Player {
        self.server
    }

    pub fn points(&self, player: Player) -> u16 {
        match player {
            Player::One => self.player1_points,
            Player::Two => self.player2_points,
        }
    }

    fn points_mut(&mut self, player: Player) -> &mut u16 {
        match player {
            Player::One => &mut self.player1_points,
            Player::Two => &mut self.player2_points,
        }
    }

    fn lead(&self, player: Player) -> i16 {
        match player {
            Player::One => self.score_difference,
            Player::Two => -self.score_difference,
        }
    }

    fn add_point(&mut self, winner: Player) {
        if self.is_advantage(winner.opponent()) {
            *self.points_mut(winner.opponent()) -= 1;
        } else {
            *self.points_mut(winner) += 1;
        }
        self.score_difference += match winner {
            Player::One => 1,
            Player::Two => -1,
        };
    }

    /// Player is at 4 and the opponent at 3
    pub fn is_advantage(&self, player: Player) -> bool {
        self.points(player) == STANDARD_GAME_POINTS
            && self.points(player.opponent()) == STANDARD_GAME_POINTS - 1
    }

    pub fn game_point(&self, player: Player) -> bool {
        self.is_advantage(player)
            || (self.points(player) >= STANDARD_GAME_POINTS - 1 && self.lead(player) > 0)
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH.into_iter().find(|&p| {
            self.points(p) >= STANDARD_GAME_POINTS && self.lead(p) >= WIN_MARGIN
        })
    }

    fn score(&self) -> [String; 2] {
        if self.winner().is_some() {
            return [String::new(), String::new()];
        }
        if self.is_advantage(Player::One) {
            return [POINT_NAMES[4].to_string(), String::new()];
        }
        if self.is_advantage(Player::Two) {
            return [String::new(), POINT_NAMES[4].to_string()];
        }
        Player::BOTH.map(|p| {
            POINT_NAMES
                .get(self.points(p) as usize)
                .copied()
                .unwrap_or_default()
                .to_string()
        })
    }
}

// ============================================================================
// TIE-BREAK GAME
// ============================================================================

/// Tie-break game: first to `target` points, win by 2.
///
/// Service changes after the first point and then every two points, i.e.
/// whenever the number of points played is odd.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TieBreakGame {
    server: Player,
    target: u16,
    player1_points: u16,
    player2_points: u16,
    score_difference: i16,
}

impl TieBreakGame {
    pub fn new(server: Player, target: u16) -> Self {
        Self {
            server,
            target,
            player1_points: 0,
            player2_points: 0,
            score_difference: 0,
        }
    }

    /// Player serving the next point
    pub fn server(&self) -> Player {
        self.server
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn points(&self, player: Player) -> u16 {
        match player {
            Player::One => self.player1_points,
            Player::Two => self.player2_points,
        }
    }

    fn lead(&self, player: Player) -> i16 {
        match player {
            Player::One => self.score_difference,
            Player::Two => -self.score_difference,
        }
    }

    fn add_point(&mut self, winner: Player) {
        match winner {
            Player::One => {
                self.player1_points += 1;
                self.score_difference += 1;
            }
            Player::Two => {
                self.player2_points += 1;
                self.score_difference -= 1;
            }
        }
        if self.points_played() % 2 == 1 {
            self.server = self.server.opponent();
        }
    }

    fn points_played(&self) -> u16 {
        self.player1_points + self.player2_points
    }

    pub fn game_point(&self, player: Player) -> bool {
        self.points(player) + 1 >= self.target && self.lead(player) > 0
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH
            .into_iter()
            .find(|&p| self.points(p) >= self.target && self.lead(p) >= WIN_MARGIN)
    }
}

// ============================================================================
// GAME
// ============================================================================

/// The game currently being played inside a set
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Game {
    Standard(StandardGame),
    TieBreak(TieBreakGame),
}

impl Game {
    pub fn standard(server: Player) -> Self {
        Game::Standard(StandardGame::new(server))
    }

    pub fn tiebreak(server: Player, target: u16) -> Self {
        Game::TieBreak(TieBreakGame::new(server, target))
    }

    pub fn is_tiebreak(&self) -> bool {
        matches!(self, Game::TieBreak(_))
    }

    /// Player serving the next point
    pub fn server(&self) -> Player {
        match self {
            Game::Standard(g) => g.server(),
            Game::TieBreak(g) => g.server(),
        }
    }

    pub fn points(&self, player: Player) -> u16 {
        match self {
            Game::Standard(g) => g.points(player),
            Game::TieBreak(g) => g.points(player),
        }
    }

    /// `player1_points - player2_points`
    pub fn score_difference(&self) -> i16 {
        match self {
            Game::Standard(g) => g.score_difference,
            Game::TieBreak(g) => g.score_difference,
        }
    }

    pub fn points_played(&self) -> u16 {
        self.points(Player::One) + self.points(Player::Two)
    }

    /// Register a point; returns the game winner if this point ended the game.
    ///
    /// Must not be called again once a winner has been reported.
    pub fn add_point(&mut self, winner: Player) -> Option<Player> {
        match self {
            Game::Standard(g) => g.add_point(winner),
            Game::TieBreak(g) => g.add_point(winner),
        }
        self.winner()
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Game::Standard(g) => g.winner(),
            Game::TieBreak(g) => g.winner(),
        }
    }

    /// Winning the next point would win this game
    pub fn game_point(&self, player: Player) -> bool {
        match self {
            Game::Standard(g) => g.game_point(player),
            Game::TieBreak(g) => g.game_point(player),
        }
    }

    /// Game point held by the receiver. Never true inside a tie-break.
    pub fn break_point(&self, player: Player) -> bool {
        match self {
            Game::Standard(g) => g.game_point(player) && player != g.server(),
            Game::TieBreak(_) => false,
        }
    }

    /// Display strings for `[player1, player2]`
    pub fn score(&self) -> [String; 2] {
        match self {
            Game::Standard(g) => g.score(),
            Game::TieBreak(g) => Player::BOTH.map(|p| g.points(p).to_string()),
        }
    }
}
