//! Game scoring within a single set

use crate::game::Game;
use crate::player::Player;

/// Result of registering one point with a set.
///
/// `game_ended` is reported separately from `winner` so the match can keep
/// its game counter in step even when the set carries on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetProgress {
    /// Set winner, if this point ended the set
    pub winner: Option<Player>,
    /// Player to serve next
    pub server: Player,
    /// This point ended a game
    pub game_ended: bool,
}

// ============================================================================
// STANDARD SET
// ============================================================================

/// First to `games_to_win` games by two, or `games_to_win + 1` outright.
/// A tie-break game is played at `games_to_win` all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardSet {
    /// Server of the next game
    server: Player,
    games_to_win: u8,
    tiebreak_to: u16,
    player1_games: u8,
    player2_games: u8,
    /// Absolute gap between the game counts
    game_difference: u8,
    game: Game,
}

impl StandardSet {
    pub fn new(server: Player, games_to_win: u8, tiebreak_to: u16) -> Self {
        Self {
            server,
            games_to_win,
            tiebreak_to,
            player1_games: 0,
            player2_games: 0,
            game_difference: 0,
            game: Game::standard(server),
        }
    }

    pub fn games(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player1_games,
            Player::Two => self.player2_games,
        }
    }

    pub fn game_difference(&self) -> u8 {
        self.game_difference
    }

    fn add_game(&mut self, winner: Player) {
        match winner {
            Player::One => self.player1_games += 1,
            Player::Two => self.player2_games += 1,
        }
        self.game_difference = self.player1_games.abs_diff(self.player2_games);
        self.server = self.server.opponent();
    }

    /// Set-winning condition for `mine` games against `theirs`
    fn wins_with(&self, mine: u8, theirs: u8) -> bool {
        (mine == self.games_to_win && mine >= theirs + 2) || mine == self.games_to_win + 1
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH
            .into_iter()
            .find(|&p| self.wins_with(self.games(p), self.games(p.opponent())))
    }

    pub fn set_point(&self, player: Player) -> bool {
        self.game.game_point(player)
            && self.wins_with(self.games(player) + 1, self.games(player.opponent()))
    }

    fn new_game(&mut self) {
        let tied_at_target = self.player1_games == self.games_to_win
            && self.player2_games == self.games_to_win;
        self.game = if tied_at_target {
            tracing::debug!(games = self.games_to_win, "tie-break game");
            Game::tiebreak(self.server, self.tiebreak_to)
        } else {
            Game::standard(self.server)
        };
    }

    fn add_point(&mut self, winner: Player) -> SetProgress {
        let Some(game_winner) = self.game.add_point(winner) else {
            return SetProgress {
                winner: None,
                server: self.game.server(),
                game_ended: false,
            };
        };

        self.add_game(game_winner);
        tracing::debug!(
            winner = %game_winner,
            player1_games = self.player1_games,
            player2_games = self.player2_games,
            "game won"
        );

        let set_winner = self.winner();
        if set_winner.is_none() {
            self.new_game();
        }
        SetProgress {
            winner: set_winner,
            server: self.server,
            game_ended: true,
        }
    }
}

// ============================================================================
// TIE-BREAK SET
// ============================================================================

/// A whole set decided by a single tie-break game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TieBreakSet {
    /// Server of the first tie-break point
    server: Player,
    player1_games: u8,
    player2_games: u8,
    game: Game,
}

impl TieBreakSet {
    pub fn new(server: Player, target: u16) -> Self {
        Self {
            server,
            player1_games: 0,
            player2_games: 0,
            game: Game::tiebreak(server, target),
        }
    }

    pub fn games(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player1_games,
            Player::Two => self.player2_games,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.game.winner()
    }

    pub fn set_point(&self, player: Player) -> bool {
        self.game.game_point(player)
    }

    fn add_point(&mut self, winner: Player) -> SetProgress {
        let Some(game_winner) = self.game.add_point(winner) else {
            return SetProgress {
                winner: None,
                server: self.game.server(),
                game_ended: false,
            };
        };

        match game_winner {
            Player::One => self.player1_games += 1,
            Player::Two => self.player2_games += 1,
        }
        self.server = self.server.opponent();
        SetProgress {
            winner: Some(game_winner),
            server: self.server,
            game_ended: true,
        }
    }
}

// ============================================================================
// SET
// ============================================================================

/// The set currently being played inside a match
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Set {
    Standard(StandardSet),
    TieBreak(TieBreakSet),
}

impl Set {
    pub fn standard(server: Player, games_to_win: u8, tiebreak_to: u16) -> Self {
        Set::Standard(StandardSet::new(server, games_to_win, tiebreak_to))
    }

    pub fn tiebreak(server: Player, target: u16) -> Self {
        Set::TieBreak(TieBreakSet::new(server, target))
    }

    pub fn is_tiebreak_only(&self) -> bool {
        matches!(self, Set::TieBreak(_))
    }

    /// Active game (the final game once the set is won)
    pub fn game(&self) -> &Game {
        match self {
            Set::Standard(s) => &s.game,
            Set::TieBreak(s) => &s.game,
        }
    }

    pub fn games(&self, player: Player) -> u8 {
        match self {
            Set::Standard(s) => s.games(player),
            Set::TieBreak(s) => s.games(player),
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Set::Standard(s) => s.winner(),
            Set::TieBreak(s) => s.winner(),
        }
    }

    /// Winning the next point would win this set
    pub fn set_point(&self, player: Player) -> bool {
        match self {
            Set::Standard(s) => s.set_point(player),
            Set::TieBreak(s) => s.set_point(player),
        }
    }

    /// Register a point with the active game, rolling over to a new game
    /// when it ends. Must not be called once the set has a winner.
    pub fn add_point(&mut self, winner: Player) -> SetProgress {
        let progress = match self {
            Set::Standard(s) => s.add_point(winner),
            Set::TieBreak(s) => s.add_point(winner),
        };
        if let Some(set_winner) = progress.winner {
            tracing::debug!(
                winner = %set_winner,
                player1_games = self.games(Player::One),
                player2_games = self.games(Player::Two),
                "set won"
            );
        }
        progress
    }
}
