//! Integration tests for the scoring engine
//!
//! Drives whole matches through `Match::add_point` and checks the status
//! queries an event log relies on.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tennis_core::Player::{self, One, Two};
use tennis_core::{Match, MatchConfig, ScoringError, Side};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn win_game(m: &mut Match, player: Player) {
    let games = m.game_number();
    while m.game_number() == games {
        m.add_point(player).unwrap();
    }
}

fn win_set(m: &mut Match, player: Player) {
    let sets = m.set_number();
    while m.set_number() == sets && !m.is_finished() {
        m.add_point(player).unwrap();
    }
}

/// Best of three, One leading a set to love and 5-3 in the second
fn one_set_up_five_three(server: Player) -> Match {
    // Six games in the first set hand service back to the first server,
    // so starting with `server` leaves `server` serving game 9 of set two.
    let mut m = Match::new(MatchConfig::best_of(3).with_server(server)).unwrap();
    win_set(&mut m, One);
    for _ in 0..3 {
        win_game(&mut m, One);
        win_game(&mut m, Two);
    }
    win_game(&mut m, One);
    win_game(&mut m, One);
    assert_eq!(m.current_set().games(One), 5);
    assert_eq!(m.current_set().games(Two), 3);
    m
}

// ============================================================================
// MATCH POINT
// ============================================================================

#[test]
fn test_match_point_on_serve() {
    let mut m = one_set_up_five_three(One);
    assert_eq!(m.current_server(), One);
    // 40-15
    for p in [One, Two, One, One] {
        m.add_point(p).unwrap();
    }
    assert_eq!(m.get_score().points, ["40", "15"]);
    assert!(m.match_point(One));
    assert!(m.set_point(One));
    assert!(!m.break_point(One));
    assert!(!m.match_point(Two));
    assert_eq!(m.add_point(One).unwrap(), Some(One));
}

#[test]
fn test_match_point_while_receiving() {
    let mut m = one_set_up_five_three(Two);
    assert_eq!(m.current_server(), Two);
    // 15-40 from the server's view
    for p in [One, Two, One, One] {
        m.add_point(p).unwrap();
    }
    assert!(m.match_point(One));
    assert!(m.break_point(One));
    let snap = m.snapshot();
    assert_eq!(snap.match_point, Some(One));
    assert_eq!(snap.break_point, Some(One));
    assert_eq!(snap.server, Two);
}

#[test]
fn test_no_match_point_in_first_set() {
    let mut m = Match::new(MatchConfig::default()).unwrap();
    for _ in 0..5 {
        win_game(&mut m, One);
    }
    for _ in 0..3 {
        m.add_point(One).unwrap();
    }
    assert!(m.set_point(One));
    assert!(!m.match_point(One));
}

// ============================================================================
// SETS AND TIE-BREAKS
// ============================================================================

#[test]
fn test_tiebreak_set_seven_six() {
    let mut m = Match::new(MatchConfig::default()).unwrap();
    for _ in 0..6 {
        win_game(&mut m, One);
        win_game(&mut m, Two);
    }
    assert!(m.current_game().is_tiebreak());
    // 6-6 in the tie-break, then win by two
    for _ in 0..6 {
        m.add_point(One).unwrap();
        m.add_point(Two).unwrap();
    }
    assert_eq!(m.get_score().points, ["6", "6"]);
    m.add_point(Two).unwrap();
    assert_eq!(m.set_number(), 1);
    m.add_point(Two).unwrap();
    assert_eq!(m.set_number(), 2);
    assert_eq!(m.completed_sets()[0].games, [6, 7]);
    assert_eq!(m.completed_sets()[0].tiebreak_points, Some([6, 8]));
    assert_eq!(m.sets(Two), 1);
}

#[test]
fn test_deciding_set_tiebreak_uses_final_target() {
    let config = MatchConfig::best_of(5).with_final_set_tiebreak(10);
    let mut m = Match::new(config).unwrap();
    for winner in [One, Two, One, Two] {
        assert!(!m.current_set().is_tiebreak_only());
        win_set(&mut m, winner);
    }
    assert!(m.current_set().is_tiebreak_only());
    // 9-9, then Two takes it 11-9
    for _ in 0..9 {
        m.add_point(One).unwrap();
        m.add_point(Two).unwrap();
    }
    assert!(!m.is_finished());
    m.add_point(Two).unwrap();
    assert!(!m.is_finished());
    m.add_point(Two).unwrap();
    assert_eq!(m.winner(), Some(Two));

    let deciding = m.completed_sets()[4];
    assert!(deciding.tiebreak_only);
    assert_eq!(deciding.tiebreak_points, Some([9, 11]));
    assert_eq!(deciding.score(Two), 11);
    assert!(m.get_score().to_string().contains("9]"));
}

#[test]
fn test_deciding_set_without_tiebreak_option() {
    let mut m = Match::new(MatchConfig::best_of(3)).unwrap();
    win_set(&mut m, One);
    win_set(&mut m, Two);
    assert!(!m.current_set().is_tiebreak_only());
    for _ in 0..6 {
        win_game(&mut m, One);
        win_game(&mut m, Two);
    }
    // Tie-break at 6-6 in the deciding set uses the regular target
    assert!(m.current_game().is_tiebreak());
    for _ in 0..7 {
        m.add_point(One).unwrap();
    }
    assert_eq!(m.winner(), Some(One));
}

// ============================================================================
// SERVICE AND LOG KEYS
// ============================================================================

#[test]
fn test_server_alternates_by_game_across_sets() {
    let mut m = Match::new(MatchConfig::default().with_server(Two)).unwrap();
    let mut expected = Two;
    for _ in 0..9 {
        assert_eq!(m.current_server(), expected);
        win_game(&mut m, One);
        expected = expected.opponent();
    }
    // Nine games: 6-0 then 3-0 in the second set
    assert_eq!(m.set_number(), 2);
    assert_eq!(m.current_server(), expected);
}

#[test]
fn test_point_uuid_tracks_side() {
    let mut m = Match::new(MatchConfig::default()).unwrap();
    assert_eq!(m.side(), Side::Deuce);
    m.add_point(Two).unwrap();
    assert_eq!(m.side(), Side::Ad);
    assert_eq!(m.point_uuid(), "1-1-2-1-1");
    m.add_point(Two).unwrap();
    assert_eq!(m.point_uuid(), "1-1-3-1-0");
}

#[test]
fn test_invalid_winner_is_rejected() {
    let mut m = Match::new(MatchConfig::default()).unwrap();
    let before = m.snapshot();
    assert_eq!(m.add_point_id(9), Err(ScoringError::InvalidWinner(9)));
    assert_eq!(m.snapshot(), before);
}

// ============================================================================
// RANDOMIZED INVARIANTS
// ============================================================================

#[test]
fn test_random_matches_terminate_consistently() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let configs = [
        MatchConfig::best_of(1),
        MatchConfig::best_of(3),
        MatchConfig::best_of(5).with_final_set_tiebreak(10),
        MatchConfig::best_of(3).with_sets(4, 5).with_server(Two),
        MatchConfig::best_of(5).with_sets(2, 3).with_final_set_tiebreak(3),
    ];

    for config in configs {
        for _ in 0..20 {
            let mut m = Match::new(config.clone()).unwrap();
            let mut result = None;
            let mut points = 0u32;
            while result.is_none() {
                let winner = if rng.gen_bool(0.5) { One } else { Two };
                let before_games = m.game_number();
                let before_sets = m.set_number();

                let game_point = m.current_game().game_point(winner);
                let set_point = m.set_point(winner);
                let match_point = m.match_point(winner);
                result = m.add_point(winner).unwrap();
                points += 1;

                // Each level ends exactly on a point flagged for its winner
                let game_ended = m.game_number() > before_games;
                let set_ended = m.set_number() > before_sets || result.is_some();
                assert_eq!(game_ended, game_point);
                assert_eq!(set_ended, set_point);
                assert_eq!(result.is_some(), match_point);
                if match_point {
                    assert_eq!(result, Some(winner));
                }
                assert!(m.game_number() >= before_games);
                assert!(m.set_number() >= before_sets);
                assert!(points < 10_000, "match did not terminate");
            }

            let winner = result.unwrap();
            assert_eq!(m.sets(winner), config.sets_to_win());
            assert!(m.sets(winner.opponent()) < config.sets_to_win());
            assert_eq!(m.point_number(), points + 1);
            assert_eq!(
                m.completed_sets().len(),
                (m.sets(One) + m.sets(Two)) as usize
            );
            assert_eq!(m.add_point(winner), Err(ScoringError::MatchFinished));
        }
    }
}
