//! Simulate command - play random matches through the scoring engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: simulate_matches(), report_results()
//! - Level 3: play_single_match(), compute_statistics()
//! - Level 4: RNG and formatting utilities

use anyhow::{ensure, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tennis_core::{Match, MatchConfig, Player, SetScore};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub settings: crate::settings::MatchArgs,

    /// Number of matches to play
    #[arg(long, default_value = "100")]
    pub matches: usize,

    /// Probability that the server wins a point
    #[arg(long, default_value = "0.62")]
    pub serve_win: f64,

    /// Serve-point probability for player 1 (defaults to --serve-win)
    #[arg(long)]
    pub player1_serve_win: Option<f64>,

    /// Serve-point probability for player 2 (defaults to --serve-win)
    #[arg(long)]
    pub player2_serve_win: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single simulated match
#[derive(Clone, Debug)]
struct MatchRecord {
    match_number: usize,
    winner: Player,
    points: u32,
    games: u32,
    tiebreaks: u32,
    sets: Vec<SetScore>,
}

/// Aggregated simulation results
#[derive(Clone, Debug)]
struct SimulationResults {
    matches: Vec<MatchRecord>,
    player1_wins: usize,
    player2_wins: usize,
    avg_points: f32,
    avg_games: f32,
    tiebreaks: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Resolve settings and serve probabilities
/// 2. Play the matches
/// 3. Report results
pub fn run(args: SimulateArgs) -> Result<()> {
    let config = args.settings.resolve()?;
    let serve_win = serve_probabilities(&args)?;

    tracing::info!(
        "Simulating {} matches: {} ({:.2}) vs {} ({:.2}), best of {}",
        args.matches,
        config.player1_name,
        serve_win[0],
        config.player2_name,
        serve_win[1],
        config.best_of
    );

    let results = simulate_matches(&config, serve_win, args.matches, args.seed)?;

    report_results(&config, &results, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn simulate_matches(
    config: &MatchConfig,
    serve_win: [f64; 2],
    count: usize,
    seed: Option<u64>,
) -> Result<SimulationResults> {
    let mut rng = create_rng(seed);
    let mut matches = Vec::with_capacity(count);

    for match_num in 0..count {
        let record = play_single_match(config, serve_win, match_num + 1, &mut rng)?;
        tracing::debug!(
            "Match {}: won by player {} ({} points, {} games)",
            record.match_number,
            record.winner,
            record.points,
            record.games
        );
        matches.push(record);
    }

    Ok(compute_statistics(matches))
}

fn report_results(config: &MatchConfig, results: &SimulationResults, json: bool) {
    if json {
        print_json_results(results);
    } else {
        print_text_results(config, results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_match(
    config: &MatchConfig,
    serve_win: [f64; 2],
    match_number: usize,
    rng: &mut ChaCha8Rng,
) -> Result<MatchRecord> {
    let mut tracked = Match::new(config.clone())?;
    let mut tiebreaks = 0;

    let winner = loop {
        let game = tracked.current_game();
        if game.is_tiebreak() && game.points_played() == 0 {
            tiebreaks += 1;
        }

        let server = tracked.current_server();
        let point_winner = if rng.gen_bool(serve_win[server.index()]) {
            server
        } else {
            server.opponent()
        };

        if let Some(winner) = tracked.add_point(point_winner)? {
            break winner;
        }
    };

    Ok(MatchRecord {
        match_number,
        winner,
        points: tracked.point_number() - 1,
        games: tracked.game_number() - 1,
        tiebreaks,
        sets: tracked.completed_sets().to_vec(),
    })
}

fn compute_statistics(matches: Vec<MatchRecord>) -> SimulationResults {
    let player1_wins = matches.iter().filter(|m| m.winner == Player::One).count();
    let player2_wins = matches.iter().filter(|m| m.winner == Player::Two).count();
    let tiebreaks = matches.iter().map(|m| m.tiebreaks).sum();

    let (avg_points, avg_games) = if matches.is_empty() {
        (0.0, 0.0)
    } else {
        let n = matches.len() as f32;
        let points: u32 = matches.iter().map(|m| m.points).sum();
        let games: u32 = matches.iter().map(|m| m.games).sum();
        (points as f32 / n, games as f32 / n)
    };

    SimulationResults {
        matches,
        player1_wins,
        player2_wins,
        avg_points,
        avg_games,
        tiebreaks,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-player serve-point probabilities, indexed by `Player::index`
fn serve_probabilities(args: &SimulateArgs) -> Result<[f64; 2]> {
    let probabilities = [
        args.player1_serve_win.unwrap_or(args.serve_win),
        args.player2_serve_win.unwrap_or(args.serve_win),
    ];
    for p in probabilities {
        // At exactly 0 or 1 a tie-break can never open a two-point lead
        ensure!(
            p > 0.0 && p < 1.0,
            "serve-win probability must be strictly between 0 and 1, got {}",
            p
        );
    }
    Ok(probabilities)
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// `6-4 3-6 [10-8]`, with tie-break-only sets shown by their points
fn format_sets(sets: &[SetScore]) -> String {
    sets.iter()
        .map(|s| {
            let score = format!("{}-{}", s.score(Player::One), s.score(Player::Two));
            if s.tiebreak_only {
                format!("[{}]", score)
            } else {
                score
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn win_rate(wins: usize, total: usize) -> f32 {
    if total > 0 {
        wins as f32 / total as f32
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SimulationResults) {
    #[derive(serde::Serialize)]
    struct JsonMatch {
        match_number: usize,
        winner: Player,
        points: u32,
        games: u32,
        tiebreaks: u32,
        sets: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_matches: usize,
        player1_wins: usize,
        player2_wins: usize,
        player1_win_rate: f32,
        avg_points: f32,
        avg_games: f32,
        tiebreaks: u32,
        matches: Vec<JsonMatch>,
    }

    let total = results.matches.len();
    let output = JsonOutput {
        total_matches: total,
        player1_wins: results.player1_wins,
        player2_wins: results.player2_wins,
        player1_win_rate: win_rate(results.player1_wins, total),
        avg_points: results.avg_points,
        avg_games: results.avg_games,
        tiebreaks: results.tiebreaks,
        matches: results
            .matches
            .iter()
            .map(|m| JsonMatch {
                match_number: m.match_number,
                winner: m.winner,
                points: m.points,
                games: m.games,
                tiebreaks: m.tiebreaks,
                sets: format_sets(&m.sets),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(config: &MatchConfig, results: &SimulationResults) {
    let total = results.matches.len();

    println!("\n=== Simulation Results ===");
    println!("Total matches: {}", total);
    println!(
        "{:<25} {} ({:.1}%)",
        config.player1_name.as_str(),
        results.player1_wins,
        win_rate(results.player1_wins, total) * 100.0
    );
    println!(
        "{:<25} {} ({:.1}%)",
        config.player2_name.as_str(),
        results.player2_wins,
        win_rate(results.player2_wins, total) * 100.0
    );
    println!("Avg points:    {:.1}", results.avg_points);
    println!("Avg games:     {:.1}", results.avg_games);
    println!("Tie-breaks:    {}", results.tiebreaks);

    println!("\nMatch details:");
    for m in &results.matches {
        println!(
            "  Match {}: player {} won {} in {} points",
            m.match_number,
            m.winner,
            format_sets(&m.sets),
            m.points
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
