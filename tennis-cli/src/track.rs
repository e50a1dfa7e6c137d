//! Track command - replay a point script through the scoring engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: read_script(), replay(), report()
//! - Level 3: record_point()
//! - Level 4: formatting utilities

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tennis_core::{Match, Player};

use crate::record::{parse_script, PointEntry, PointRecord, ServeOutcome};
use crate::settings::MatchArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TrackArgs {
    #[command(flatten)]
    pub settings: MatchArgs,

    /// Point script file: 1/2 = winner, S1/S2 = winner on a second serve,
    /// A = ace, D = double fault (stdin if omitted)
    #[arg(long, value_name = "FILE")]
    pub points: Option<PathBuf>,

    /// Output one JSON record per point
    #[arg(long)]
    pub json: bool,
}

/// Points applied to the match, plus any left over after it ended
#[derive(Debug)]
struct Replay {
    records: Vec<PointRecord>,
    ignored: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run track command
///
/// 1. Resolve match settings
/// 2. Read and parse the point script
/// 3. Replay the points, recording each one
/// 4. Report records and the final scoreboard
pub fn run(args: TrackArgs) -> Result<()> {
    let config = args.settings.resolve()?;
    let script = read_script(args.points.as_deref())?;
    let entries = parse_script(&script).context("Failed to parse point script")?;

    tracing::info!(
        "Tracking {} vs {} (best of {}, {} scripted points)",
        config.player1_name,
        config.player2_name,
        config.best_of,
        entries.len()
    );

    let mut tracked = Match::new(config)?;
    let replay = replay(&mut tracked, &entries)?;

    report(&tracked, &replay, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read the script from a file, or stdin when no file is given
fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read point script: {}", path.display())),
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read point script from stdin")?;
            Ok(script)
        }
    }
}

/// Apply every scripted point until the match ends
fn replay(tracked: &mut Match, entries: &[PointEntry]) -> Result<Replay> {
    let mut records = Vec::with_capacity(entries.len());

    for (i, &entry) in entries.iter().enumerate() {
        if tracked.is_finished() {
            let ignored = entries.len() - i;
            tracing::warn!("Match already decided, ignoring {} trailing points", ignored);
            return Ok(Replay { records, ignored });
        }
        records.push(record_point(tracked, entry)?);
    }

    Ok(Replay {
        records,
        ignored: 0,
    })
}

fn report(tracked: &Match, replay: &Replay, json: bool) -> Result<()> {
    if json {
        for record in &replay.records {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        for record in &replay.records {
            println!("{}", format_record(tracked, record));
        }
        println!("\n{}", tracked.get_score());
    }

    match tracked.winner() {
        Some(winner) => tracing::info!(
            "Match won by {} in {} points",
            tracked.player_name(winner),
            replay.records.len()
        ),
        None => tracing::info!(
            "Match in progress after {} points, next point {}",
            replay.records.len(),
            tracked.point_uuid()
        ),
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Snapshot the status, then play the point
fn record_point(tracked: &mut Match, entry: PointEntry) -> Result<PointRecord> {
    let (winner, serve) = entry.resolve(tracked.current_server());
    let status = tracked.snapshot();
    tracked.add_point(winner)?;
    Ok(PointRecord::new(status, winner, serve))
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_record(tracked: &Match, record: &PointRecord) -> String {
    let status = &record.status;
    let mut line = format!(
        "{:<14} serve {} -> {}",
        status.point_uuid,
        tracked.player_name(status.server),
        tracked.player_name(record.winner)
    );
    match record.serve {
        ServeOutcome::Ace => line.push_str(" (ace)"),
        ServeOutcome::SecondServe => line.push_str(" (second serve)"),
        ServeOutcome::DoubleFault => line.push_str(" (double fault)"),
        ServeOutcome::FirstServe => {}
    }
    for (tag, holder) in [
        ("MP", status.match_point),
        ("SP", status.set_point),
        ("BP", status.break_point),
    ] {
        if let Some(player) = holder {
            line.push_str(&format!(" [{} {}]", tag, flag_owner(player)));
        }
    }
    line
}

fn flag_owner(player: Player) -> String {
    format!("P{}", player.id())
}

// ============================================================================
// TESTS
// ============================================================================
