//! Match settings shared by every command, and the `config` command
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - write resolved settings to disk
//! - Level 2: MatchArgs::resolve() - flags or JSON file into a MatchConfig
//! - Level 4: argument parsing utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tennis_core::{MatchConfig, Player, PlayerName};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct MatchArgs {
    /// Match settings JSON file (overrides the settings flags below)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Player 1 display name
    #[arg(long, default_value = "Player 1")]
    pub player1: String,

    /// Player 2 display name
    #[arg(long, default_value = "Player 2")]
    pub player2: String,

    /// Player serving the first game (1 or 2)
    #[arg(long, default_value = "1", value_parser = parse_player)]
    pub server: Player,

    /// Best of N sets (1, 3 or 5)
    #[arg(long, default_value = "3")]
    pub best_of: u8,

    /// Games needed to win a set
    #[arg(long, default_value = "6")]
    pub set_games: u8,

    /// Points needed to win a set tie-break
    #[arg(long, default_value = "7")]
    pub set_tiebreak_to: u16,

    /// Play the deciding set as a single tie-break
    #[arg(long)]
    pub final_set_tiebreak: bool,

    /// Points needed to win the deciding-set tie-break
    #[arg(long, default_value = "10")]
    pub final_set_tiebreak_to: u16,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub settings: MatchArgs,

    /// Output JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run config command: resolve the settings and save them for later runs
pub fn run(args: ConfigArgs) -> Result<()> {
    let config = args.settings.resolve()?;

    config
        .save(&args.output)
        .with_context(|| format!("Failed to write settings: {}", args.output.display()))?;

    tracing::info!(
        "Saved match settings ({} vs {}, best of {}) to {}",
        config.player1_name,
        config.player2_name,
        config.best_of,
        args.output.display()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

impl MatchArgs {
    /// Build a validated MatchConfig from the settings file or the flags
    pub fn resolve(&self) -> Result<MatchConfig> {
        if let Some(path) = &self.config {
            tracing::debug!("Loading match settings from {}", path.display());
            return MatchConfig::load(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()));
        }

        let config = MatchConfig {
            player1_name: PlayerName::or_placeholder(&self.player1, Player::One),
            player2_name: PlayerName::or_placeholder(&self.player2, Player::Two),
            server: self.server,
            best_of: self.best_of,
            set_games: self.set_games,
            set_tiebreak_to: self.set_tiebreak_to,
            final_set_tiebreak: self.final_set_tiebreak,
            final_set_tiebreak_to: self.final_set_tiebreak_to,
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_player(value: &str) -> std::result::Result<Player, String> {
    let id: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("expected 1 or 2, got '{}'", value))?;
    Player::try_from(id).map_err(|e| e.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> MatchArgs {
        MatchArgs {
            config: None,
            player1: "Player 1".into(),
            player2: "Player 2".into(),
            server: Player::One,
            best_of: 3,
            set_games: 6,
            set_tiebreak_to: 7,
            final_set_tiebreak: false,
            final_set_tiebreak_to: 10,
        }
    }

    #[test]
    fn test_parse_player() {
        assert_eq!(parse_player("1"), Ok(Player::One));
        assert_eq!(parse_player(" 2 "), Ok(Player::Two));
        assert!(parse_player("0").is_err());
        assert!(parse_player("two").is_err());
    }

    #[test]
    fn test_resolve_defaults_match_core_defaults() {
        let config = default_args().resolve().unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let mut args = default_args();
        args.best_of = 4;
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_resolve_blank_name() {
        let mut args = default_args();
        args.player2 = String::new();
        args.server = Player::Two;
        let config = args.resolve().unwrap();
        assert_eq!(config.player2_name.as_str(), "Player 2");
        assert_eq!(config.server, Player::Two);
    }

    #[test]
    fn test_resolve_from_file() {
        let path = std::env::temp_dir().join(format!(
            "tennis-cli-settings-{}.json",
            std::process::id()
        ));
        MatchConfig::best_of(5)
            .with_final_set_tiebreak(7)
            .save(&path)
            .unwrap();
        let mut args = default_args();
        args.config = Some(path.clone());
        let config = args.resolve();
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();
        assert_eq!(config.best_of, 5);
        assert!(config.final_set_tiebreak);
    }
}
