//! Point scripts and per-point event records

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use tennis_core::{Player, PointSnapshot};

/// How the point ended on serve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeOutcome {
    Ace,
    FirstServe,
    SecondServe,
    DoubleFault,
}

/// One token of a point script
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointEntry {
    /// `1` / `2`: the point went to this player after a rally; `S1` / `S2`
    /// when it was played on a second serve
    Winner { player: Player, second_serve: bool },
    /// `A`: the server won outright
    Ace,
    /// `D`: the receiver won on a double fault
    DoubleFault,
}

impl PointEntry {
    pub fn first_serve(player: Player) -> Self {
        PointEntry::Winner {
            player,
            second_serve: false,
        }
    }

    pub fn second_serve(player: Player) -> Self {
        PointEntry::Winner {
            player,
            second_serve: true,
        }
    }

    /// Winner and serve outcome given who is serving
    pub fn resolve(self, server: Player) -> (Player, ServeOutcome) {
        match self {
            PointEntry::Winner {
                player,
                second_serve: false,
            } => (player, ServeOutcome::FirstServe),
            PointEntry::Winner {
                player,
                second_serve: true,
            } => (player, ServeOutcome::SecondServe),
            PointEntry::Ace => (server, ServeOutcome::Ace),
            PointEntry::DoubleFault => (server.opponent(), ServeOutcome::DoubleFault),
        }
    }
}

/// Parse a point script.
///
/// Every non-whitespace character is one point, except `S`, which marks the
/// following `1` / `2` as played on a second serve. `#` starts a comment that
/// runs to the end of the line.
pub fn parse_script(script: &str) -> Result<Vec<PointEntry>> {
    let mut entries = Vec::new();
    let mut second_serve = None;
    for (line_no, line) in script.lines().enumerate() {
        let line_no = line_no + 1;
        let content = line.split('#').next().unwrap_or_default();
        for token in content.chars().filter(|c| !c.is_whitespace()) {
            let token = token.to_ascii_uppercase();
            let pending = second_serve.take();
            let entry = match token {
                '1' => PointEntry::Winner {
                    player: Player::One,
                    second_serve: pending.is_some(),
                },
                '2' => PointEntry::Winner {
                    player: Player::Two,
                    second_serve: pending.is_some(),
                },
                'S' if pending.is_none() => {
                    second_serve = Some(line_no);
                    continue;
                }
                'A' | 'D' | 'S' if pending.is_some() => {
                    bail!("line {}: 'S' must be followed by 1 or 2, got '{}'", line_no, token)
                }
                'A' => PointEntry::Ace,
                'D' => PointEntry::DoubleFault,
                other => bail!("line {}: unknown point token '{}'", line_no, other),
            };
            entries.push(entry);
        }
    }
    if let Some(line_no) = second_serve {
        bail!("line {}: 'S' must be followed by 1 or 2", line_no);
    }
    Ok(entries)
}

/// Event log row for one point
#[derive(Clone, Debug, Serialize)]
pub struct PointRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub status: PointSnapshot,
    pub winner: Player,
    pub serve: ServeOutcome,
    pub ace_flag: bool,
    pub double_fault_flag: bool,
}

impl PointRecord {
    pub fn new(status: PointSnapshot, winner: Player, serve: ServeOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            status,
            winner,
            serve,
            ace_flag: serve == ServeOutcome::Ace,
            double_fault_flag: serve == ServeOutcome::DoubleFault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tennis_core::{Match, MatchConfig};

    #[test]
    fn test_parse_script() {
        let entries = parse_script("1 2 a\n# comment only\n D2 # trailing\n").unwrap();
        assert_eq!(
            entries,
            vec![
                PointEntry::first_serve(Player::One),
                PointEntry::first_serve(Player::Two),
                PointEntry::Ace,
                PointEntry::DoubleFault,
                PointEntry::first_serve(Player::Two),
            ]
        );
    }

    #[test]
    fn test_parse_script_second_serve() {
        let entries = parse_script("s1 S 2\n1").unwrap();
        assert_eq!(
            entries,
            vec![
                PointEntry::second_serve(Player::One),
                PointEntry::second_serve(Player::Two),
                PointEntry::first_serve(Player::One),
            ]
        );
    }

    #[test]
    fn test_parse_script_rejects_dangling_second_serve() {
        assert!(parse_script("1S").unwrap_err().to_string().contains("line 1"));
        assert!(parse_script("1\nSA").unwrap_err().to_string().contains("line 2"));
        assert!(parse_script("SS1").is_err());
    }

    #[test]
    fn test_parse_script_rejects_unknown() {
        let err = parse_script("11\n13").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_resolve_serve_outcomes() {
        assert_eq!(
            PointEntry::Ace.resolve(Player::Two),
            (Player::Two, ServeOutcome::Ace)
        );
        assert_eq!(
            PointEntry::DoubleFault.resolve(Player::Two),
            (Player::One, ServeOutcome::DoubleFault)
        );
        assert_eq!(
            PointEntry::first_serve(Player::One).resolve(Player::Two),
            (Player::One, ServeOutcome::FirstServe)
        );
        assert_eq!(
            PointEntry::second_serve(Player::Two).resolve(Player::Two),
            (Player::Two, ServeOutcome::SecondServe)
        );
    }

    #[test]
    fn test_record_json_fields() {
        let m = Match::new(MatchConfig::default()).unwrap();
        let record = PointRecord::new(m.snapshot(), Player::One, ServeOutcome::Ace);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["point_uuid"], "1-1-1-1-0");
        assert_eq!(json["side"], 0);
        assert_eq!(json["winner"], 1);
        assert_eq!(json["serve"], "ace");
        assert_eq!(json["ace_flag"], true);
        assert_eq!(json["double_fault_flag"], false);
        assert!(json["break_point"].is_null());
    }
}
