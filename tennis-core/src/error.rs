//! Error types for the scoring engine

/// Errors raised by the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("Winner value {0} not allowed")]
    InvalidWinner(u8),

    #[error("Match already finished")]
    MatchFinished,

    #[error("Invalid match configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
