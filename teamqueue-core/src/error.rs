//! Error types for the matchmaking engine

use thiserror::Error;

use crate::team::TeamId;

/// Ledger lookup failures.
///
/// These only occur when a caller skipped registration; the scheduler
/// logs them and scores the missing value as zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("team {0} has no ledger entry")]
    UnknownTeam(TeamId),

    #[error("teams {0} and {1} have no joint ledger entry")]
    UnknownPair(TeamId, TeamId),
}

/// Configuration and roster loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_draw_attempts must be at least 1")]
    NoDrawAttempts,

    #[error("failed to parse scheduler config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed JSON roster: {0}")]
    Roster(serde_json::Error),
}
