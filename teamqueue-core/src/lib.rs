//! Team Queue Core - Matchmaking engine
//!
//! This crate provides the scheduling logic for a 3-vs-3 event queue:
//! - Team, alliance and match types
//! - Participation ledger (per-team and per-pair counters)
//! - Rank tracker (running best over an append-only candidate set)
//! - Queue scheduler (random draw plus bounded local search)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: TeamQueue::new_match (orchestration)
//! - Level 2: generate, refine, commit (phases)
//! - Level 3: scoring, worst-team detection, replacement draws (steps)
//! - Level 4: ledger, rank tracker, configuration

pub mod config;
pub mod error;
pub mod ledger;
pub mod rank;
pub mod scheduler;
pub mod team;

// Re-exports for convenient access
pub use config::{SchedulerConfig, ScoringWeights};
pub use error::{ConfigError, LedgerError};
pub use ledger::{Ledger, PairRecord, TeamRecord};
pub use rank::RankTracker;
pub use scheduler::TeamQueue;
pub use team::{Alliance, MatchCandidate, Side, TeamId, ALLIANCE_SIZE, MATCH_SIZE};
