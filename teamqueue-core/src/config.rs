//! Configuration types for the scheduler
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Weight of each ledger counter in a team's score.
///
/// A team contributes
/// `played * played_w + together * together_w + against * against_w - waited * waited_w`
/// and lower totals are preferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Matches the team has played
    pub played: i64,
    /// Prior matches with its alliance partners
    pub together: i64,
    /// Prior matches against its opponents
    pub against: i64,
    /// Rounds spent waiting (subtracted)
    pub waited: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            played: 1,
            together: 1,
            against: 1,
            waited: 1,
        }
    }
}

/// Scheduler configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Upper bound on refinement rounds per match
    pub refinement_rounds: usize,
    /// Replacement draws tried before refinement gives up
    pub max_draw_attempts: usize,
    /// Scoring weights
    pub weights: ScoringWeights,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refinement_rounds: 100,
            max_draw_attempts: 10,
            weights: ScoringWeights::default(),
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_draw_attempts == 0 {
            return Err(ConfigError::NoDrawAttempts);
        }
        Ok(())
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set custom weights
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_refinement_rounds(mut self, rounds: usize) -> Self {
        self.refinement_rounds = rounds;
        self
    }
}
