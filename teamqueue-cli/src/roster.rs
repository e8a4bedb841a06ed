//! Roster and scheduler config loading
//!
//! Level 4 - file I/O

use std::path::Path;

use anyhow::{Context, Result};
use teamqueue_core::{ConfigError, SchedulerConfig, TeamId};

/// Load a roster file.
///
/// Accepts a JSON array of team ids, or plain text with one id per line
/// (blank lines and `#` comments skipped).
pub fn load_roster(path: &Path) -> Result<Vec<TeamId>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;
    let roster = parse_roster(&content)
        .with_context(|| format!("Invalid roster {}", path.display()))?;

    tracing::info!("Loaded {} teams from {}", roster.len(), path.display());
    Ok(roster)
}

/// Parse roster text. Content starting with `[` must be a JSON array of
/// strings; anything else is read line by line.
pub fn parse_roster(content: &str) -> Result<Vec<TeamId>, ConfigError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).map_err(ConfigError::Roster);
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(TeamId::from)
        .collect())
}

/// Load scheduler config from JSON, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<SchedulerConfig> {
    let Some(path) = path else {
        return Ok(SchedulerConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = SchedulerConfig::from_json(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    Ok(config)
}
