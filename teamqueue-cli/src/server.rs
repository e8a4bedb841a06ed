//! Server command - start the queue server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), build_queue(), start_server()
//! - Level 3: (delegated to teamqueue-server crate)
//! - Level 4: configuration validation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use teamqueue_core::TeamQueue;
use teamqueue_server::{run_server, ServerConfig};

use crate::roster::{load_config, load_roster};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Directory containing static files for the queue display
    #[arg(long, default_value = "frontend/dist")]
    pub static_dir: PathBuf,

    /// Known teams, registered before anyone queues (JSON array or one per line)
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Scheduler config JSON
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Build the queue from roster and scheduler config
/// 3. Start server (blocking)
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args)?;
    let queue = build_queue(&args, seed)?;

    tracing::info!("Starting team queue server on port {}", config.port);

    start_server(config, queue)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

/// Create the event queue with the roster pre-registered
fn build_queue(args: &ServerArgs, seed: Option<u64>) -> Result<TeamQueue> {
    let mut scheduler = load_config(args.config.as_deref())?;
    if let Some(seed) = seed {
        scheduler = scheduler.with_seed(seed);
    }

    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => Vec::new(),
    };

    Ok(TeamQueue::new(roster, scheduler))
}

/// Start the server (blocking)
fn start_server(config: ServerConfig, queue: TeamQueue) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config, queue).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServerArgs {
        ServerArgs {
            port: 3000,
            static_dir: PathBuf::from("test_static"),
            roster: None,
            config: None,
        }
    }

    #[test]
    fn test_configure_server_defaults() {
        let config = configure_server(&args()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, "test_static");
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(&PathBuf::from("/nonexistent/path"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_queue_applies_seed() {
        let queue = build_queue(&args(), Some(5)).unwrap();
        assert_eq!(queue.config().seed, Some(5));
        assert!(queue.is_empty());
        assert!(queue.ledger().is_empty());
    }
}
