//! Example to run the team queue server standalone
//!
//! Run with: cargo run -p teamqueue-server --example run_server

use teamqueue_core::{SchedulerConfig, TeamId, TeamQueue};
use teamqueue_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();
    let queue = TeamQueue::new(Vec::<TeamId>::new(), SchedulerConfig::default());

    println!("Starting team queue server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Queue display at http://localhost:{}/", config.port);

    run_server(config, queue).await
}
