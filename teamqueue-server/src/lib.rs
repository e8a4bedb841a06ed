//! Team Queue Server - HTTP and WebSocket front for the matchmaking engine
//!
//! This crate provides the request layer:
//! - REST API for joining/leaving the queue and drawing matches
//! - WebSocket feed of queue events, plus join/leave over the socket
//! - Static file serving for the queue display

mod events;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use teamqueue_core::TeamQueue;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use events::{ClientMessage, QueueEvent};
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "frontend/dist".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoints
        .route("/api/health", get(routes::status::health_handler))
        .route("/api/status", get(routes::status::status_handler))
        // Queue API
        .route("/api/join_queue/:team", post(routes::queue::join_queue))
        .route("/api/leave_queue/:team", post(routes::queue::leave_queue))
        .route("/api/get_queue", get(routes::queue::get_queue))
        // Matches
        .route("/api/new_match", get(routes::matches::new_match))
        .route("/api/stats", get(routes::stats::get_stats))
        // Live event feed
        .route("/ws", get(routes::ws::ws_handler))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server around an already configured queue
pub async fn run_server(config: ServerConfig, queue: TeamQueue) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(queue));
    let router = create_router(&config, state);

    tracing::info!("Team queue server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
