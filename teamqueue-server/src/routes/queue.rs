//! Queue membership endpoints
//!
//! Join and leave answer 200 when the queue changed and 204 when the
//! request was a no-op (already queued / not queued).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use teamqueue_core::TeamId;

use crate::state::ServerState;

/// Add a team to the queue
pub async fn join_queue(
    State(state): State<Arc<ServerState>>,
    Path(team): Path<String>,
) -> StatusCode {
    if state.join(TeamId::from(team)) {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Remove a team from the queue
pub async fn leave_queue(
    State(state): State<Arc<ServerState>>,
    Path(team): Path<String>,
) -> StatusCode {
    if state.leave(TeamId::from(team)) {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Snapshot of the waiting teams
pub async fn get_queue(State(state): State<Arc<ServerState>>) -> Json<Vec<TeamId>> {
    let queue = state.queue();
    Json(queue.waiting_teams().to_vec())
}
