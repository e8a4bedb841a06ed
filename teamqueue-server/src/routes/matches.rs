//! Match drawing endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::state::ServerState;

/// Draw the next match, or 204 when fewer than six teams are waiting
pub async fn new_match(State(state): State<Arc<ServerState>>) -> Response {
    match state.next_match() {
        Some(candidate) => Json(candidate).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
