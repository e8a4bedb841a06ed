//! Participation statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use teamqueue_core::TeamId;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct TeamStats {
    pub team: TeamId,
    pub matches_played: u32,
    pub rounds_waited: u32,
}

/// Every known team's counters, sorted by team id
pub async fn get_stats(State(state): State<Arc<ServerState>>) -> Json<Vec<TeamStats>> {
    let queue = state.queue();
    let mut stats: Vec<TeamStats> = queue
        .ledger()
        .teams()
        .map(|(team, record)| TeamStats {
            team: team.clone(),
            matches_played: record.matches_played,
            rounds_waited: record.rounds_waited,
        })
        .collect();
    stats.sort_by(|a, b| a.team.cmp(&b.team));

    Json(stats)
}
