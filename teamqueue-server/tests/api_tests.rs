//! Integration tests for teamqueue-server API

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use teamqueue_core::{SchedulerConfig, TeamId, TeamQueue};
use teamqueue_server::{create_router, QueueEvent, ServerConfig, ServerState};
use tower::ServiceExt;

fn test_state() -> Arc<ServerState> {
    let queue = TeamQueue::new(Vec::<TeamId>::new(), SchedulerConfig::default().with_seed(17));
    Arc::new(ServerState::new(queue))
}

fn test_app(state: Arc<ServerState>) -> Router {
    create_router(&ServerConfig::default(), state)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn join(app: &Router, team: &str) -> StatusCode {
    send(app, Method::POST, &format!("/api/join_queue/{}", team)).await.0
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(test_state());

    let (status, body) = send(&app, Method::GET, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Health");
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app(test_state());
    join(&app, "1").await;

    let (status, body) = send(&app, Method::GET, "/api/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["waiting"], 1);
}

#[tokio::test]
async fn test_join_twice_is_no_content() {
    let app = test_app(test_state());

    assert_eq!(join(&app, "A").await, StatusCode::OK);
    assert_eq!(join(&app, "A").await, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/get_queue").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!(["A"]));
}

#[tokio::test]
async fn test_leave_queue() {
    let app = test_app(test_state());

    let (status, _) = send(&app, Method::POST, "/api/leave_queue/Z").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    join(&app, "Z").await;
    let (status, _) = send(&app, Method::POST, "/api/leave_queue/Z").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/get_queue").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_match_needs_six_teams() {
    let app = test_app(test_state());
    for team in ["A", "B", "C", "D", "E"] {
        join(&app, team).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/new_match").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_new_match_with_seven_teams() {
    let state = test_state();
    let app = test_app(state.clone());
    let teams = ["A", "B", "C", "D", "E", "F", "G"];
    for team in teams {
        join(&app, team).await;
    }
    let mut events = state.subscribe();

    let (status, body) = send(&app, Method::GET, "/api/new_match").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let red = json["red"].as_array().unwrap();
    let blue = json["blue"].as_array().unwrap();
    assert_eq!(red.len(), 3);
    assert_eq!(blue.len(), 3);

    let picked: HashSet<&str> = red.iter().chain(blue).filter_map(|v| v.as_str()).collect();
    assert_eq!(picked.len(), 6);

    let (_, body) = send(&app, Method::GET, "/api/get_queue").await;
    let waiting: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(waiting.len(), 1);
    assert!(!picked.contains(waiting[0].as_str()));

    assert!(matches!(events.try_recv(), Ok(QueueEvent::MatchQueued { .. })));
}

#[tokio::test]
async fn test_stats_endpoint() {
    let state = test_state();
    let app = test_app(state.clone());
    for team in ["A", "B", "C", "D", "E", "F", "G"] {
        join(&app, team).await;
    }
    send(&app, Method::GET, "/api/new_match").await;

    let (status, body) = send(&app, Method::GET, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);

    let stats: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.len(), 7);
    assert_eq!(stats[0]["team"], "A");

    let waiting = state.queue().waiting_teams()[0].clone();
    for entry in &stats {
        let team = TeamId::from(entry["team"].as_str().unwrap());
        if team == waiting {
            assert_eq!(entry["matches_played"], 0);
            assert_eq!(entry["rounds_waited"], 1);
        } else {
            assert_eq!(entry["matches_played"], 1);
            assert_eq!(entry["rounds_waited"], 0);
        }
    }
}

#[tokio::test]
async fn test_join_broadcasts_event() {
    let state = test_state();
    let app = test_app(state.clone());
    let mut events = state.subscribe();

    join(&app, "frc254").await;
    join(&app, "frc254").await;

    match events.try_recv() {
        Ok(QueueEvent::JoinedQueue { team, .. }) => assert_eq!(team, TeamId::from("frc254")),
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(events.try_recv().is_err());
}
