//! Messages exchanged with connected observers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teamqueue_core::{Alliance, MatchCandidate, TeamId};

/// Server → client notifications
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    JoinedQueue {
        team: TeamId,
        timestamp: DateTime<Utc>,
    },
    LeftQueue {
        team: TeamId,
        timestamp: DateTime<Utc>,
    },
    MatchQueued {
        red: Alliance,
        blue: Alliance,
        timestamp: DateTime<Utc>,
    },
}

impl QueueEvent {
    pub fn joined(team: TeamId) -> Self {
        QueueEvent::JoinedQueue {
            team,
            timestamp: Utc::now(),
        }
    }

    pub fn left(team: TeamId) -> Self {
        QueueEvent::LeftQueue {
            team,
            timestamp: Utc::now(),
        }
    }

    pub fn match_queued(candidate: &MatchCandidate) -> Self {
        QueueEvent::MatchQueued {
            red: candidate.red.clone(),
            blue: candidate.blue.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Client → server requests over the socket
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join { team: TeamId },
    Leave { team: TeamId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_event_wire_format() {
        let event = QueueEvent::joined(TeamId::from("254"));
        let value: Value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "joined_queue");
        assert_eq!(value["team"], "254");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_match_event_carries_alliances() {
        let candidate = MatchCandidate::new(
            ["a", "b", "c"].map(TeamId::from),
            ["d", "e", "f"].map(TeamId::from),
        );
        let value = serde_json::to_value(QueueEvent::match_queued(&candidate)).unwrap();

        assert_eq!(value["type"], "match_queued");
        assert_eq!(value["red"], json!(["a", "b", "c"]));
        assert_eq!(value["blue"], json!(["d", "e", "f"]));
    }

    #[test]
    fn test_parse_client_messages() {
        let join: ClientMessage = serde_json::from_str(r#"{"type":"join","team":"1678"}"#).unwrap();
        assert_eq!(join, ClientMessage::Join { team: TeamId::from("1678") });

        let leave: ClientMessage = serde_json::from_str(r#"{"type":"leave","team":"1678"}"#).unwrap();
        assert_eq!(leave, ClientMessage::Leave { team: TeamId::from("1678") });

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"dance","team":"1"}"#).is_err());
    }
}
