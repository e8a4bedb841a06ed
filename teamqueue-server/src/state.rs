//! Server state management
//!
//! One queue per event, guarded by a single lock so every operation
//! (including a whole match selection) runs without interleaving.

use std::sync::{Mutex, MutexGuard, PoisonError};
use teamqueue_core::{MatchCandidate, TeamId, TeamQueue};
use tokio::sync::broadcast;

use crate::events::QueueEvent;

const EVENT_CAPACITY: usize = 256;

/// Server-wide shared state
pub struct ServerState {
    queue: Mutex<TeamQueue>,
    events: broadcast::Sender<QueueEvent>,
}

impl ServerState {
    pub fn new(queue: TeamQueue) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            queue: Mutex::new(queue),
            events,
        }
    }

    /// Exclusive access to the queue for the lifetime of the guard
    pub fn queue(&self) -> MutexGuard<'_, TeamQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    pub fn publish(&self, event: QueueEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("No observers connected");
        }
    }

    /// Queue a team and notify observers. False if it was already waiting.
    pub fn join(&self, team: TeamId) -> bool {
        let added = self.queue().queue_team(team.clone());
        if !added {
            tracing::warn!("Team {} attempted to join while already queued", team);
            return false;
        }

        tracing::info!("Team {} joined", team);
        self.publish(QueueEvent::joined(team));
        true
    }

    /// Remove a team and notify observers. False if it was not waiting.
    pub fn leave(&self, team: TeamId) -> bool {
        let removed = self.queue().remove_team(&team);
        if !removed {
            tracing::warn!("Team {} attempted to leave without being queued", team);
            return false;
        }

        tracing::info!("Team {} left", team);
        self.publish(QueueEvent::left(team));
        true
    }

    /// Draw the next match and notify observers
    pub fn next_match(&self) -> Option<MatchCandidate> {
        let candidate = self.queue().new_match()?;

        tracing::info!("New match queued");
        tracing::info!("Red: {:?}", candidate.red);
        tracing::info!("Blue: {:?}", candidate.blue);
        self.publish(QueueEvent::match_queued(&candidate));

        Some(candidate)
    }
}
