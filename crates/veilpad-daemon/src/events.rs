//! Event emission system.
//!
//! Store mutations are announced on a broadcast channel. Subscribers (the
//! change journal, tests) each get an independent buffer of 1000 events;
//! a subscriber that falls behind skips the oldest events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use veilpad_types::{Participant, Presale, Token};

/// Default per-subscriber buffer.
pub const EVENT_BUFFER: usize = 1000;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    TokenCreated,
    TokenUpdated,
    TokenDeployed,
    PresaleCreated,
    PresaleUpdated,
    ParticipationRecorded,
    DaemonStarted,
}

impl EventKind {
    /// Whether the event reflects a change to stored data.
    pub fn is_change(self) -> bool {
        !matches!(self, EventKind::DaemonStarted)
    }
}

/// An event emitted by the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Unix timestamp.
    pub timestamp: u64,
    /// One-line human readable description.
    pub summary: String,
    /// The affected record.
    pub payload: serde_json::Value,
}

impl Event {
    fn new(kind: EventKind, summary: String, payload: serde_json::Value) -> Self {
        Self {
            kind,
            timestamp: unix_now(),
            summary,
            payload,
        }
    }

    fn record(kind: EventKind, summary: String, record: &impl Serialize) -> Self {
        let payload = serde_json::to_value(record).unwrap_or(serde_json::Value::Null);
        Self::new(kind, summary, payload)
    }

    pub fn token_created(token: &Token) -> Self {
        Self::record(
            EventKind::TokenCreated,
            format!("Created new token: {} ({})", token.name, token.symbol),
            token,
        )
    }

    pub fn token_updated(token: &Token) -> Self {
        Self::record(
            EventKind::TokenUpdated,
            format!("Updated token: {}", token.name),
            token,
        )
    }

    pub fn token_deployed(token: &Token) -> Self {
        Self::record(
            EventKind::TokenDeployed,
            format!("Deployed token: {} ({})", token.name, token.symbol),
            token,
        )
    }

    pub fn presale_created(presale: &Presale) -> Self {
        Self::record(
            EventKind::PresaleCreated,
            format!("Created new presale: {}", presale.token_name),
            presale,
        )
    }

    pub fn presale_updated(presale: &Presale) -> Self {
        Self::record(
            EventKind::PresaleUpdated,
            format!("Updated presale: {}", presale.token_name),
            presale,
        )
    }

    pub fn participation_recorded(participant: &Participant) -> Self {
        Self::record(
            EventKind::ParticipationRecorded,
            format!("New participation in presale {}", participant.presale_id),
            participant,
        )
    }

    pub fn daemon_started(listen_addr: &str) -> Self {
        Self::new(
            EventKind::DaemonStarted,
            format!("Daemon listening on {listen_addr}"),
            serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "listen_addr": listen_addr,
            }),
        )
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Event bus for broadcasting events to subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
    sequence: Arc<AtomicU64>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: Event) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(kind = ?event.kind, "{}", event.summary);
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Number of events emitted so far.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_BUFFER)
    }
}
