//! Change journal.
//!
//! Coalesces bursts of store changes into one summary. A summary is flushed
//! once no further change has arrived for the debounce window, and once more
//! when the event bus closes.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{timeout_at, Instant};
use tracing::warn;

use crate::events::Event;

/// One flushed batch of changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Summary of the most recent change in the batch.
    pub latest: String,
    /// Number of changes coalesced into this entry.
    pub changes: u64,
}

struct Pending {
    entry: JournalEntry,
    deadline: Instant,
}

/// Consume `events` until the bus closes, handing each batch to `on_flush`.
pub async fn run(
    mut events: broadcast::Receiver<Event>,
    window: Duration,
    mut on_flush: impl FnMut(JournalEntry) + Send + 'static,
) {
    let mut pending: Option<Pending> = None;

    loop {
        let received = match pending.as_ref().map(|batch| batch.deadline) {
            None => events.recv().await,
            Some(deadline) => match timeout_at(deadline, events.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    if let Some(batch) = pending.take() {
                        on_flush(batch.entry);
                    }
                    continue;
                }
            },
        };

        match received {
            Ok(event) if event.kind.is_change() => {
                let deadline = Instant::now() + window;
                match pending.as_mut() {
                    Some(batch) => {
                        batch.entry.latest = event.summary;
                        batch.entry.changes += 1;
                        batch.deadline = deadline;
                    }
                    None => {
                        pending = Some(Pending {
                            entry: JournalEntry {
                                latest: event.summary,
                                changes: 1,
                            },
                            deadline,
                        });
                    }
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Change journal fell behind the event bus");
                if let Some(batch) = pending.as_mut() {
                    batch.entry.changes += skipped;
                }
            }
            Err(RecvError::Closed) => {
                if let Some(batch) = pending.take() {
                    on_flush(batch.entry);
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventBus, EventKind};
    use tokio::sync::mpsc;

    fn change(summary: &str) -> Event {
        Event {
            kind: EventKind::TokenCreated,
            timestamp: 0,
            summary: summary.to_string(),
            payload: serde_json::Value::Null,
        }
    }

    fn spawn_journal(
        bus: &EventBus,
        window: Duration,
    ) -> (
        tokio::task::JoinHandle<()>,
        mpsc::UnboundedReceiver<JournalEntry>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(bus.subscribe(), window, move |entry| {
            let _ = tx.send(entry);
        }));
        (handle, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_is_coalesced_after_quiet_window() {
        let bus = EventBus::new(16);
        let (_handle, mut flushed) = spawn_journal(&bus, Duration::from_secs(30));

        bus.emit(change("Created new token: A (AAA)"));
        tokio::time::sleep(Duration::from_secs(10)).await;
        bus.emit(change("Created new presale: A"));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(flushed.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(25)).await;
        let entry = flushed.try_recv().expect("flushed entry");
        assert_eq!(
            entry,
            JournalEntry {
                latest: "Created new presale: A".to_string(),
                changes: 2,
            }
        );
        assert!(flushed.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_startup_event_is_not_a_change() {
        let bus = EventBus::new(16);
        let (_handle, mut flushed) = spawn_journal(&bus, Duration::from_secs(30));

        bus.emit(Event::daemon_started("127.0.0.1:0"));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(flushed.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_changes_flushed_on_close() {
        let bus = EventBus::new(16);
        let (handle, mut flushed) = spawn_journal(&bus, Duration::from_secs(30));

        bus.emit(change("Updated token: A"));
        drop(bus);
        handle.await.expect("journal task");

        let entry = flushed.try_recv().expect("flushed entry");
        assert_eq!(entry.changes, 1);
        assert_eq!(entry.latest, "Updated token: A");
    }
}
