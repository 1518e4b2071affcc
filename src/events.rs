use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::db::models::{MaintenanceReport, Notification};

/// Events published on the live feed: every dispatched notification and
/// every report mutation. Dashboard clients subscribe over the WebSocket
/// route and receive these as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    Notification { notification: Notification },
    ReportChanged { report: MaintenanceReport },
    ReportDeleted { report_id: String },
}

/// Broadcast bus backing the event feed. Publishing is best-effort: with
/// no subscriber connected the event is dropped, never queued or retried,
/// and the write that produced it is unaffected.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<String>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: &Event) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(err) => {
                debug!("failed to serialize event: {err}");
                return;
            }
        };
        if self.tx.send(payload).is_err() {
            debug!("no event subscribers connected, dropping event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}
