//! Fire-and-forget notifications emitted after writes.
//!
//! Listeners subscribe to a broadcast channel; a send with nobody listening is
//! silently dropped.

use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// `{table}.{action}`, e.g. `achievements.create`
    pub name: String,
    pub payload: serde_json::Value,
}

#[derive(Clone)]
pub struct Emitter {
    tx: broadcast::Sender<Event>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    pub fn emit<T: Serialize>(&self, name: &str, payload: &T) {
        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(event = name, error = %e, "failed to serialize event payload");
                return;
            }
        };

        // Err only means there are no receivers
        if self
            .tx
            .send(Event {
                name: name.to_string(),
                payload,
            })
            .is_err()
        {
            tracing::trace!(event = name, "event emitted without subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscribers_receive_events() {
        let emitter = Emitter::new();
        let mut rx = emitter.subscribe();

        emitter.emit("levels.create", &json!({ "id": 1 }));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "levels.create");
        assert_eq!(event.payload["id"], 1);
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        Emitter::new().emit("levels.delete", &json!({ "id": 2 }));
    }
}
