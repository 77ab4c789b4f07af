//! Change notification: a broadcast stream of field changes plus a
//! trailing-edge debouncer for derived side effects.

mod debounce;

pub use debounce::Debouncer;

use tokio::sync::broadcast;

use crate::form::Value;

/// Emitted after a leaf value changes, carrying the dotted path of the field
/// and its new value.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: String,
    pub value: Value,
}

/// Fan-out point for change events. Sending never blocks; events are dropped
/// when nobody is subscribed, and slow subscribers may observe lag, which the
/// debouncer treats the same as a fresh change.
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, path: &str, value: &Value) {
        let _ = self.tx.send(ChangeEvent {
            path: path.to_string(),
            value: value.clone(),
        });
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}
