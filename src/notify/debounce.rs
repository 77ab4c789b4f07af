//! Trailing-edge debounce over a change stream.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::ChangeEvent;

/// Coalesces rapid changes to a single field into one callback invocation.
///
/// Every matching event arms (or re-arms) a deadline one quiet period in the
/// future; the callback runs only when the deadline elapses with no newer
/// event, so at most one invocation is pending at a time. The task ends when
/// the change stream closes; a deadline still pending at that point is
/// dropped, not fired.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    quiet: Duration,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Spawn the debounce task, watching `rx` for events on `path`.
    pub fn spawn<F>(
        &self,
        mut rx: broadcast::Receiver<ChangeEvent>,
        path: String,
        mut on_quiet: F,
    ) -> JoinHandle<()>
    where
        F: FnMut() + Send + 'static,
    {
        let quiet = self.quiet;
        tokio::spawn(async move {
            let mut deadline: Option<Instant> = None;
            loop {
                tokio::select! {
                    event = rx.recv() => match event {
                        Ok(ev) if ev.path == path => {
                            deadline = Some(Instant::now() + quiet);
                        }
                        Ok(_) => {}
                        // A lagged receiver lost events; one of them may have
                        // been ours, so re-arm as if a change just happened.
                        Err(broadcast::error::RecvError::Lagged(_)) => {
                            deadline = Some(Instant::now() + quiet);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        deadline = None;
                        on_quiet();
                    }
                }
            }
        })
    }
}
