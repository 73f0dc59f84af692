//! Polling idle monitor.
//!
//! Started on login and stopped on logout. Each tick asks the session
//! manager whether the session has been idle past the threshold and, the
//! first time it has, sends a [`SessionNotice::IdleExpired`] and exits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::manager::SessionManager;
use super::notice::SessionNotice;

/// Handle to a running idle-poll task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct IdleMonitor {
    /// Cancellation signal.
    cancel: watch::Sender<bool>,
    /// The polling task.
    handle: Option<JoinHandle<()>>,
}

impl IdleMonitor {
    /// Spawns the poll loop on the current Tokio runtime.
    pub fn start(
        sessions: Arc<SessionManager>,
        interval: Duration,
        notices: mpsc::Sender<SessionNotice>,
    ) -> Self {
        let (cancel, cancelled) = watch::channel(false);
        let handle = tokio::spawn(poll(sessions, interval, notices, cancelled));
        debug!(interval_ms = interval.as_millis() as u64, "Idle monitor started");

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Whether the poll task is still running.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the poll task and waits for it to exit.
    pub async fn stop(mut self) {
        let _ = self.cancel.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        debug!("Idle monitor stopped");
    }
}

impl Drop for IdleMonitor {
    fn drop(&mut self) {
        let _ = self.cancel.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll(
    sessions: Arc<SessionManager>,
    interval: Duration,
    notices: mpsc::Sender<SessionNotice>,
    mut cancelled: watch::Receiver<bool>,
) {
    let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = cancelled.changed() => {
                if changed.is_err() || *cancelled.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let Some(notice) = sessions.idle_notice(sessions.now()).await else {
                    continue;
                };
                debug!("Idle threshold exceeded, notifying presentation layer");
                let _ = notices.send(notice).await;
                break;
            }
        }
    }
}
