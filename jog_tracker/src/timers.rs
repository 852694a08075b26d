use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::SharedStore;
use crate::sensors::NotificationSink;

/// The two repeating tasks bound to an active session: the 1-second
/// duration tick and the hydration countdown poll. Both are cancelled
/// exactly once, either on `stop()` or on drop, whichever comes first.
pub struct SessionTimers {
    tick: Option<JoinHandle<()>>,
    countdown: Option<JoinHandle<()>>,
}

impl SessionTimers {
    pub fn new() -> Self {
        Self {
            tick: None,
            countdown: None,
        }
    }

    /// Spawns both tasks. Safe to call on re-entry into an active
    /// session: any previously running tasks are aborted first, so
    /// timers never double-register.
    pub fn start(&mut self, store: SharedStore, sink: Arc<dyn NotificationSink>) {
        self.stop();

        let tick_store = store.clone();
        self.tick = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                tick_store.lock().await.tick(Utc::now());
            }
        }));

        self.countdown = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                let due = store.lock().await.poll_hydration_due(Utc::now());
                if due {
                    tracing::info!("Hydration reminder due");
                    sink.hydration_due();
                }
            }
        }));
    }

    /// Aborts both tasks. Idempotent; later calls find nothing to cancel.
    pub fn stop(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.abort();
        }
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }
}

impl Default for SessionTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionTimers {
    // Teardown backstop so an owning context going away cannot leave
    // orphaned tasks mutating the store after logical session end.
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Mutex;

    use super::*;
    use crate::store::JogStore;

    struct CountingSink {
        fired: AtomicUsize,
    }

    impl NotificationSink for CountingSink {
        fn hydration_due(&self) {
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn shared_store() -> SharedStore {
        Arc::new(Mutex::new(JogStore::new()))
    }

    #[tokio::test]
    async fn start_is_idempotent_and_stop_cancels() {
        let store = shared_store();
        let sink = Arc::new(CountingSink { fired: AtomicUsize::new(0) });

        let mut timers = SessionTimers::new();
        assert!(!timers.is_running());

        timers.start(store.clone(), sink.clone());
        timers.start(store.clone(), sink.clone());
        assert!(timers.is_running());

        timers.stop();
        assert!(!timers.is_running());
        // A second stop has nothing left to cancel.
        timers.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn due_edge_reaches_sink_once() {
        let store = shared_store();
        let sink = Arc::new(CountingSink { fired: AtomicUsize::new(0) });

        {
            // Deadline already in the past relative to the wall clock.
            let mut guard = store.lock().await;
            guard.set_hydration_interval(10);
            guard.start_session(Utc::now() - chrono::Duration::minutes(30));
        }

        let mut timers = SessionTimers::new();
        timers.start(store.clone(), sink.clone());

        // Several countdown polls elapse; the edge must be forwarded once.
        for _ in 0..4 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }

        timers.stop();
        assert_eq!(sink.fired.load(Ordering::SeqCst), 1);
    }
}
