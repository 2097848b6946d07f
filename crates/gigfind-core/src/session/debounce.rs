use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Cancellable one-shot timer that drives a busy flag.
///
/// `schedule` raises the flag and arms the timer, replacing any pending one;
/// the flag drops when the most recently armed timer fires. The timer never
/// runs caller work, it only flips the flag.
pub struct DebounceTimer {
    window: Duration,
    runtime: Handle,
    busy: Arc<watch::Sender<bool>>,
    armed: Arc<AtomicU64>,
    pending: Option<AbortHandle>,
}

impl DebounceTimer {
    pub fn new(window: Duration, runtime: Handle) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            window,
            runtime,
            busy: Arc::new(busy),
            armed: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn schedule(&mut self) {
        self.abort_pending();

        // Arming and raising happen under the channel lock so a timer that
        // is already firing cannot lower the flag for this newer arming.
        let mut generation = 0;
        self.busy.send_modify(|busy| {
            generation = self.armed.fetch_add(1, Ordering::SeqCst) + 1;
            *busy = true;
        });

        let busy = self.busy.clone();
        let armed = self.armed.clone();
        let window = self.window;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            let lowered = busy.send_if_modified(|flag| {
                if armed.load(Ordering::SeqCst) == generation && *flag {
                    *flag = false;
                    true
                } else {
                    false
                }
            });
            if lowered {
                tracing::trace!(generation, "debounce window elapsed");
            }
        });
        self.pending = Some(task.abort_handle());
    }

    /// Disarms any pending timer and lowers the flag immediately.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.busy.send_modify(|busy| {
            self.armed.fetch_add(1, Ordering::SeqCst);
            *busy = false;
        });
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Resolves once the flag is down. Returns immediately when idle.
    pub async fn wait_until_idle(&self) {
        let mut receiver = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while borrowed.
        let _ = receiver.wait_for(|busy| !*busy).await;
    }

    fn abort_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
