use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Elapsed-time ticker, active only while a batch recording is in progress.
///
/// Ticks are delivered over a channel so the orchestrator stays the only
/// writer of the elapsed counter. Stopping always cancels any pending tick.
#[derive(Debug, Default)]
pub struct DurationTimer {
    handle: Option<JoinHandle<()>>,
}

impl DurationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking at the given interval, replacing any previous ticker.
    pub fn start(&mut self, interval: Duration) -> mpsc::UnboundedReceiver<()> {
        self.stop();

        let (tx, rx) = mpsc::unbounded_channel();

        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if tx.send(()).is_err() {
                    // Receiver dropped; the session is over
                    break;
                }
            }
        }));

        debug!("Recording timer started ({}ms interval)", interval.as_millis());
        rx
    }

    /// Cancel the ticker. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Recording timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for DurationTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
