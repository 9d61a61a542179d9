///! Quiet-period debouncer for query edits
///!
///! Every edit restarts the timer; only a value that stayed unchanged for the
///! whole quiet period is forwarded. Values equal to the last forwarded one are
///! swallowed, so bouncing back to the settled query triggers nothing.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub quiet_period: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(500),
        }
    }
}

impl From<&SessionConfig> for DebounceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            quiet_period: config.quiet_period(),
        }
    }
}

/// Input side of a running debouncer. Dropping it cancels any pending timer.
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Start debouncing. `baseline` counts as already emitted; settled values
    /// are sent to `output`.
    pub fn spawn(
        config: DebounceConfig,
        baseline: String,
        output: mpsc::UnboundedSender<String>,
    ) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(config.quiet_period, baseline, rx, output));
        Self { input, task }
    }

    /// Feed a new input value. Returns false once the debouncer has stopped.
    pub fn push(&self, value: impl Into<String>) -> bool {
        self.input.send(value.into()).is_ok()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    quiet_period: Duration,
    mut last_emitted: String,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
) {
    while let Some(mut pending) = input.recv().await {
        // Restart the quiet period on every edit
        loop {
            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => pending = value,
                    None => return,
                },
                _ = tokio::time::sleep(quiet_period) => break,
            }
        }

        if pending == last_emitted {
            tracing::trace!("Settled on unchanged query {:?}", pending);
            continue;
        }

        tracing::debug!("Query settled: {:?}", pending);
        if output.send(pending.clone()).is_err() {
            return;
        }
        last_emitted = pending;
    }
}
