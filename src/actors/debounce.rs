use ractor::{ActorRef, Message};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::error;

/// A single restartable timer. Scheduling aborts whatever was pending, so only
/// the most recent call ever fires.
#[derive(Debug, Default)]
pub struct DebounceGate {
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the timer. When it elapses, `build(generation)` is sent to `target`.
    pub fn schedule<M, F>(&mut self, target: &ActorRef<M>, delay: Duration, build: F) -> u64
    where
        M: Message,
        F: FnOnce(u64) -> M + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        let target = target.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = target.send_message(build(generation)) {
                error!("Failed to deliver debounce tick: {}", e);
            }
        }));

        generation
    }

    /// Drops any pending tick, including one already sitting in the mailbox.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    /// True when a tick carrying `generation` should still be acted upon.
    pub fn is_current(&self, generation: u64) -> bool {
        self.pending.is_some() && generation == self.generation
    }

    /// Marks the current tick as consumed.
    pub fn fired(&mut self) {
        self.pending = None;
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
