use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Slot owning at most one pending timed task.
///
/// Scheduling aborts whatever was pending before, and dropping the slot aborts
/// the pending task. Callers pair this with a ticket check on fire so a task
/// that already woke up before the abort cannot act on newer state.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` once after `delay`.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }

    /// Runs an arbitrary future in the slot, e.g. a repeating countdown.
    pub fn spawn<Fut>(&mut self, future: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(future));
    }

    /// Aborts the pending task. Returns whether one was still outstanding.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let outstanding = !handle.is_finished();
                handle.abort();
                outstanding
            }
            None => false,
        }
    }

    /// Forgets the pending handle without aborting it.
    ///
    /// Used by a task that is scheduling its successor from inside its own body.
    pub fn release(&mut self) {
        self.handle.take();
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
