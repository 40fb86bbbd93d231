use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::presentation::events::UiEvent;

/// Owns at most one background task. Replacing, cancelling or dropping the
/// slot aborts whatever was running in it.
#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task`, aborting the previous occupant.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(task));
    }

    /// Posts `event` after `delay`, superseding any earlier schedule.
    pub fn schedule(&mut self, delay: Duration, tx: UnboundedSender<UiEvent>, event: UiEvent) {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the view was torn down.
            let _ = tx.send(event);
        });
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Forgets a task that has completed on its own.
    pub fn clear(&mut self) {
        self.handle = None;
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
