use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::presentation::events::UiEvent;
use crate::presentation::timers::TaskSlot;

/// How long the "Copied!" confirmation stays on a negotiation script.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// Which negotiation script was just copied.
///
/// Every click bumps `generation` and restarts the revert timer. An expiry
/// only clears the indicator if it carries the current generation, so a timer
/// from an earlier click can never clear a newer one early.
#[derive(Debug, Default)]
pub struct CopyIndicator {
    copied_id: Option<String>,
    generation: u64,
    timer: TaskSlot,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied_id(&self) -> Option<&str> {
        self.copied_id.as_deref()
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.copied_id.as_deref() == Some(id)
    }

    /// Marks `id` as copied and (re)starts the revert timer.
    pub fn mark(&mut self, id: impl Into<String>, delay: Duration, tx: UnboundedSender<UiEvent>) {
        self.generation += 1;
        self.copied_id = Some(id.into());
        debug!(generation = self.generation, "copy indicator set");
        self.timer
            .schedule(delay, tx, UiEvent::CopyExpired { generation: self.generation });
    }

    /// Applies a timer expiry. Returns whether the indicator was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.timer.clear();
        self.copied_id.take().is_some()
    }

    /// Drops the indicator and its pending timer.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.copied_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_reverts_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut indicator = CopyIndicator::new();
        indicator.mark("np1", COPY_FEEDBACK_DELAY, tx);
        assert!(indicator.is_copied("np1"));

        let start = tokio::time::Instant::now();
        let UiEvent::CopyExpired { generation } = rx.recv().await.unwrap() else {
            panic!("unexpected event");
        };
        assert!(start.elapsed() >= COPY_FEEDBACK_DELAY);
        assert!(indicator.expire(generation));
        assert_eq!(indicator.copied_id(), None);
    }

    #[test]
    fn test_stale_generation_does_not_clear_newer_click() {
        let mut indicator = CopyIndicator {
            copied_id: Some("np2".to_string()),
            generation: 2,
            timer: TaskSlot::new(),
        };
        assert!(!indicator.expire(1));
        assert!(indicator.is_copied("np2"));
        assert!(indicator.expire(2));
        assert!(!indicator.is_copied("np2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_click_restarts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut indicator = CopyIndicator::new();

        indicator.mark("np1", COPY_FEEDBACK_DELAY, tx.clone());
        tokio::time::sleep(Duration::from_millis(1500)).await;
        indicator.mark("np2", COPY_FEEDBACK_DELAY, tx);

        // The first timer would have fired at 2000 ms; nothing arrives then.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        assert!(indicator.is_copied("np2"));

        let UiEvent::CopyExpired { generation } = rx.recv().await.unwrap() else {
            panic!("unexpected event");
        };
        assert_eq!(generation, 2);
        assert!(indicator.expire(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut indicator = CopyIndicator::new();
        indicator.mark("np1", COPY_FEEDBACK_DELAY, tx);
        indicator.cancel();
        assert_eq!(indicator.copied_id(), None);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
