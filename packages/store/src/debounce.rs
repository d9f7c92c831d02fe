//! Cancellable fire-once task scheduling.
//!
//! Replaces the ambient UI timer the search box would otherwise own: a
//! [`Debouncer`] holds at most one armed task, and scheduling a new one
//! cancels (never queues) its predecessor.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay between the last keystroke and the search fetch it triggers.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A single-slot scheduler: schedule, cancel-if-pending, fire once.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates an empty debouncer.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Arms `task` to run after `delay`, cancelling any previously armed
    /// task that has not yet fired.
    ///
    /// At most one task is in flight per debouncer at any time.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancels the armed task, if one is still pending.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a task is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn fires_exactly_once_after_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        let counter = Arc::clone(&fired);
        debouncer.schedule(Duration::from_millis(10), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn superseded_task_never_fires() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        let counter = Arc::clone(&first);
        debouncer.schedule(Duration::from_millis(30), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // A newer keystroke arrives before the first timer fires.
        let counter = Arc::clone(&second);
        debouncer.schedule(Duration::from_millis(10), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        let counter = Arc::clone(&fired);
        debouncer.schedule(Duration::from_millis(10), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }
}
