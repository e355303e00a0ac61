//! Shared time budget for the resolution cascade

use std::future::Future;
use std::time::{Duration, Instant};

/// A fixed point in time the cascade must not run past
///
/// Checked between strategies and probe attempts; in-flight calls are
/// additionally bounded with [`Deadline::bound`] so a slow provider
/// cannot run the budget over.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    end: Instant,
}

impl Deadline {
    /// Create a deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            end: Instant::now() + budget,
        }
    }

    /// Whether the budget is exhausted
    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    /// Time left before the deadline, zero when expired
    pub fn remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }

    /// Run a future, aborting it when the deadline passes
    ///
    /// Returns `None` when the deadline cut the call short.
    pub async fn bound<F, T>(&self, future: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.remaining(), future).await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_deadline_not_expired() {
        let deadline = Deadline::after(Duration::from_secs(20));
        assert!(!deadline.expired());
        assert!(deadline.remaining() > Duration::from_secs(19));
    }

    #[test]
    fn test_tiny_deadline_expires() {
        let deadline = Deadline::after(Duration::from_nanos(1));
        std::thread::sleep(Duration::from_millis(1));
        assert!(deadline.expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_bound_aborts_slow_call() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let result = deadline
            .bound(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_bound_passes_fast_call() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let result = deadline.bound(async { 42 }).await;
        assert_eq!(result, Some(42));
    }
}
