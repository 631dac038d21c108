//! Search input debouncing.
//!
//! The debouncer holds at most one pending query. Every keystroke supersedes the pending one
//! and restarts the delay. Time is passed in explicitly so hosts can drive it from their own
//! event loop and tests can drive it deterministically.

use std::time::{Duration, Instant};

/// Delay between the last keystroke and running the query.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(150);

/// One pending search query with a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl SearchDebouncer {
    /// Debouncer with a custom delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending query and restart the delay from `now`.
    pub fn push(&mut self, input: impl Into<String>, now: Instant) {
        self.pending = Some((input.into(), now + self.delay));
    }

    /// Take the pending query if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.pending.take().map(|(input, _)| input)
        } else {
            None
        }
    }

    /// Drop the pending query.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a query is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending query fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.push("text:a", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(149)), None);
        assert!(debouncer.is_pending());
        assert_eq!(
            debouncer.poll(start + DEFAULT_SEARCH_DELAY),
            Some("text:a".to_string())
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_push_supersedes() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.push("a", start);
        debouncer.push("ab", start + Duration::from_millis(80));

        assert_eq!(debouncer.poll(start + Duration::from_millis(120)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(180))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(180)),
            Some("ab".to_string())
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.push("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
