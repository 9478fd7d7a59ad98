//! Search debounce control
//!
//! Holds the latest raw search text until the user stops typing for the
//! configured window. Polled from the event loop tick; every push restarts
//! the window and replaces the pending value, so a burst of keystrokes
//! settles into a single emission of the final text.

use std::time::{Duration, Instant};

/// Default quiet period before a search term is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce controller for the search box
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<String>,
    last_input: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the default 500ms window
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE)
    }

    /// Create a debouncer with a custom window
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_input: None,
        }
    }

    /// Record a new raw value at `now`, restarting the window
    pub fn push(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(value.into());
        self.last_input = Some(now);
    }

    /// Return the pending value if the window has elapsed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_input?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.last_input = None;
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_debouncer_creation() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.is_pending());
        let t0 = Instant::now();
        debouncer.push("x", t0);
        assert!(debouncer.poll(t0 + ms(499)).is_none());
        assert_eq!(debouncer.poll(t0 + ms(500)).as_deref(), Some("x"));
    }

    #[test]
    fn test_nothing_pending() {
        let mut debouncer = Debouncer::new();
        assert!(debouncer.poll(Instant::now()).is_none());
    }

    #[test]
    fn test_not_ready_inside_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.push("dune", t0);

        assert!(debouncer.poll(t0 + ms(499)).is_none());
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_burst_emits_final_value_once() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();

        let mut emissions = Vec::new();
        let mut now = t0;
        for prefix in ["d", "du", "dun", "dune"] {
            debouncer.push(prefix, now);
            if let Some(v) = debouncer.poll(now + ms(100)) {
                emissions.push(v);
            }
            now += ms(120);
        }
        for step in 0..20 {
            if let Some(v) = debouncer.poll(now + ms(step * 100)) {
                emissions.push(v);
            }
        }

        assert_eq!(emissions, vec!["dune".to_string()]);
    }

    #[test]
    fn test_push_restarts_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.push("a", t0);
        debouncer.push("ab", t0 + ms(400));

        // 500ms after the first push but only 100ms after the second
        assert!(debouncer.poll(t0 + ms(500)).is_none());
        assert_eq!(debouncer.poll(t0 + ms(900)).as_deref(), Some("ab"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_custom_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::with_delay(ms(10));
        debouncer.push("x", t0);
        assert_eq!(debouncer.poll(t0 + ms(10)).as_deref(), Some("x"));
    }
}
