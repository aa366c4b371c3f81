// CustView - app/debounce.rs
//
// Coalesces rapidly changing input: a value is released only after it has
// been left unchanged for the settle delay. The clock is passed in so the
// UI frame loop and the tests drive it the same way.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new value, restarting the settle timer.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value once it has settled. Each value is
    /// released at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = matches!(
            &self.pending,
            Some((_, changed_at)) if now.saturating_duration_since(*changed_at) >= self.delay
        );
        if settled {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value settles, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, changed_at)| self.delay.saturating_sub(now.saturating_duration_since(*changed_at)))
    }

    /// Drop any pending value without releasing it.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(250);

    #[test]
    fn test_value_released_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.update("a", t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(249)), None);
        assert_eq!(d.poll(t0 + DELAY), Some("a"));
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_rapid_updates_coalesce_to_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        for (i, text) in ["A", "Aa", "Aar", "Aara", "Aarav"].into_iter().enumerate() {
            d.update(text, t0 + Duration::from_millis(100 * i as u64));
            assert_eq!(d.poll(t0 + Duration::from_millis(100 * i as u64 + 50)), None);
        }
        // Last keystroke at 400 ms; settles at 650 ms.
        assert_eq!(d.poll(t0 + Duration::from_millis(640)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(650)), Some("Aarav"));
    }

    #[test]
    fn test_remaining_and_clear() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        assert_eq!(d.remaining(t0), None);
        d.update(1, t0);
        assert_eq!(d.remaining(t0 + Duration::from_millis(100)), Some(Duration::from_millis(150)));
        d.clear();
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + DELAY), None);
    }
}
