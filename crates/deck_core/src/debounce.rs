use std::time::{Duration, Instant};

/// Cancellable single-shot timer with last-write-wins semantics.
///
/// Every `schedule` replaces whatever was pending and restarts the delay, so
/// a burst of events yields at most one delivery per quiet period. The timer
/// is polled with an explicit `now`, which keeps it deterministic under test
/// and lets a poll loop sleep exactly until [`Debounce::deadline`].
#[derive(Debug)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet-period clock.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Yields the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
