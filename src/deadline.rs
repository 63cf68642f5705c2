//! Absolute deadlines.
//!
//! A round measures every one of its waits against the same fixed point in time,
//! so the deadline is an [`Instant`], never a duration that restarts per wait.

use std::time::{Duration, Instant};

/// Timeout used when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A fixed point in time after which a round stops waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline at an explicit instant.
    #[inline]
    pub const fn at(at: Instant) -> Self {
        Self { at }
    }

    /// A deadline `timeout` from now.
    ///
    /// Saturates to the furthest representable instant for absurdly large
    /// timeouts instead of panicking.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| far_future(now));
        Self { at }
    }

    /// A deadline [`DEFAULT_TIMEOUT`] from now, computed fresh at every call.
    #[inline]
    pub fn from_now_default() -> Self {
        Self::after(DEFAULT_TIMEOUT)
    }

    /// A deadline that has already been reached.
    #[inline]
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }

    /// The instant this deadline falls on.
    #[inline]
    pub const fn instant(self) -> Instant {
        self.at
    }

    /// Time left until the deadline, zero once it has passed.
    #[inline]
    pub fn remaining(self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has been reached.
    #[inline]
    pub fn has_elapsed(self) -> bool {
        Instant::now() >= self.at
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::from_now_default()
    }
}

impl From<Instant> for Deadline {
    fn from(at: Instant) -> Self {
        Self::at(at)
    }
}

// Roughly thirty years out; well past any wait this crate performs and still
// inside the range every platform's `Instant` can represent.
fn far_future(now: Instant) -> Instant {
    const THIRTY_YEARS: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);
    now.checked_add(THIRTY_YEARS).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_after() {
        let before = Instant::now();
        let deadline = Deadline::after(Duration::from_millis(250));
        assert!(deadline.instant() >= before + Duration::from_millis(250));
        assert!(!deadline.has_elapsed());
        assert!(deadline.remaining() <= Duration::from_millis(250));
    }

    #[test]
    fn test_deadline_now_has_elapsed() {
        let deadline = Deadline::now();
        assert!(deadline.has_elapsed());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_default_deadline_is_fresh() {
        let first = Deadline::default();
        std::thread::sleep(Duration::from_millis(5));
        let second = Deadline::default();
        assert!(second > first);
        assert!(first.remaining() <= DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_deadline_saturates() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.has_elapsed());
    }
}
