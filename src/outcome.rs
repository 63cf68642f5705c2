//! The result of one synchronization round.

/// Either every operation of a round completed in time, or the deadline passed.
///
/// A timed-out round carries no partial results.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T> {
    /// All operations completed before the deadline.
    Success(T),
    /// The deadline passed before all operations completed.
    TimedOut,
}

impl<T> Outcome<T> {
    /// Transforms the success payload, passing `TimedOut` through without
    /// calling `f`.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::TimedOut => Outcome::TimedOut,
        }
    }

    /// Chains a step that may itself time out.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::TimedOut => Outcome::TimedOut,
        }
    }

    /// Returns `true` for `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` for `TimedOut`.
    #[inline]
    pub const fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut)
    }

    /// Converts to an `Option`, discarding the timeout.
    #[inline]
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::TimedOut => None,
        }
    }

    /// Borrows the success payload.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::TimedOut => Outcome::TimedOut,
        }
    }

    /// Converts to a `Result` so the timeout can be propagated with `?`.
    ///
    /// # Errors
    /// Returns [`TimedOut`] if the round timed out.
    #[inline]
    pub fn into_result(self) -> Result<T, TimedOut> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::TimedOut => Err(TimedOut),
        }
    }

    /// Returns the payload, or computes one for a timed-out round.
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::TimedOut => f(),
        }
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.success()
    }
}

impl<T> From<Outcome<T>> for Result<T, TimedOut> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// The error form of [`Outcome::TimedOut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimedOut;

impl core::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("deadline exceeded before all operations completed")
    }
}

impl std::error::Error for TimedOut {}
