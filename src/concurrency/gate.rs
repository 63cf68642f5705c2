//! Counting wait gate with absolute-deadline acquisition.
//!
//! Any number of threads may [`release`](WaitGate::release) permits; exactly one
//! thread, the owner of the paired [`Parker`], takes them back out with
//! [`acquire_until`](WaitGate::acquire_until).

use crossbeam_utils::sync::{Parker, Unparker};
use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A semaphore specialised for one waiter and many signallers.
pub struct WaitGate {
    permits: CachePadded<AtomicUsize>,
    unparker: Unparker,
}

impl WaitGate {
    /// Creates a gate with zero permits, returning the parker the waiting thread
    /// must hand to [`acquire_until`](Self::acquire_until).
    pub fn with_parker() -> (Self, Parker) {
        let parker = Parker::new();
        let gate = Self {
            permits: CachePadded::new(AtomicUsize::new(0)),
            unparker: parker.unparker().clone(),
        };
        (gate, parker)
    }

    /// Adds one permit and wakes the waiter.
    #[inline]
    pub fn release(&self) {
        self.permits.fetch_add(1, Ordering::Release);
        self.unparker.unpark();
    }

    /// Permits currently available.
    #[inline]
    pub fn available(&self) -> usize {
        self.permits.load(Ordering::Acquire)
    }

    /// Takes one permit without blocking.
    pub fn try_acquire(&self) -> bool {
        let mut current = self.permits.load(Ordering::Acquire);
        while current > 0 {
            match self.permits.compare_exchange_weak(
                current,
                current - 1,
                Ordering::Acquire,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
        false
    }

    /// Takes one permit, blocking until one is released or `deadline` passes.
    ///
    /// Returns `false` on timeout. A permit that is already available is taken
    /// even when the deadline is in the past.
    ///
    /// `parker` must be the one returned alongside this gate by [`WaitGate::with_parker`];
    /// otherwise a release may wake the wrong thread and the wait runs to the
    /// deadline.
    pub fn acquire_until(&self, parker: &Parker, deadline: Instant) -> bool {
        loop {
            if self.try_acquire() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            // An unpark issued between `try_acquire` and here leaves the parker's
            // token set, so this returns immediately instead of missing it.
            parker.park_deadline(deadline);
        }
    }
}
