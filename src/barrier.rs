//! The fan-in barrier.
//!
//! A round starts every launcher, then blocks the calling thread until each one
//! has completed or the round's absolute deadline passes:
//!
//! ```text
//! launch 1..N ──► acquire permit 1 ──► ... ──► acquire permit N ──► drain queue
//!                       │ deadline                  │ deadline
//!                       └──────────► TimedOut ◄─────┘
//! ```
//!
//! Completions are appended to a lock-free queue and counted by a wait gate.
//! Both are private to the round; the caller only ever sees the [`Outcome`].

use crate::concurrency::{CompletionQueue, WaitGate};
use crate::config::SyncConfig;
use crate::deadline::{Deadline, DEFAULT_TIMEOUT};
use crate::launcher::{Completion, Launcher};
use crate::outcome::Outcome;
use std::iter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// State shared between the waiting thread and the completion sinks of one round.
pub(crate) struct Round<T> {
    queue: CompletionQueue<T>,
    gate: WaitGate,
    abandoned: AtomicBool,
    log_late: bool,
}

impl<T> Round<T> {
    pub(crate) fn deliver(&self, value: T) {
        if self.is_abandoned() {
            if self.log_late {
                tracing::trace!("late completion discarded after round timed out");
            }
            return;
        }
        self.queue.push(value);
        self.gate.release();
    }

    pub(crate) fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::Acquire)
    }

    fn abandon(&self) {
        self.abandoned.store(true, Ordering::Release);
    }
}

/// Starts every launcher and waits until all of them have completed or
/// `deadline` passes.
///
/// Launchers are invoked one after another on the calling thread before any
/// waiting begins. The successful payload holds one value per launcher, in the
/// order the completions arrived, which need not match the launcher order.
///
/// An empty set of launchers succeeds immediately with an empty vector, even if
/// the deadline has already passed. Completions that have already arrived are
/// accepted even at a past deadline; only a wait that would have to block beyond
/// it times out.
pub fn await_all<T, I, L>(launchers: I, deadline: Deadline) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = L>,
    L: Launcher<T>,
{
    run_round(launchers, deadline, true)
}

/// Runs a single launcher against `deadline`.
///
/// Equivalent to [`await_all`] over one launcher, taking the single value.
pub fn await_one<T, L>(launcher: L, deadline: Deadline) -> Outcome<T>
where
    L: Launcher<T>,
{
    await_all(iter::once(launcher), deadline).map(take_single)
}

/// [`await_all`] with a deadline [`DEFAULT_TIMEOUT`] from now.
pub fn await_all_default<T, I, L>(launchers: I) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = L>,
    L: Launcher<T>,
{
    await_all(launchers, Deadline::from_now_default())
}

/// [`await_one`] with a deadline [`DEFAULT_TIMEOUT`] from now.
pub fn await_one_default<T, L>(launcher: L) -> Outcome<T>
where
    L: Launcher<T>,
{
    await_one(launcher, Deadline::from_now_default())
}

fn take_single<T>(values: Vec<T>) -> T {
    values
        .into_iter()
        .next()
        .expect("a successful round yields one value per launcher")
}

fn run_round<T, I, L>(launchers: I, deadline: Deadline, log_late: bool) -> Outcome<Vec<T>>
where
    I: IntoIterator<Item = L>,
    L: Launcher<T>,
{
    let mut launchers = launchers.into_iter().peekable();
    if launchers.peek().is_none() {
        return Outcome::Success(Vec::new());
    }

    let (gate, parker) = WaitGate::with_parker();
    let round = Arc::new(Round {
        queue: CompletionQueue::new(),
        gate,
        abandoned: AtomicBool::new(false),
        log_late,
    });

    let mut expected = 0usize;
    for launcher in launchers {
        launcher.launch(Completion::new(round.clone()));
        expected += 1;
    }

    let started = Instant::now();
    tracing::debug!(
        launchers = expected,
        remaining = ?deadline.remaining(),
        "fan-in round started"
    );

    for received in 0..expected {
        if !round.gate.acquire_until(&parker, deadline.instant()) {
            round.abandon();
            tracing::debug!(received, expected, "fan-in round timed out");
            return Outcome::TimedOut;
        }
    }

    // Every permit was released after its value was linked into the queue, so
    // all `expected` values are reachable now.
    // Safety: this thread is the round's only consumer.
    let values: Vec<T> = iter::from_fn(|| unsafe { round.queue.pop_spin() })
        .take(expected)
        .collect();
    debug_assert_eq!(values.len(), expected);

    tracing::debug!(
        launchers = expected,
        elapsed = ?started.elapsed(),
        "fan-in round completed"
    );
    Outcome::Success(values)
}

/// A barrier with a preset timeout.
///
/// Every call computes a fresh deadline, so one `FanIn` can be reused across
/// any number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanIn {
    timeout: Duration,
    log_late_completions: bool,
}

impl FanIn {
    /// A barrier using [`DEFAULT_TIMEOUT`].
    pub const fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// A barrier using `timeout` for every round.
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            log_late_completions: true,
        }
    }

    /// A barrier configured from a [`SyncConfig`].
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            timeout: config.default_timeout(),
            log_late_completions: config.log_late_completions,
        }
    }

    /// The per-round timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The deadline a round started now would use.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.timeout)
    }

    /// Runs a round over `launchers` with a fresh deadline.
    pub fn run_all<T, I, L>(&self, launchers: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = L>,
        L: Launcher<T>,
    {
        self.run_all_until(launchers, self.deadline())
    }

    /// Runs a round over `launchers` with an explicit deadline.
    pub fn run_all_until<T, I, L>(&self, launchers: I, deadline: Deadline) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = L>,
        L: Launcher<T>,
    {
        run_round(launchers, deadline, self.log_late_completions)
    }

    /// Runs a single launcher with a fresh deadline.
    pub fn run_one<T, L>(&self, launcher: L) -> Outcome<T>
    where
        L: Launcher<T>,
    {
        self.run_all(iter::once(launcher)).map(take_single)
    }
}

impl Default for FanIn {
    fn default() -> Self {
        Self::new()
    }
}
