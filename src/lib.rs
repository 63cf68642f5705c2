//! # `fanin` - Bounded-Time Fan-In Synchronization
//!
//! Start N independent operations that each report exactly one result through a
//! completion callback, then block until all N have reported or an absolute
//! deadline passes.
//!
//! ## Guarantees
//!
//! - **All or nothing**: a round yields every result, or [`Outcome::TimedOut`]
//!   with no partial results.
//! - **Arrival order**: results are returned in the order completions arrived,
//!   which need not match launcher order.
//! - **No drift**: every wait in a round is measured against the same
//!   [`Deadline`], fixed when the caller creates it.
//! - **Exactly once**: [`Completion::complete`] consumes the sink, so a launcher
//!   cannot report twice.
//! - **No cancellation**: on timeout the round stops waiting. Launchers keep
//!   running; anything they report afterwards is discarded.
//!
//! ## Architecture
//!
//! 1. **Launch**: every [`Launcher`] is invoked on the calling thread, in order,
//!    before any waiting starts.
//! 2. **Accumulate**: completions from any thread are appended to a lock-free
//!    multi-producer queue ([`concurrency::CompletionQueue`]) and counted by a
//!    wait gate ([`concurrency::WaitGate`]).
//! 3. **Wait**: the calling thread takes one permit per launcher, each bounded
//!    by the round's deadline, then drains the queue.
//!
//! The [`response`] module holds the pure validation chain used to turn a raw
//! HTTP callback payload into text or JSON.
//!
//! ## Example
//!
//! ```rust
//! use fanin::{await_all, boxed, Deadline, Outcome};
//! use std::thread;
//! use std::time::Duration;
//!
//! let launchers = (1..=3u64)
//!     .map(|i| {
//!         boxed(move |done| {
//!             thread::spawn(move || {
//!                 thread::sleep(Duration::from_millis(i));
//!                 done.complete(i);
//!             });
//!         })
//!     })
//!     .collect::<Vec<_>>();
//!
//! match await_all(launchers, Deadline::after(Duration::from_secs(1))) {
//!     Outcome::Success(mut values) => {
//!         values.sort_unstable();
//!         assert_eq!(values, vec![1, 2, 3]);
//!     }
//!     Outcome::TimedOut => unreachable!("three short sleeps fit in a second"),
//! }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod barrier;
pub mod concurrency;
pub mod config;
pub mod deadline;
pub mod launcher;
pub mod outcome;
pub mod response;

pub use barrier::{await_all, await_all_default, await_one, await_one_default, FanIn};
pub use config::{ConfigError, SyncConfig};
pub use deadline::{Deadline, DEFAULT_TIMEOUT};
pub use launcher::{boxed, BoxedLauncher, Completion, Launcher};
pub use outcome::{Outcome, TimedOut};

// Compile-time assertions for the types that cross threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send::<Completion<u8>>();
    assert_send_sync::<concurrency::CompletionQueue<u8>>();
    assert_send_sync::<concurrency::WaitGate>();
    assert!(core::mem::size_of::<TimedOut>() == 0);
};
