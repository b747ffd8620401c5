//! Logical timestamps for last-writer-wins conflict resolution.
//!
//! Timestamps are plain signed integers supplied by the caller: a Lamport
//! clock, a wall clock, or fixed values in tests. The only requirement is
//! that every replica of one lineage draws from the same total order.
//!
//! "Never observed" is not a timestamp value. Lookups return
//! `Option<Timestamp>` instead, and `None` sorts below every `Some(_)`, so an
//! absent mark loses every comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

/// Anchor for the process-local clock.
static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Last value handed out by [`Timestamp::now`].
static LAST_ISSUED: AtomicI64 = AtomicI64::new(i64::MIN);

/// A logical timestamp.
///
/// Ordering is the integer ordering. Two operations with equal timestamps are
/// considered concurrent; each replicated type documents its own tie rule.
///
/// There is no `Default`; reading the clock is always explicit:
///
/// ```compile_fail
/// let _ = lwwgraph_types::Timestamp::default();
/// ```
///
/// ```
/// let stamp = lwwgraph_types::Timestamp::now();
/// assert!(lwwgraph_types::Timestamp::now() > stamp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from a raw logical time.
    #[must_use]
    pub const fn new(time: i64) -> Self {
        Self(time)
    }

    /// Returns the raw logical time.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Reads the process-local monotonic clock.
    ///
    /// Values are nanoseconds since the first call in this process and are
    /// strictly increasing across calls from any thread. They are meaningless
    /// outside the process, so replicas stamped by different processes must
    /// not be merged unless the caller synchronizes their clocks.
    #[must_use]
    pub fn now() -> Self {
        let origin = *ORIGIN.get_or_init(Instant::now);
        let elapsed = i64::try_from(origin.elapsed().as_nanos()).unwrap_or(i64::MAX);

        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = elapsed.max(last.saturating_add(1));
            match LAST_ISSUED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Self(next),
                Err(actual) => last = actual,
            }
        }
    }
}

impl From<i64> for Timestamp {
    fn from(time: i64) -> Self {
        Self(time)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
