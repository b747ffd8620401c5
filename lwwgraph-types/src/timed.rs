//! Values tagged with the logical time of the operation that produced them.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value paired with a logical timestamp.
///
/// Identity is the value alone: two `TimedValue`s holding equal values are
/// equal (and hash the same) whatever their timestamps. Recency is compared
/// through [`cmp_timestamp`](Self::cmp_timestamp) and
/// [`is_newer_than`](Self::is_newer_than) rather than `PartialOrd`, which
/// would have to agree with value equality.
///
/// `T: Debug` is required so every timed value can be rendered for
/// diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedValue<T> {
    value: T,
    timestamp: Timestamp,
}

impl<T: fmt::Debug> TimedValue<T> {
    /// Creates a timed value with an explicit timestamp.
    #[must_use]
    pub fn new(value: T, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    /// Creates a timed value stamped with the process-local clock.
    #[must_use]
    pub fn now(value: T) -> Self {
        Self::new(value, Timestamp::now())
    }

    /// Returns a reference to the value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Compares timestamps only. Values are ignored, so two different values
    /// stamped at the same time compare `Equal`.
    #[must_use]
    pub fn cmp_timestamp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }

    /// Returns true if this value was stamped strictly after `other`.
    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.timestamp > other.timestamp
    }

    /// Splits into value and timestamp.
    #[must_use]
    pub fn into_parts(self) -> (T, Timestamp) {
        (self.value, self.timestamp)
    }
}

impl<T: PartialEq> PartialEq for TimedValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for TimedValue<T> {}

impl<T: Hash> Hash for TimedValue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Display for TimedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timed[{:?} @ {}]", self.value, self.timestamp)
    }
}
