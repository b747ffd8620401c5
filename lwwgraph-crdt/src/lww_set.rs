//! Last-Writer-Wins Set (LWW-Set).
//!
//! A state-based CRDT set that records, for every value ever seen, the
//! latest time it was added and the latest time it was removed. A value is
//! present when its latest add is strictly newer than its latest remove, so
//! an add and a remove at the same timestamp resolve to "removed".
//!
//! Both maps only ever grow and only ever raise a timestamp, which makes
//! merge a pointwise maximum: commutative, associative and idempotent.
//! Removed values are kept as tombstones forever.
//!
//! Use cases:
//! - Vertex and edge sets of [`LwwDiGraph`](crate::LwwDiGraph)
//! - Any membership set where "latest operation wins" is acceptable

use crate::snapshot::SetSnapshot;
use lwwgraph_types::{TimedValue, Timestamp};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

/// Bounds every element of a replicated set must satisfy.
///
/// Hash and equality key the timestamp maps, the total order breaks ties
/// between values added at the same time, and `Debug` renders diagnostics.
pub trait Element: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T> Element for T where T: Clone + Eq + Hash + Ord + fmt::Debug {}

/// The vertex set of a graph. Plain LWW-Set semantics over vertex ids.
pub type LwwVertexSet<V = u64> = LwwSet<V>;

/// A Last-Writer-Wins Set.
#[derive(Debug, Clone)]
pub struct LwwSet<T>
where
    T: Element,
{
    /// Latest add timestamp per value.
    added: HashMap<T, Timestamp>,
    /// Latest remove timestamp per value (tombstones).
    removed: HashMap<T, Timestamp>,
}

impl<T> Default for LwwSet<T>
where
    T: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LwwSet<T>
where
    T: Element,
{
    /// Creates a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            added: HashMap::new(),
            removed: HashMap::new(),
        }
    }

    /// Creates a set from previously persisted add and remove marks.
    #[must_use]
    pub fn from_marks(added: HashMap<T, Timestamp>, removed: HashMap<T, Timestamp>) -> Self {
        Self { added, removed }
    }

    /// Returns the add marks (for persistence/debugging).
    #[must_use]
    pub fn added_marks(&self) -> &HashMap<T, Timestamp> {
        &self.added
    }

    /// Returns the remove marks (for persistence/debugging).
    #[must_use]
    pub fn removed_marks(&self) -> &HashMap<T, Timestamp> {
        &self.removed
    }

    /// Records an add of `value` at `timestamp`.
    ///
    /// An add older than the one already recorded is a no-op.
    pub fn add(&mut self, value: T, timestamp: Timestamp) -> &mut Self {
        Self::mark(&mut self.added, value, timestamp);
        self
    }

    /// Records a remove of `value` at `timestamp`.
    ///
    /// Removing a value that was never added still records the tombstone, so
    /// an older add arriving later stays hidden.
    pub fn remove(&mut self, value: T, timestamp: Timestamp) -> &mut Self {
        Self::mark(&mut self.removed, value, timestamp);
        self
    }

    /// Records an add carried by a timed value.
    pub fn add_timed(&mut self, timed: TimedValue<T>) -> &mut Self {
        let (value, timestamp) = timed.into_parts();
        self.add(value, timestamp)
    }

    /// Records a remove carried by a timed value.
    pub fn remove_timed(&mut self, timed: TimedValue<T>) -> &mut Self {
        let (value, timestamp) = timed.into_parts();
        self.remove(value, timestamp)
    }

    /// Returns true if the value is currently in the set.
    #[must_use]
    pub fn exists(&self, value: &T) -> bool {
        // None < Some(_), so a missing add never wins and a missing remove always loses.
        self.last_added_timestamp(value) > self.last_removed_timestamp(value)
    }

    /// Returns the present values, oldest add first.
    ///
    /// Values added at the same timestamp are ordered by `T`'s own order,
    /// so every replica with the same state enumerates the same sequence.
    #[must_use]
    pub fn elements(&self) -> Vec<T> {
        self.ordered_where(|value| self.exists(value))
            .into_iter()
            .map(|(value, _)| value.clone())
            .collect()
    }

    /// Returns the present values paired with their add timestamps, in
    /// [`elements`](Self::elements) order.
    #[must_use]
    pub fn elements_with_time(&self) -> Vec<TimedValue<T>> {
        self.ordered_where(|value| self.exists(value))
            .into_iter()
            .map(|(value, timestamp)| TimedValue::new(value.clone(), timestamp))
            .collect()
    }

    /// Returns an iterator over the present values in
    /// [`elements`](Self::elements) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.ordered_where(|value| self.exists(value))
            .into_iter()
            .map(|(value, _)| value)
    }

    /// Returns the number of present values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.keys().filter(|value| self.exists(value)).count()
    }

    /// Returns true if no value is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the latest add timestamp, or `None` if never added.
    #[must_use]
    pub fn last_added_timestamp(&self, value: &T) -> Option<Timestamp> {
        self.added.get(value).copied()
    }

    /// Returns the latest remove timestamp, or `None` if never removed.
    #[must_use]
    pub fn last_removed_timestamp(&self, value: &T) -> Option<Timestamp> {
        self.removed.get(value).copied()
    }

    /// Merges another set into this one.
    ///
    /// Every mark of `other` is replayed through [`add`](Self::add) and
    /// [`remove`](Self::remove); since both keep the maximum timestamp the
    /// result is the pointwise maximum of the two states. `other` is not
    /// modified.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        trace!(
            added = other.added.len(),
            removed = other.removed.len(),
            "merging LWW set"
        );
        for (value, &timestamp) in &other.added {
            self.add(value.clone(), timestamp);
        }
        for (value, &timestamp) in &other.removed {
            self.remove(value.clone(), timestamp);
        }
        self
    }

    /// Creates a new set that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Merges two sets into a freshly created third one.
    #[must_use]
    pub fn merge_set(a: &Self, b: &Self) -> Self {
        let mut result = Self::new();
        result.merge(a).merge(b);
        result
    }

    /// Captures every add and remove mark, sorted by value.
    #[must_use]
    pub fn snapshot(&self) -> SetSnapshot<T> {
        SetSnapshot {
            added: Self::sorted_marks(&self.added),
            removed: Self::sorted_marks(&self.removed),
        }
    }

    /// Rebuilds a set from a snapshot.
    ///
    /// Marks are replayed, so a snapshot listing a value twice keeps the
    /// later timestamp.
    #[must_use]
    pub fn restore(snapshot: SetSnapshot<T>) -> Self {
        trace!(
            added = snapshot.added.len(),
            removed = snapshot.removed.len(),
            "restoring LWW set"
        );
        let mut set = Self::new();
        for (value, timestamp) in snapshot.added {
            set.add(value, timestamp);
        }
        for (value, timestamp) in snapshot.removed {
            set.remove(value, timestamp);
        }
        set
    }

    /// Collects the added values accepted by `keep`, ordered by
    /// `(add timestamp, value)`.
    pub(crate) fn ordered_where<F>(&self, keep: F) -> Vec<(&T, Timestamp)>
    where
        F: Fn(&T) -> bool,
    {
        let mut selected: Vec<(&T, Timestamp)> = self
            .added
            .iter()
            .filter(|&(value, _)| keep(value))
            .map(|(value, &timestamp)| (value, timestamp))
            .collect();
        selected.sort_by(|(a, a_time), (b, b_time)| a_time.cmp(b_time).then_with(|| a.cmp(b)));
        selected
    }

    fn mark(marks: &mut HashMap<T, Timestamp>, value: T, timestamp: Timestamp) {
        let entry = marks.entry(value).or_insert(timestamp);
        if timestamp > *entry {
            *entry = timestamp;
        }
    }

    fn sorted_marks(marks: &HashMap<T, Timestamp>) -> Vec<(T, Timestamp)> {
        let mut sorted: Vec<(T, Timestamp)> = marks
            .iter()
            .map(|(value, &timestamp)| (value.clone(), timestamp))
            .collect();
        sorted.sort();
        sorted
    }
}

impl<T> PartialEq for LwwSet<T>
where
    T: Element,
{
    /// Two sets are equal when they enumerate the same values in the same
    /// order. Timestamps and tombstones are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T> Eq for LwwSet<T> where T: Element {}

impl<T> Extend<TimedValue<T>> for LwwSet<T>
where
    T: Element,
{
    fn extend<I: IntoIterator<Item = TimedValue<T>>>(&mut self, iter: I) {
        for timed in iter {
            self.add_timed(timed);
        }
    }
}

impl<T> FromIterator<TimedValue<T>> for LwwSet<T>
where
    T: Element,
{
    fn from_iter<I: IntoIterator<Item = TimedValue<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
