//! LWW edge set with causal validity against a vertex set.
//!
//! Edges are stored like any LWW-Set element, but an edge only *counts* when
//! both endpoints are present and were last added strictly before the edge.
//! The check happens at read time, so an edge that arrives before one of its
//! vertices is simply hidden until that vertex merges in with an earlier
//! timestamp. Nothing has to be replayed.
//!
//! The edge set never stores a reference to its vertex set. Validity-aware
//! reads go through [`ValidEdges`], a view that borrows both sets.

use crate::lww_set::{Element, LwwSet, LwwVertexSet};
use crate::snapshot::SetSnapshot;
use crate::Edge;
use lwwgraph_types::{TimedValue, Timestamp};
use std::collections::HashMap;

/// Add and remove marks for the edges of one graph replica.
#[derive(Debug, Clone)]
pub struct LwwEdgeSet<V>
where
    V: Element,
{
    marks: LwwSet<Edge<V>>,
}

impl<V> Default for LwwEdgeSet<V>
where
    V: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LwwEdgeSet<V>
where
    V: Element,
{
    /// Creates a new empty edge set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marks: LwwSet::new(),
        }
    }

    /// Creates an edge set from previously persisted marks.
    #[must_use]
    pub fn from_marks(
        added: HashMap<Edge<V>, Timestamp>,
        removed: HashMap<Edge<V>, Timestamp>,
    ) -> Self {
        Self {
            marks: LwwSet::from_marks(added, removed),
        }
    }

    /// Returns the raw marks, ignoring vertex validity.
    #[must_use]
    pub fn marks(&self) -> &LwwSet<Edge<V>> {
        &self.marks
    }

    /// Records an add of `edge`. Endpoints need not exist yet.
    pub fn add(&mut self, edge: Edge<V>, timestamp: Timestamp) -> &mut Self {
        self.marks.add(edge, timestamp);
        self
    }

    /// Records a remove of `edge`.
    pub fn remove(&mut self, edge: Edge<V>, timestamp: Timestamp) -> &mut Self {
        self.marks.remove(edge, timestamp);
        self
    }

    #[must_use]
    pub fn last_added_timestamp(&self, edge: &Edge<V>) -> Option<Timestamp> {
        self.marks.last_added_timestamp(edge)
    }

    #[must_use]
    pub fn last_removed_timestamp(&self, edge: &Edge<V>) -> Option<Timestamp> {
        self.marks.last_removed_timestamp(edge)
    }

    /// Merges another edge set's marks into this one.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        self.marks.merge(&other.marks);
        self
    }

    /// Binds this edge set to `vertices` for validity-aware reads.
    #[must_use]
    pub fn bind<'a>(&'a self, vertices: &'a LwwVertexSet<V>) -> ValidEdges<'a, V> {
        ValidEdges {
            edges: &self.marks,
            vertices,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SetSnapshot<Edge<V>> {
        self.marks.snapshot()
    }

    #[must_use]
    pub fn restore(snapshot: SetSnapshot<Edge<V>>) -> Self {
        Self {
            marks: LwwSet::restore(snapshot),
        }
    }
}

/// Read-only view of an edge set filtered by causal validity.
///
/// An edge is valid when:
/// - the edge itself is present (latest add newer than latest remove),
/// - both endpoints are present in the vertex set,
/// - both endpoints were last added strictly before the edge was.
///
/// Enumeration follows the same `(add timestamp, edge)` order as
/// [`LwwSet::elements`].
#[derive(Debug)]
pub struct ValidEdges<'a, V>
where
    V: Element,
{
    edges: &'a LwwSet<Edge<V>>,
    vertices: &'a LwwVertexSet<V>,
}

impl<V> Clone for ValidEdges<'_, V>
where
    V: Element,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ValidEdges<'_, V> where V: Element {}

impl<'a, V> ValidEdges<'a, V>
where
    V: Element,
{
    /// Returns true if the edge is present and causally valid.
    #[must_use]
    pub fn exists(&self, edge: &Edge<V>) -> bool {
        let Some(edge_added) = self.edges.last_added_timestamp(edge) else {
            return false;
        };
        self.edges.exists(edge)
            && self.endpoint_precedes(edge.src(), edge_added)
            && self.endpoint_precedes(edge.target(), edge_added)
    }

    /// Returns the valid edges, oldest add first.
    #[must_use]
    pub fn elements(&self) -> Vec<Edge<V>> {
        self.iter().cloned().collect()
    }

    /// Returns the valid edges with their add timestamps.
    #[must_use]
    pub fn elements_with_time(&self) -> Vec<TimedValue<Edge<V>>> {
        self.edges
            .ordered_where(|edge| self.exists(edge))
            .into_iter()
            .map(|(edge, timestamp)| TimedValue::new(edge.clone(), timestamp))
            .collect()
    }

    /// Returns an iterator over the valid edges in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Edge<V>> + use<'a, V> {
        let view = *self;
        self.edges
            .ordered_where(move |edge| view.exists(edge))
            .into_iter()
            .map(|(edge, _)| edge)
    }

    /// Returns the number of valid edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges
            .added_marks()
            .keys()
            .filter(|edge| self.exists(edge))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn endpoint_precedes(&self, vertex: &V, edge_added: Timestamp) -> bool {
        self.vertices.exists(vertex) && self.vertices.last_added_timestamp(vertex) < Some(edge_added)
    }
}

impl<V> PartialEq for ValidEdges<'_, V>
where
    V: Element,
{
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
