//! Last-Writer-Wins Directed Graph (LWW-DiGraph).
//!
//! A graph CRDT made of two LWW-Sets: one for vertices and one for edges.
//! Operations are always accepted locally; whether an edge is part of the
//! graph is decided at read time (see [`ValidEdges`]). Replicas converge by
//! merging both sets.
//!
//! Use cases:
//! - Replicated dependency or link graphs edited offline on several peers
//! - Any relation where both endpoints must exist before the link does

use crate::edge_set::{LwwEdgeSet, ValidEdges};
use crate::lww_set::{Element, LwwVertexSet};
use crate::snapshot::GraphSnapshot;
use crate::Edge;
use lwwgraph_types::{Result, Timestamp};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A Last-Writer-Wins directed graph.
///
/// Vertex ids default to `u64`. Self-loops are not allowed.
#[derive(Debug, Clone)]
pub struct LwwDiGraph<V = u64>
where
    V: Element,
{
    vertices: LwwVertexSet<V>,
    edges: LwwEdgeSet<V>,
}

impl<V> Default for LwwDiGraph<V>
where
    V: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LwwDiGraph<V>
where
    V: Element,
{
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::from_sets(LwwVertexSet::new(), LwwEdgeSet::new())
    }

    /// Creates a graph from existing vertex and edge sets.
    #[must_use]
    pub fn from_sets(vertices: LwwVertexSet<V>, edges: LwwEdgeSet<V>) -> Self {
        Self { vertices, edges }
    }

    /// Records an add of `vertex`.
    pub fn add_vertex(&mut self, vertex: V, timestamp: Timestamp) -> &mut Self {
        self.vertices.add(vertex, timestamp);
        self
    }

    /// Records an add of the edge `src -> target`.
    ///
    /// Fails with `InvalidArgument` if `src == target`. Missing endpoints are
    /// fine: the edge stays hidden until both vertices exist with older add
    /// timestamps.
    pub fn add_edge(&mut self, src: V, target: V, timestamp: Timestamp) -> Result<&mut Self> {
        let edge = Edge::new(src, target)?;
        Ok(self.add_edge_value(edge, timestamp))
    }

    /// Records an add of an already constructed edge.
    pub fn add_edge_value(&mut self, edge: Edge<V>, timestamp: Timestamp) -> &mut Self {
        self.edges.add(edge, timestamp);
        self
    }

    /// Removes a vertex and every edge touching it.
    ///
    /// If the vertex is present, each currently valid edge with the vertex
    /// as source or target is removed at the same `timestamp`. The vertex
    /// tombstone is recorded either way, so an older add that has not
    /// arrived yet is superseded when it does.
    pub fn remove_vertex(&mut self, vertex: V, timestamp: Timestamp) -> &mut Self {
        if self.vertex_exist(&vertex) {
            // Collect first: removing edges changes what the view yields.
            let touching: Vec<Edge<V>> = self
                .valid_edges()
                .iter()
                .filter(|edge| edge.contains(&vertex))
                .cloned()
                .collect();
            debug!(
                ?vertex,
                edges = touching.len(),
                %timestamp,
                "cascading vertex removal"
            );
            for edge in touching {
                self.edges.remove(edge, timestamp);
            }
        }
        self.vertices.remove(vertex, timestamp);
        self
    }

    /// Records a remove of `edge`.
    pub fn remove_edge(&mut self, edge: Edge<V>, timestamp: Timestamp) -> &mut Self {
        self.edges.remove(edge, timestamp);
        self
    }

    /// Records a remove of the edge `src -> target`.
    pub fn remove_edge_between(
        &mut self,
        src: V,
        target: V,
        timestamp: Timestamp,
    ) -> Result<&mut Self> {
        let edge = Edge::new(src, target)?;
        Ok(self.remove_edge(edge, timestamp))
    }

    #[must_use]
    pub fn vertex_exist(&self, vertex: &V) -> bool {
        self.vertices.exists(vertex)
    }

    /// Returns true if the edge is present and both endpoints causally
    /// precede it.
    #[must_use]
    pub fn edge_exist(&self, edge: &Edge<V>) -> bool {
        self.valid_edges().exists(edge)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of valid edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.valid_edges().len()
    }

    /// Present vertices, oldest add first.
    #[must_use]
    pub fn vertices(&self) -> Vec<V> {
        self.vertices.elements()
    }

    /// Valid edges, oldest add first.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<V>> {
        self.valid_edges().elements()
    }

    #[must_use]
    pub fn vertex_set(&self) -> &LwwVertexSet<V> {
        &self.vertices
    }

    #[must_use]
    pub fn edge_set(&self) -> &LwwEdgeSet<V> {
        &self.edges
    }

    /// Returns the edge set bound to this graph's vertex set.
    #[must_use]
    pub fn valid_edges(&self) -> ValidEdges<'_, V> {
        self.edges.bind(&self.vertices)
    }

    /// Returns every distinct neighbour of `vertex`, incoming or outgoing.
    ///
    /// Neighbours appear in the order their first connecting edge is
    /// enumerated.
    #[must_use]
    pub fn connected_vertices(&self, vertex: &V) -> Vec<V> {
        let mut seen = HashSet::new();
        self.valid_edges()
            .iter()
            .filter_map(|edge| edge.counterparty(vertex))
            .filter(|&neighbour| seen.insert(neighbour))
            .cloned()
            .collect()
    }

    /// Returns the targets of every valid edge leaving `vertex`.
    #[must_use]
    pub fn outgoing_vertices(&self, vertex: &V) -> Vec<V> {
        self.valid_edges()
            .iter()
            .filter(|edge| edge.src() == vertex)
            .map(|edge| edge.target().clone())
            .collect()
    }

    /// Lists every simple directed path from `src` to `target`.
    ///
    /// Only valid edges are followed and no vertex repeats within a path, so
    /// cycles are walked at most once per branch. All distinct paths are
    /// returned, not just the shortest; their order is unspecified. Returns
    /// nothing if either endpoint is absent, and the single path `[src]`
    /// when `src == target`.
    #[must_use]
    pub fn list_all_path(&self, src: &V, target: &V) -> Vec<Vec<V>> {
        let mut paths = Vec::new();
        if !(self.vertex_exist(src) && self.vertex_exist(target)) {
            return paths;
        }

        let mut outgoing: HashMap<&V, Vec<&V>> = HashMap::new();
        for edge in self.valid_edges().iter() {
            outgoing.entry(edge.src()).or_default().push(edge.target());
        }

        let mut visited = HashSet::from([src]);
        let mut current = vec![src];
        collect_paths(&outgoing, target, &mut visited, &mut current, &mut paths);
        paths
    }

    /// Merges another graph into this one: vertices first, then edges.
    ///
    /// Edge validity is derived at read time, so the result only depends on
    /// the two merged sets and inherits their commutativity, associativity
    /// and idempotence.
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        debug!(
            vertices = other.vertices.added_marks().len(),
            edges = other.edges.marks().added_marks().len(),
            "merging graph replica"
        );
        self.vertices.merge(&other.vertices);
        self.edges.merge(&other.edges);
        self
    }

    /// Creates a new graph that is the merge of this and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Captures every vertex and edge mark.
    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot<V> {
        GraphSnapshot {
            vertices: self.vertices.snapshot(),
            edges: self.edges.snapshot(),
        }
    }

    /// Rebuilds a graph from a snapshot.
    #[must_use]
    pub fn restore(snapshot: GraphSnapshot<V>) -> Self {
        Self::from_sets(
            LwwVertexSet::restore(snapshot.vertices),
            LwwEdgeSet::restore(snapshot.edges),
        )
    }
}

impl<V> PartialEq for LwwDiGraph<V>
where
    V: Element,
{
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.valid_edges() == other.valid_edges()
    }
}

impl<V> Eq for LwwDiGraph<V> where V: Element {}

/// Depth-first walk from the last vertex of `current`.
///
/// `visited` holds exactly the vertices on `current` and is restored on
/// backtrack, so sibling branches may reuse vertices.
fn collect_paths<'g, V>(
    outgoing: &HashMap<&'g V, Vec<&'g V>>,
    target: &V,
    visited: &mut HashSet<&'g V>,
    current: &mut Vec<&'g V>,
    paths: &mut Vec<Vec<V>>,
) where
    V: Element,
{
    let Some(&here) = current.last() else {
        return;
    };
    if here == target {
        paths.push(current.iter().map(|&vertex| vertex.clone()).collect());
        return;
    }
    for &next in outgoing.get(here).into_iter().flatten() {
        if visited.insert(next) {
            current.push(next);
            collect_paths(outgoing, target, visited, current, paths);
            current.pop();
            visited.remove(next);
        }
    }
}
