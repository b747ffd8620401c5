//! Last-Writer-Wins CRDTs for lwwgraph.
//!
//! This crate provides state-based Conflict-free Replicated Data Types:
//!
//! - [`LwwSet<T>`]: Last-Writer-Wins Set with remove-wins ties
//! - [`LwwEdgeSet<V>`]: edge marks whose validity depends on a vertex set
//! - [`LwwDiGraph<V>`]: directed graph composed of a vertex and an edge set
//!
//! All CRDTs in this crate satisfy the following properties:
//! - **Commutative**: merge(a, b) == merge(b, a)
//! - **Associative**: merge(merge(a, b), c) == merge(a, merge(b, c))
//! - **Idempotent**: merge(a, a) == a
//!
//! Timestamps are supplied by the caller (see [`Timestamp`]). Replicas
//! converge as long as they share one timestamp domain.

mod digraph;
mod edge;
mod edge_set;
mod lww_set;
mod snapshot;

pub use digraph::LwwDiGraph;
pub use edge::Edge;
pub use edge_set::{LwwEdgeSet, ValidEdges};
pub use lww_set::{Element, LwwSet, LwwVertexSet};
pub use lwwgraph_types::{Error, Result, TimedValue, Timestamp};
pub use snapshot::{GraphSnapshot, SetSnapshot};
