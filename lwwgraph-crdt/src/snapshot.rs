//! Serializable snapshots of replica state.
//!
//! A snapshot lists every add and remove mark, tombstones included, so a
//! restored replica merges exactly like the replica it was taken from. The
//! encoding is left to the embedder: anything serde supports works.

use crate::Edge;
use lwwgraph_types::Timestamp;
use serde::{Deserialize, Serialize};

/// Add and remove marks of an [`LwwSet`](crate::LwwSet), sorted by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSnapshot<T> {
    pub added: Vec<(T, Timestamp)>,
    pub removed: Vec<(T, Timestamp)>,
}

impl<T> Default for SetSnapshot<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Vertex and edge marks of an [`LwwDiGraph`](crate::LwwDiGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "V: Serialize",
    deserialize = "V: Deserialize<'de> + PartialEq + std::fmt::Debug"
))]
pub struct GraphSnapshot<V> {
    pub vertices: SetSnapshot<V>,
    pub edges: SetSnapshot<Edge<V>>,
}
