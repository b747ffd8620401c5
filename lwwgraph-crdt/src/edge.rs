//! Directed edges between graph vertices.

use lwwgraph_types::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A directed edge `src -> target`.
///
/// Self-loops are rejected at construction, including when an edge is
/// deserialized, so every `Edge` value connects two distinct vertices.
/// Edges order by source, then target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge<V> {
    src: V,
    target: V,
}

impl<V> Edge<V>
where
    V: PartialEq + fmt::Debug,
{
    /// Creates an edge, failing with [`Error::InvalidArgument`] when `src`
    /// and `target` are the same vertex.
    pub fn new(src: V, target: V) -> Result<Self> {
        if src == target {
            return Err(Error::InvalidArgument(format!(
                "edge cannot connect vertex {src:?} to itself"
            )));
        }
        Ok(Self { src, target })
    }

    /// Returns the source vertex.
    #[must_use]
    pub fn src(&self) -> &V {
        &self.src
    }

    /// Returns the target vertex.
    #[must_use]
    pub fn target(&self) -> &V {
        &self.target
    }

    /// Returns true if `vertex` is either endpoint.
    #[must_use]
    pub fn contains(&self, vertex: &V) -> bool {
        self.src == *vertex || self.target == *vertex
    }

    /// Returns the endpoint opposite `vertex`, or `None` if `vertex` is not
    /// on this edge.
    #[must_use]
    pub fn counterparty(&self, vertex: &V) -> Option<&V> {
        if self.src == *vertex {
            Some(&self.target)
        } else if self.target == *vertex {
            Some(&self.src)
        } else {
            None
        }
    }

    /// Splits the edge into `(src, target)`.
    #[must_use]
    pub fn into_parts(self) -> (V, V) {
        (self.src, self.target)
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge[{} -> {}]", self.src, self.target)
    }
}

impl<V> TryFrom<(V, V)> for Edge<V>
where
    V: PartialEq + fmt::Debug,
{
    type Error = Error;

    fn try_from((src, target): (V, V)) -> Result<Self> {
        Self::new(src, target)
    }
}

/// Wire shape of an edge before the self-loop check.
#[derive(Deserialize)]
struct RawEdge<V> {
    src: V,
    target: V,
}

impl<'de, V> Deserialize<'de> for Edge<V>
where
    V: Deserialize<'de> + PartialEq + fmt::Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawEdge::<V>::deserialize(deserializer)?;
        Self::new(raw.src, raw.target).map_err(serde::de::Error::custom)
    }
}
