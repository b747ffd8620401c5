//! Core type definitions for lwwgraph.
//!
//! This crate defines the small vocabulary shared by every replicated type:
//! - Logical timestamps with a process-local monotonic default clock
//! - Timed values (a value tagged with the logical time of an operation)
//!
//! The replicated sets and graph themselves live in `lwwgraph-crdt`.

mod timed;
mod timestamp;

pub use timed::TimedValue;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing replicated values.
///
/// Every CRDT operation is total; the only failures are malformed inputs
/// rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
