//! Error handling for BounceKit.
//!
//! Provides the error types shared across the workspace:
//! - Structure errors (invalid attach/re-parent requests)
//! - Out-of-range errors (indexing a nonexistent child)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Invalid-structure error type.
///
/// Represents a structural mutation request that would violate a tree
/// invariant. These are reported by value and never cause a partial
/// mutation: a request that fails any of these checks leaves the tree
/// exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The shape is already attached to a container
    #[error("shape is already attached to a container")]
    AlreadyAttached,

    /// The shape does not fit within the candidate container
    #[error("shape extends to ({right}, {bottom}), outside container bounds {bound_width}x{bound_height}")]
    DoesNotFit {
        /// Right edge of the shape in the container's frame.
        right: i32,
        /// Bottom edge of the shape in the container's frame.
        bottom: i32,
        /// Width of the candidate container.
        bound_width: i32,
        /// Height of the candidate container.
        bound_height: i32,
    },

    /// Re-parenting would make a shape its own descendant
    #[error("destination is the shape itself or one of its descendants")]
    WouldCreateCycle,

    /// The target of an attach request cannot hold children
    #[error("target shape is not a container")]
    NotAContainer,

    /// The shape id does not name a live shape
    #[error("unknown shape id")]
    UnknownShape,
}

/// Out-of-range error type.
///
/// Indexing a child position outside `[0, count)`. Unlike
/// [`StructureError`] this indicates a caller programming error rather
/// than a recoverable runtime condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} out of range for container with {count} children")]
pub struct OutOfRangeError {
    /// The requested index.
    pub index: usize,
    /// Number of children actually present.
    pub count: usize,
}
