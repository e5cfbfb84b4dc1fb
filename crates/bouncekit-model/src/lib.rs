//! # BounceKit Model
//!
//! The shape composition and event notification engine. A
//! [`ShapeModel`] owns a tree of [`Shape`] nodes rooted at a nesting
//! container sized to the world bounds, animates the tree inside those
//! bounds, and notifies registered [`ShapeModelListener`]s of every
//! structural or movement change through [`ShapeModelEvent`]s.

pub mod event;
pub mod model;
pub mod shape;
pub mod tree;

pub use event::{EventKind, ShapeModelEvent, ShapeModelListener, SharedListener};
pub use model::ShapeModel;
pub use shape::{DynamicFill, Nest, Shape, ShapeId, ShapeKind};
pub use tree::ShapeTree;
