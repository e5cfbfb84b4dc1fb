//! # BounceKit Core
//!
//! Core types, traits, and utilities for BounceKit.
//! Provides the shared vocabulary for the shape model and its views:
//! geometry, colors, the painter capability and the error taxonomy.

pub mod color;
pub mod error;
pub mod geom;
pub mod painter;

pub use color::Color;
pub use error::{OutOfRangeError, StructureError};
pub use geom::Extent;
pub use painter::{Painter, RecordingPainter};
