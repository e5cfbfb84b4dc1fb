//! # BounceKit Views
//!
//! Downstream consumers of the shape model: adapters that project
//! [`bouncekit_model::ShapeModelEvent`]s into view-specific update
//! protocols, a tiny-skia backed [`Painter`] implementation, and the
//! asynchronous image-shape preparation routine.
//!
//! [`Painter`]: bouncekit_core::Painter

pub mod animation;
pub mod loader;
pub mod raster;
pub mod table;
pub mod tree;

mod text;

pub use animation::AnimationView;
pub use loader::load_image_shape;
pub use raster::RasterPainter;
pub use table::{ShapeRow, SharedTableView, TableModelAdapter, TableView};
pub use tree::{SharedTreeView, TreeChange, TreeModelAdapter, TreeView};
