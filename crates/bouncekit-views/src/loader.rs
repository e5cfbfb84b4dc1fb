//! Asynchronous preparation of image-backed shapes.
//!
//! Decoding and scaling a bitmap must not block the control thread
//! that owns the model, so the work runs on a blocking worker and
//! only the finished [`Shape`] crosses back to the caller, ready to be
//! handed to [`bouncekit_model::ShapeModel::add`]. Abandoning an
//! in-flight load is done by dropping the returned future; the model
//! itself has no cancellation concept.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bouncekit_model::Shape;
use image::imageops::FilterType;
use image::RgbaImage;
use tokio::task;
use tracing::debug;

/// Loads a bitmap off-thread and prepares an image shape from it.
///
/// Images wider than `target_width` are downscaled to that width,
/// preserving aspect ratio; smaller images are used as-is. The shape's
/// size is derived from the prepared bitmap.
pub async fn load_image_shape(
    path: impl AsRef<Path>,
    delta_x: i32,
    delta_y: i32,
    target_width: u32,
) -> anyhow::Result<Shape> {
    let path = path.as_ref().to_owned();
    let bitmap = task::spawn_blocking(move || -> anyhow::Result<RgbaImage> {
        let image = image::open(&path)
            .with_context(|| format!("loading image {}", path.display()))?;
        let image = if target_width > 0 && image.width() > target_width {
            let target_height =
                (target_width as u64 * image.height() as u64 / image.width() as u64) as u32;
            image.resize_exact(target_width, target_height.max(1), FilterType::Triangle)
        } else {
            image
        };
        Ok(image.to_rgba8())
    })
    .await
    .context("image preparation worker failed")??;

    debug!(width = bitmap.width(), height = bitmap.height(), "image shape prepared");
    Ok(Shape::image(delta_x, delta_y, Arc::new(bitmap)))
}
