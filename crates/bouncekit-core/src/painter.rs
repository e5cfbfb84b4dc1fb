//! The painter capability consumed by the shape model.
//!
//! The model only ever calls these primitives; it never depends on how
//! they render. A [`RecordingPainter`] is provided for tests: it logs
//! every request instead of painting.

use std::fmt::Write;

use image::RgbaImage;

use crate::color::Color;

/// A type that offers primitive drawing operations.
///
/// Coordinates are in the painter's current frame; `translate` shifts
/// that frame. Translate calls compose additively and are exactly
/// reversible by translating with the negated arguments.
pub trait Painter {
    /// Draws a rectangle outline. `x` and `y` specify the top left
    /// corner, `width` and `height` its size.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draws a filled rectangle in the current color.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draws an oval outline inscribed in the given bounding box.
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Draws a closed polygon outline through the given vertices.
    fn draw_polygon(&mut self, points: &[(i32, i32)]);

    /// Draws a line from `(x1, y1)` to `(x2, y2)`.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Draws a bitmap. `x` and `y` specify the top left corner,
    /// `width` and `height` the size to draw at.
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, width: i32, height: i32);

    /// Draws a text string. `x` and `y` are the centre point of the
    /// box in which the text is painted.
    fn draw_centered_text(&mut self, text: &str, x: i32, y: i32);

    /// Returns the current paint color.
    fn color(&self) -> Color;

    /// Sets the color used by subsequent fill and stroke requests.
    fn set_color(&mut self, color: Color);

    /// Translates the coordinate frame by `dx` and `dy`.
    fn translate(&mut self, dx: i32, dy: i32);
}

/// A [`Painter`] that performs no painting and instead logs every
/// request as a compact string, one parenthesised entry per call.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    log: String,
    color: Color,
}

impl RecordingPainter {
    /// Creates a painter with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulated log.
    pub fn log(&self) -> &str {
        &self.log
    }
}

impl Painter for RecordingPainter {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let _ = write!(self.log, "(rectangle {x},{y},{width},{height})");
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let _ = write!(self.log, "(filled-rectangle {x},{y},{width},{height})");
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let _ = write!(self.log, "(oval {x},{y},{width},{height})");
    }

    fn draw_polygon(&mut self, points: &[(i32, i32)]) {
        self.log.push_str("(polygon");
        for (x, y) in points {
            let _ = write!(self.log, " {x},{y}");
        }
        self.log.push(')');
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let _ = write!(self.log, "(line {x1},{y1},{x2},{y2})");
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, width: i32, height: i32) {
        let _ = write!(
            self.log,
            "(image {}x{} {x},{y},{width},{height})",
            image.width(),
            image.height()
        );
    }

    fn draw_centered_text(&mut self, text: &str, x: i32, y: i32) {
        let _ = write!(self.log, "(centered-text {text},{x},{y})");
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        let _ = write!(self.log, "(color {color})");
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        let _ = write!(self.log, "(translate {dx},{dy})");
    }
}
