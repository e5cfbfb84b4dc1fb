//! Raster implementation of the painter capability on top of
//! tiny-skia.
//!
//! Coordinates arriving from the model are in the painter's current
//! frame; the painter applies its accumulated integer translation
//! before building paths, so translate calls compose additively and
//! reverse exactly.

use bouncekit_core::{Color, Painter};
use image::RgbaImage;
use tiny_skia::{IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};
use tracing::warn;

use crate::text;

/// A [`Painter`] that renders into an in-memory pixmap.
pub struct RasterPainter {
    pixmap: Pixmap,
    color: Color,
    offset_x: i32,
    offset_y: i32,
}

impl RasterPainter {
    /// Creates a painter over a fresh white pixmap of the given size.
    pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow::anyhow!("invalid pixmap size {width}x{height}"))?;
        pixmap.fill(to_skia(Color::WHITE));
        Ok(Self {
            pixmap,
            color: Color::BLACK,
            offset_x: 0,
            offset_y: 0,
        })
    }

    /// The rendered pixels.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fills the whole pixmap, discarding previous content.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_skia(self.color));
        paint.anti_alias = true;
        paint
    }

    fn stroke(&mut self, path: tiny_skia::Path) {
        let paint = self.paint();
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn rect(&self, x: i32, y: i32, width: i32, height: i32) -> Option<Rect> {
        Rect::from_xywh(
            (x + self.offset_x) as f32,
            (y + self.offset_y) as f32,
            width as f32,
            height as f32,
        )
    }
}

impl Painter for RasterPainter {
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if let Some(rect) = self.rect(x, y, width, height) {
            self.stroke(PathBuilder::from_rect(rect));
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if let Some(rect) = self.rect(x, y, width, height) {
            let paint = self.paint();
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if let Some(rect) = self.rect(x, y, width, height) {
            let mut pb = PathBuilder::new();
            pb.push_oval(rect);
            if let Some(path) = pb.finish() {
                self.stroke(path);
            }
        }
    }

    fn draw_polygon(&mut self, points: &[(i32, i32)]) {
        let Some(&(first_x, first_y)) = points.first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(
            (first_x + self.offset_x) as f32,
            (first_y + self.offset_y) as f32,
        );
        for &(x, y) in &points[1..] {
            pb.line_to((x + self.offset_x) as f32, (y + self.offset_y) as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke(path);
        }
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let mut pb = PathBuilder::new();
        pb.move_to((x1 + self.offset_x) as f32, (y1 + self.offset_y) as f32);
        pb.line_to((x2 + self.offset_x) as f32, (y2 + self.offset_y) as f32);
        if let Some(path) = pb.finish() {
            self.stroke(path);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, width: i32, height: i32) {
        let Some(size) = IntSize::from_wh(image.width(), image.height()) else {
            return;
        };
        let Some(source) = Pixmap::from_vec(image.as_raw().clone(), size) else {
            warn!("bitmap could not be wrapped for drawing");
            return;
        };
        let scale_x = width as f32 / image.width() as f32;
        let scale_y = height as f32 / image.height() as f32;
        let transform = Transform::from_row(
            scale_x,
            0.0,
            0.0,
            scale_y,
            (x + self.offset_x) as f32,
            (y + self.offset_y) as f32,
        );
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );
    }

    fn draw_centered_text(&mut self, text: &str, x: i32, y: i32) {
        text::draw_centered(
            &mut self.pixmap,
            text,
            x + self.offset_x,
            y + self.offset_y,
            self.color,
        );
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}
