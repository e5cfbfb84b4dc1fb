//! The canvas-paint view: renders the whole composition into a
//! pixmap whenever the model changes.

use bouncekit_core::{Color, Extent, Painter};
use bouncekit_model::{ShapeModel, ShapeModelEvent, ShapeModelListener};
use tiny_skia::Pixmap;

use crate::raster::RasterPainter;

/// Presents an animation view of a [`ShapeModel`].
///
/// Registered as a listener, it repaints on every event: a `Moved`
/// event is the model's full-resync signal, and structural events
/// change what is visible too, so every notification invalidates the
/// previous frame entirely.
pub struct AnimationView {
    painter: RasterPainter,
    background: Color,
}

impl AnimationView {
    /// Creates a view with a canvas of the given bounds and a white
    /// background.
    pub fn new(bounds: Extent) -> anyhow::Result<Self> {
        let painter = RasterPainter::new(bounds.width.max(0) as u32, bounds.height.max(0) as u32)?;
        Ok(Self {
            painter,
            background: Color::WHITE,
        })
    }

    /// Sets the background fill used before each repaint.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// The most recently rendered frame.
    pub fn pixmap(&self) -> &Pixmap {
        self.painter.pixmap()
    }

    /// Repaints the frame from the model's current state.
    pub fn render(&mut self, model: &ShapeModel) {
        self.painter.clear(self.background);
        self.painter.set_color(Color::BLACK);
        model.paint(&mut self.painter);
    }
}

impl ShapeModelListener for AnimationView {
    fn model_changed(&mut self, model: &ShapeModel, _event: &ShapeModelEvent) {
        self.render(model);
    }
}
