//! Shape nodes: geometry, velocity, bounce movement and paint
//! primitives.
//!
//! A [`Shape`] carries the state common to every node in the
//! composition tree plus a [`ShapeKind`] payload for the variant
//! behavior. Movement is a shared recurrence implemented once in
//! [`Shape::step_within`]; painting dispatches over the kind for the
//! primitive draw call, while the tree walker owns the fixed label
//! overlay and child recursion (see [`crate::tree`]).

use std::sync::Arc;

use bouncekit_core::{Color, Painter};
use image::RgbaImage;
use smallvec::SmallVec;

slotmap::new_key_type! {
    /// Unique identifier for a shape within a [`crate::ShapeTree`].
    pub struct ShapeId;
}

/// Default horizontal and vertical speed, pixels per tick.
pub const DEFAULT_DELTA: i32 = 5;
/// Default shape width in pixels.
pub const DEFAULT_WIDTH: i32 = 25;
/// Default shape height in pixels.
pub const DEFAULT_HEIGHT: i32 = 35;

/// Gems narrower than this are drawn as four-sided diamonds.
const GEM_SMALL_WIDTH: i32 = 40;
/// Horizontal inset of the top and bottom edges of a six-sided gem.
const GEM_CORNER_INSET: i32 = 20;

/// State of a dynamically filled rectangle.
///
/// The fill flag is stored state carried across `step` calls, not
/// derived from the current velocity sign: a bounce off a vertical
/// wall fills the shape, a bounce off a horizontal wall unfills it.
#[derive(Debug, Clone)]
pub struct DynamicFill {
    color: Color,
    filled: bool,
}

impl DynamicFill {
    /// The fill color used while the shape is in its filled state.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the shape currently paints filled.
    pub fn filled(&self) -> bool {
        self.filled
    }
}

/// Child collection of a nesting shape, insertion ordered.
#[derive(Debug, Clone, Default)]
pub struct Nest {
    pub(crate) children: Vec<ShapeId>,
}

impl Nest {
    /// The children in insertion order.
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }
}

/// The closed set of shape variants.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// Plain rectangle outline.
    Rectangle,
    /// Oval outline inscribed in the bounding box.
    Oval,
    /// Polygon outline; vertex count depends on the shape width.
    Gem,
    /// Rectangle whose fill toggles as it bounces.
    Dynamic(DynamicFill),
    /// Rectangle displaying a prepared bitmap.
    Image(Arc<RgbaImage>),
    /// Container holding an ordered collection of child shapes.
    Nesting(Nest),
}

impl ShapeKind {
    /// Short label for tabular presentation.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Oval => "oval",
            ShapeKind::Gem => "gem",
            ShapeKind::Dynamic(_) => "dynamic",
            ShapeKind::Image(_) => "image",
            ShapeKind::Nesting(_) => "container",
        }
    }
}

/// A movable, paintable node of the composition tree.
///
/// The default shape is a rectangle at the origin with the default
/// velocity and size.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) delta_x: i32,
    pub(crate) delta_y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<ShapeId>,
    pub(crate) kind: ShapeKind,
}

impl Shape {
    fn with_kind(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32, kind: ShapeKind) -> Self {
        Self {
            x,
            y,
            delta_x,
            delta_y,
            width,
            height,
            text: None,
            parent: None,
            kind,
        }
    }

    /// Creates a rectangle outline shape.
    pub fn rectangle(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32) -> Self {
        Self::with_kind(x, y, delta_x, delta_y, width, height, ShapeKind::Rectangle)
    }

    /// Creates an oval shape.
    pub fn oval(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32) -> Self {
        Self::with_kind(x, y, delta_x, delta_y, width, height, ShapeKind::Oval)
    }

    /// Creates a gem shape.
    pub fn gem(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32) -> Self {
        Self::with_kind(x, y, delta_x, delta_y, width, height, ShapeKind::Gem)
    }

    /// Creates a dynamically filled rectangle. The shape starts out
    /// filled in the given color.
    pub fn dynamic(
        x: i32,
        y: i32,
        delta_x: i32,
        delta_y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Self {
        Self::with_kind(
            x,
            y,
            delta_x,
            delta_y,
            width,
            height,
            ShapeKind::Dynamic(DynamicFill { color, filled: true }),
        )
    }

    /// Creates an image-backed rectangle. Width and height are derived
    /// from the prepared bitmap.
    pub fn image(delta_x: i32, delta_y: i32, bitmap: Arc<RgbaImage>) -> Self {
        let width = bitmap.width() as i32;
        let height = bitmap.height() as i32;
        Self::with_kind(2, 2, delta_x, delta_y, width, height, ShapeKind::Image(bitmap))
    }

    /// Creates an empty nesting shape.
    pub fn nesting(x: i32, y: i32, delta_x: i32, delta_y: i32, width: i32, height: i32) -> Self {
        Self::with_kind(x, y, delta_x, delta_y, width, height, ShapeKind::Nesting(Nest::default()))
    }

    /// Attaches a label, drawn centered over the shape after its
    /// primitive.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// X position of the top-left corner of the bounding box.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y position of the top-left corner of the bounding box.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Horizontal speed and direction, pixels per tick.
    pub fn delta_x(&self) -> i32 {
        self.delta_x
    }

    /// Vertical speed and direction, pixels per tick.
    pub fn delta_y(&self) -> i32 {
        self.delta_y
    }

    /// Width of the bounding box.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the bounding box.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The label text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The owning container, `None` when unattached or root.
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    /// The variant payload.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Whether this shape can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ShapeKind::Nesting(_))
    }

    pub(crate) fn nest(&self) -> Option<&Nest> {
        match &self.kind {
            ShapeKind::Nesting(nest) => Some(nest),
            _ => None,
        }
    }

    pub(crate) fn nest_mut(&mut self) -> Option<&mut Nest> {
        match &mut self.kind {
            ShapeKind::Nesting(nest) => Some(nest),
            _ => None,
        }
    }

    /// Moves this shape one tick within `[0, 0] .. (width, height)`.
    ///
    /// Containers use this for their children, passing their own size
    /// as the bounding world.
    pub fn step(&mut self, width: i32, height: i32) {
        self.step_within(0, 0, width, height);
    }

    /// Moves this shape one tick within the given bounds, reflecting
    /// velocity components at the edges.
    ///
    /// The clamped position is recomputed from the current bound on
    /// every call, so a shape larger than its world pins to a boundary
    /// each tick instead of oscillating away.
    pub fn step_within(&mut self, origin_x: i32, origin_y: i32, width: i32, height: i32) {
        let prev_delta_x = self.delta_x;
        let prev_delta_y = self.delta_y;

        let mut next_x = self.x + self.delta_x;
        let mut next_y = self.y + self.delta_y;

        if next_x <= origin_x {
            next_x = origin_x;
            self.delta_x = -self.delta_x;
        } else if next_x + self.width >= width {
            next_x = width - self.width;
            self.delta_x = -self.delta_x;
        }

        if next_y <= origin_y {
            next_y = origin_y;
            self.delta_y = -self.delta_y;
        } else if next_y + self.height >= height {
            next_y = height - self.height;
            self.delta_y = -self.delta_y;
        }

        self.x = next_x;
        self.y = next_y;

        if let ShapeKind::Dynamic(fill) = &mut self.kind {
            if sign_flipped(prev_delta_y, self.delta_y) {
                // Bounced off a horizontal wall.
                fill.filled = false;
            }
            if sign_flipped(prev_delta_x, self.delta_x) {
                // Bounced off a vertical wall.
                fill.filled = true;
            }
        }
    }

    /// Issues the kind-specific primitive draw call(s).
    ///
    /// The fixed post-steps (child recursion for containers, label
    /// overlay) are owned by the tree walker.
    pub(crate) fn paint_primitive(&self, painter: &mut dyn Painter) {
        match &self.kind {
            ShapeKind::Rectangle | ShapeKind::Nesting(_) => {
                painter.draw_rect(self.x, self.y, self.width, self.height);
            }
            ShapeKind::Oval => painter.draw_oval(self.x, self.y, self.width, self.height),
            ShapeKind::Gem => {
                let points = gem_vertices(self.x, self.y, self.width, self.height);
                painter.draw_polygon(&points);
            }
            ShapeKind::Dynamic(fill) => {
                if fill.filled {
                    let saved = painter.color();
                    painter.set_color(fill.color);
                    painter.fill_rect(self.x, self.y, self.width, self.height);
                    painter.set_color(saved);
                } else {
                    painter.draw_rect(self.x, self.y, self.width, self.height);
                }
            }
            ShapeKind::Image(bitmap) => {
                painter.draw_image(bitmap, self.x, self.y, self.width, self.height);
            }
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::rectangle(0, 0, DEFAULT_DELTA, DEFAULT_DELTA, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn sign_flipped(before: i32, after: i32) -> bool {
    (before < 0 && after > 0) || (before > 0 && after < 0)
}

/// Vertices of a gem outline, left-most vertex first, clockwise.
///
/// Small gems collapse the top and bottom pairs onto the vertical
/// midline; wider gems are hexagons with fixed corner insets.
fn gem_vertices(x: i32, y: i32, width: i32, height: i32) -> SmallVec<[(i32, i32); 6]> {
    let mut points = SmallVec::new();
    if width < GEM_SMALL_WIDTH {
        points.push((x, y + height / 2));
        points.push((x + width / 2, y));
        points.push((x + width, y + height / 2));
        points.push((x + width / 2, y + height));
    } else {
        points.push((x, y + height / 2));
        points.push((x + GEM_CORNER_INSET, y));
        points.push((x + width - GEM_CORNER_INSET, y));
        points.push((x + width, y + height / 2));
        points.push((x + width - GEM_CORNER_INSET, y + height));
        points.push((x + GEM_CORNER_INSET, y + height));
    }
    points
}
