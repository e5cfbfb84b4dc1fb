//! The composition tree: an id arena of shapes plus the composite
//! contract (attach, detach, child queries) and the recursive
//! movement and paint walkers.
//!
//! Ownership is strictly tree shaped: the arena owns every node, a
//! container's child vector owns the ordering, and the parent link on
//! each node is a plain back-reference key used for path
//! reconstruction and removal. Detached nodes stay resident in the
//! arena and remain queryable until re-attached.

use bouncekit_core::{Extent, OutOfRangeError, Painter, StructureError};
use slotmap::SlotMap;

use crate::shape::{Shape, ShapeId};

/// Arena-backed shape composition rooted at a nesting container.
#[derive(Debug, Clone)]
pub struct ShapeTree {
    nodes: SlotMap<ShapeId, Shape>,
    root: ShapeId,
}

impl ShapeTree {
    /// Creates a tree whose root container sits at the origin with
    /// zero velocity and the given bounds.
    pub fn new(bounds: Extent) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Shape::nesting(0, 0, 0, 0, bounds.width, bounds.height));
        Self { nodes, root }
    }

    /// The root container. It has no parent and is never removable.
    pub fn root(&self) -> ShapeId {
        self.root
    }

    /// Looks up a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.nodes.get_mut(id)
    }

    /// Places a shape into the arena without attaching it anywhere.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        self.nodes.insert(shape)
    }

    pub(crate) fn discard(&mut self, id: ShapeId) {
        self.nodes.remove(id);
    }

    /// Attaches `child` to the end of `parent`'s child sequence.
    ///
    /// Fails without mutating anything when `parent` cannot hold
    /// children, `child` is already attached, the attachment would
    /// make a shape its own descendant, or `child`'s bounding box does
    /// not lie within `parent`'s bounds. Returns the index assigned to
    /// `child`.
    pub fn attach(&mut self, parent: ShapeId, child: ShapeId) -> Result<usize, StructureError> {
        if child == self.root {
            // The root is permanently owned by the tree; giving it a
            // parent would put the whole composition above itself.
            return Err(StructureError::WouldCreateCycle);
        }
        let parent_shape = self.nodes.get(parent).ok_or(StructureError::UnknownShape)?;
        if !parent_shape.is_container() {
            return Err(StructureError::NotAContainer);
        }
        let (bound_width, bound_height) = (parent_shape.width, parent_shape.height);

        let child_shape = self.nodes.get(child).ok_or(StructureError::UnknownShape)?;
        if child_shape.parent.is_some() {
            return Err(StructureError::AlreadyAttached);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(StructureError::WouldCreateCycle);
        }
        let right = child_shape.x + child_shape.width;
        let bottom = child_shape.y + child_shape.height;
        if right > bound_width || bottom > bound_height {
            return Err(StructureError::DoesNotFit {
                right,
                bottom,
                bound_width,
                bound_height,
            });
        }

        let index = match self.nodes.get_mut(parent).and_then(Shape::nest_mut) {
            Some(nest) => {
                nest.children.push(child);
                nest.children.len() - 1
            }
            None => return Err(StructureError::NotAContainer),
        };
        if let Some(shape) = self.nodes.get_mut(child) {
            shape.parent = Some(parent);
        }
        Ok(index)
    }

    /// Detaches a shape from its parent, clearing the back-reference.
    ///
    /// Returns the former parent and the index the shape occupied, or
    /// `None` when the shape was not attached (a deliberate no-op).
    /// The detached subtree stays in the arena.
    pub fn detach(&mut self, id: ShapeId) -> Option<(ShapeId, usize)> {
        let parent = self.nodes.get(id)?.parent?;
        let nest = self.nodes.get_mut(parent)?.nest_mut()?;
        let index = nest.children.iter().position(|&c| c == id)?;
        nest.children.remove(index);
        if let Some(shape) = self.nodes.get_mut(id) {
            shape.parent = None;
        }
        Some((parent, index))
    }

    /// The child at `index` within `parent`.
    pub fn shape_at(&self, parent: ShapeId, index: usize) -> Result<ShapeId, OutOfRangeError> {
        let children = self.children(parent);
        children
            .get(index)
            .copied()
            .ok_or(OutOfRangeError { index, count: children.len() })
    }

    /// Position of `child` within `parent`, `None` when absent.
    pub fn index_of(&self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Whether `parent` directly contains `child`.
    pub fn contains(&self, parent: ShapeId, child: ShapeId) -> bool {
        self.index_of(parent, child).is_some()
    }

    /// Number of direct children of `parent`; zero for leaves.
    pub fn child_count(&self, parent: ShapeId) -> usize {
        self.children(parent).len()
    }

    /// Direct children of `parent` in insertion order; empty for
    /// leaves and unknown ids.
    pub fn children(&self, parent: ShapeId) -> &[ShapeId] {
        self.nodes
            .get(parent)
            .and_then(Shape::nest)
            .map(|nest| nest.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `ancestor` lies strictly above `node` in the tree.
    pub fn is_ancestor(&self, ancestor: ShapeId, node: ShapeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|s| s.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|s| s.parent);
        }
        false
    }

    /// The path from the tree root (or the highest detached ancestor)
    /// down to `id`, inclusive. A detached, childless-chain shape
    /// yields a singleton path.
    pub fn path(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut path = vec![id];
        let mut current = self.nodes.get(id).and_then(|s| s.parent);
        while let Some(parent) = current {
            path.push(parent);
            current = self.nodes.get(parent).and_then(|s| s.parent);
        }
        path.reverse();
        path
    }

    /// Pre-order walk of `id` and everything below it.
    pub fn descendants(&self, id: ShapeId) -> Vec<ShapeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: ShapeId, out: &mut Vec<ShapeId>) {
        if !self.nodes.contains_key(id) {
            return;
        }
        out.push(id);
        for &child in self.children(id) {
            self.collect_descendants(child, out);
        }
    }

    /// Advances the whole tree one tick. The root bounces inside the
    /// world bounds; every child bounces inside its immediate
    /// container's current size.
    pub fn step(&mut self, bounds: Extent) {
        self.step_node(self.root, bounds.width, bounds.height);
    }

    fn step_node(&mut self, id: ShapeId, width: i32, height: i32) {
        let (own_width, own_height, children) = {
            let Some(shape) = self.nodes.get_mut(id) else {
                return;
            };
            shape.step(width, height);
            match shape.nest() {
                Some(nest) => (shape.width, shape.height, nest.children.clone()),
                None => return,
            }
        };
        for child in children {
            self.step_node(child, own_width, own_height);
        }
    }

    /// Paints the whole tree starting at the root.
    pub fn paint(&self, painter: &mut dyn Painter) {
        self.paint_node(self.root, painter);
    }

    /// Paints `id` and everything below it: the kind primitive first,
    /// then children in parent-relative coordinates between an exactly
    /// paired pair of translate calls, then the label overlay.
    pub fn paint_node(&self, id: ShapeId, painter: &mut dyn Painter) {
        let Some(shape) = self.nodes.get(id) else {
            return;
        };
        shape.paint_primitive(painter);
        if let Some(nest) = shape.nest() {
            painter.translate(shape.x, shape.y);
            for &child in &nest.children {
                self.paint_node(child, painter);
            }
            painter.translate(-shape.x, -shape.y);
        }
        if let Some(text) = shape.text() {
            painter.draw_centered_text(
                text,
                shape.x + shape.width / 2,
                shape.y + shape.height / 2,
            );
        }
    }
}
