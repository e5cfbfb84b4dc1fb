//! The shape model: the sole entry point for structural mutation and
//! the single source of change events.
//!
//! Every operation is synchronous and runs to completion, including
//! delivery of its event to all listeners, before returning. The model
//! is mutated by one logical control thread; listener notification is
//! not reentrant-safe and listeners receive the model by shared
//! reference only.

use std::rc::Rc;

use bouncekit_core::{Extent, OutOfRangeError, Painter, StructureError};
use tracing::debug;

use crate::event::{ShapeModelEvent, SharedListener};
use crate::shape::{Shape, ShapeId};
use crate::tree::ShapeTree;

/// A shape composition animating inside fixed world bounds.
pub struct ShapeModel {
    tree: ShapeTree,
    bounds: Extent,
    held: Option<ShapeId>,
    listeners: Vec<SharedListener>,
}

impl ShapeModel {
    /// Creates a model with the given world bounds. The root container
    /// is created at the origin with zero velocity and those bounds.
    pub fn new(bounds: Extent) -> Self {
        Self {
            tree: ShapeTree::new(bounds),
            bounds,
            held: None,
            listeners: Vec::new(),
        }
    }

    /// The world bounds governing root movement.
    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    /// The root container.
    pub fn root(&self) -> ShapeId {
        self.tree.root()
    }

    /// Read access to the composition tree.
    pub fn tree(&self) -> &ShapeTree {
        &self.tree
    }

    /// Looks up a shape by id.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.tree.get(id)
    }

    /// The shape currently held for pasting, if any.
    pub fn held(&self) -> Option<ShapeId> {
        self.held
    }

    /// Attempts to add a new shape under `parent`.
    ///
    /// On success the shape is appended to `parent`'s child sequence,
    /// one `Added` event is fired and the shape's id is returned. On
    /// failure nothing is mutated, nothing fires, and the reason is
    /// returned by value.
    pub fn add(&mut self, shape: Shape, parent: ShapeId) -> Result<ShapeId, StructureError> {
        let id = self.tree.insert(shape);
        match self.tree.attach(parent, id) {
            Ok(index) => {
                debug!(?id, ?parent, index, "shape added");
                self.fire(ShapeModelEvent::added(id, parent, index));
                Ok(id)
            }
            Err(err) => {
                self.tree.discard(id);
                debug!(?parent, %err, "add rejected");
                Err(err)
            }
        }
    }

    /// Removes a shape from its parent. A no-op when the shape is not
    /// attached; otherwise fires one `Removed` event carrying the
    /// former parent and index, captured before detaching.
    pub fn remove(&mut self, id: ShapeId) {
        if let Some((former_parent, index)) = self.tree.detach(id) {
            debug!(?id, ?former_parent, index, "shape removed");
            self.fire(ShapeModelEvent::removed(id, former_parent, index));
        }
    }

    /// Progresses the animation one tick and fires exactly one `Moved`
    /// event naming the root, regardless of how many shapes changed
    /// position. Listeners needing finer-grained updates must treat it
    /// as a full-resync signal.
    pub fn clock(&mut self) {
        self.tree.step(self.bounds);
        self.fire(ShapeModelEvent::moved(self.tree.root(), None, None));
    }

    /// Detaches a shape like [`Self::remove`] and additionally marks
    /// it as held for a later [`Self::paste`].
    pub fn cut(&mut self, id: ShapeId) {
        if self.tree.get(id).is_none() {
            return;
        }
        if let Some((former_parent, index)) = self.tree.detach(id) {
            debug!(?id, ?former_parent, index, "shape cut");
            self.fire(ShapeModelEvent::removed(id, former_parent, index));
        }
        self.held = Some(id);
    }

    /// Attempts to re-parent a shape under `destination`.
    ///
    /// A no-op success when `destination` already contains the shape.
    /// Fails, firing nothing and mutating nothing, when the request
    /// would create a cycle or the shape's size does not fit the
    /// destination's current bounds. Otherwise the shape is detached
    /// from any current parent (firing `Removed`), its position is
    /// clamped into the destination's frame, and it is attached
    /// (firing `Added`).
    pub fn paste(&mut self, id: ShapeId, destination: ShapeId) -> Result<(), StructureError> {
        let dest = self
            .tree
            .get(destination)
            .ok_or(StructureError::UnknownShape)?;
        if !dest.is_container() {
            return Err(StructureError::NotAContainer);
        }
        let (dest_width, dest_height) = (dest.width(), dest.height());

        let shape = self.tree.get(id).ok_or(StructureError::UnknownShape)?;
        let (width, height) = (shape.width(), shape.height());

        if self.tree.contains(destination, id) {
            return Ok(());
        }
        if id == destination || self.tree.is_ancestor(id, destination) {
            debug!(?id, ?destination, "paste rejected, would create a cycle");
            return Err(StructureError::WouldCreateCycle);
        }
        if width > dest_width || height > dest_height {
            debug!(?id, ?destination, "paste rejected, does not fit");
            return Err(StructureError::DoesNotFit {
                right: width,
                bottom: height,
                bound_width: dest_width,
                bound_height: dest_height,
            });
        }

        if let Some((former_parent, index)) = self.tree.detach(id) {
            self.fire(ShapeModelEvent::removed(id, former_parent, index));
        }

        // Fit was checked against the unchanged size; only the
        // position is pulled into the destination's frame.
        {
            let shape = self.tree.get_mut(id).ok_or(StructureError::UnknownShape)?;
            shape.x = shape.x.clamp(0, dest_width - width);
            shape.y = shape.y.clamp(0, dest_height - height);
        }

        let index = self.tree.attach(destination, id)?;
        debug!(?id, ?destination, index, "shape pasted");
        self.fire(ShapeModelEvent::added(id, destination, index));
        if self.held == Some(id) {
            self.held = None;
        }
        Ok(())
    }

    /// Registers a listener. Listeners are notified in registration
    /// order; no duplicate suppression is performed.
    pub fn add_shape_model_listener(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
    }

    /// Unregisters a listener by handle identity. A no-op when the
    /// listener is not registered.
    pub fn remove_shape_model_listener(&mut self, listener: &SharedListener) {
        self.listeners.retain(|held| !Rc::ptr_eq(held, listener));
    }

    /// Paints the whole composition starting at the root.
    pub fn paint(&self, painter: &mut dyn Painter) {
        self.tree.paint(painter);
    }

    // Composite queries, delegated to the tree.

    /// The parent of a shape, `None` for the root or a detached shape.
    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.tree.get(id).and_then(Shape::parent)
    }

    /// Direct children of a container in insertion order.
    pub fn children(&self, parent: ShapeId) -> &[ShapeId] {
        self.tree.children(parent)
    }

    /// Number of direct children of a container.
    pub fn child_count(&self, parent: ShapeId) -> usize {
        self.tree.child_count(parent)
    }

    /// The child at `index` within `parent`.
    pub fn shape_at(&self, parent: ShapeId, index: usize) -> Result<ShapeId, OutOfRangeError> {
        self.tree.shape_at(parent, index)
    }

    /// Position of `child` within `parent`, `None` when absent.
    pub fn index_of(&self, parent: ShapeId, child: ShapeId) -> Option<usize> {
        self.tree.index_of(parent, child)
    }

    /// Whether `parent` directly contains `child`.
    pub fn contains(&self, parent: ShapeId, child: ShapeId) -> bool {
        self.tree.contains(parent, child)
    }

    /// Path from the root (or highest detached ancestor) to `id`.
    pub fn path(&self, id: ShapeId) -> Vec<ShapeId> {
        self.tree.path(id)
    }

    fn fire(&mut self, event: ShapeModelEvent) {
        // Snapshot the registration list so delivery order is fixed
        // for this event even if a listener could be dropped by
        // external code mid-delivery.
        let listeners = self.listeners.clone();
        for listener in listeners {
            listener.borrow_mut().model_changed(self, &event);
        }
    }
}
