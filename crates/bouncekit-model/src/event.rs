//! Model change events and the listener capability.
//!
//! A [`ShapeModelEvent`] describes exactly one logical change to a
//! [`crate::ShapeModel`]. Events are built immediately before firing,
//! delivered synchronously to every registered listener in
//! registration order, and never retained by the model.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::ShapeModel;
use crate::shape::ShapeId;

/// The kinds of change a model reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A shape was attached to a container.
    Added,
    /// A shape was detached from its container.
    Removed,
    /// The tree moved; the operand is the root and the whole tree may
    /// have changed.
    Moved,
}

/// Immutable record of one structural or movement change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeModelEvent {
    kind: EventKind,
    operand: ShapeId,
    parent: Option<ShapeId>,
    index: Option<usize>,
}

impl ShapeModelEvent {
    pub(crate) fn added(operand: ShapeId, parent: ShapeId, index: usize) -> Self {
        Self {
            kind: EventKind::Added,
            operand,
            parent: Some(parent),
            index: Some(index),
        }
    }

    pub(crate) fn removed(operand: ShapeId, former_parent: ShapeId, index: usize) -> Self {
        Self {
            kind: EventKind::Removed,
            operand,
            parent: Some(former_parent),
            index: Some(index),
        }
    }

    pub(crate) fn moved(operand: ShapeId, parent: Option<ShapeId>, index: Option<usize>) -> Self {
        Self {
            kind: EventKind::Moved,
            operand,
            parent,
            index,
        }
    }

    /// The kind of change.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The shape the event applies to.
    pub fn operand(&self) -> ShapeId {
        self.operand
    }

    /// The relevant container: the new parent for `Added`, the former
    /// parent for `Removed`, the parent at firing time for `Moved`.
    /// `None` when the operand has no parent (the root case).
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    /// The operand's position within [`Self::parent`] at the time of
    /// the event; for `Removed`, the position it occupied before
    /// removal. `None` when the operand has no parent.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl std::fmt::Display for ShapeModelEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EventKind::Added => write!(
                f,
                "shape {:?} added to {:?} at index {}",
                self.operand,
                self.parent,
                self.index.unwrap_or_default()
            ),
            EventKind::Removed => write!(
                f,
                "shape {:?} removed from {:?}, formerly at index {}",
                self.operand,
                self.parent,
                self.index.unwrap_or_default()
            ),
            EventKind::Moved => write!(f, "tree moved, root {:?}", self.operand),
        }
    }
}

/// Listener capability for model changes.
///
/// The model is handed back by shared reference, so a listener can
/// query the tree but cannot mutate it from within a notification.
pub trait ShapeModelListener {
    /// Called once per logical change, before the mutating call
    /// returns.
    fn model_changed(&mut self, model: &ShapeModel, event: &ShapeModelEvent);
}

/// How listeners are held and registered: a shared, interiorly mutable
/// handle. Registration identity is pointer identity of the handle.
pub type SharedListener = Rc<RefCell<dyn ShapeModelListener>>;
