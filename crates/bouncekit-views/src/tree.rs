//! Adapter projecting model events onto a tree-structure view.
//!
//! `Added` and `Removed` become single-element structural diffs: one
//! child, one index, one parent path. `Moved` leaves the tree
//! structure untouched and produces nothing.

use std::cell::RefCell;
use std::rc::Rc;

use bouncekit_model::{EventKind, ShapeId, ShapeModel, ShapeModelEvent, ShapeModelListener};

/// A single-element tree diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    /// Path from the root to the (former) parent of the child.
    pub parent_path: Vec<ShapeId>,
    /// The child's index within the parent; for removals, the index it
    /// occupied before removal.
    pub index: usize,
    /// The inserted or removed child.
    pub child: ShapeId,
}

/// Tree-view update protocol.
pub trait TreeView {
    /// One node was inserted.
    fn nodes_inserted(&mut self, change: &TreeChange);
    /// One node was removed.
    fn nodes_removed(&mut self, change: &TreeChange);
}

/// Shared handle to a registered tree view.
pub type SharedTreeView = Rc<RefCell<dyn TreeView>>;

/// Projects [`ShapeModelEvent`]s into [`TreeChange`] notifications for
/// registered tree views.
#[derive(Default)]
pub struct TreeModelAdapter {
    views: Vec<SharedTreeView>,
}

impl TreeModelAdapter {
    /// Creates an adapter with no registered views.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tree view; notified in registration order.
    pub fn add_tree_view(&mut self, view: SharedTreeView) {
        self.views.push(view);
    }

    /// Unregisters a tree view by handle identity; no-op when absent.
    pub fn remove_tree_view(&mut self, view: &SharedTreeView) {
        self.views.retain(|held| !Rc::ptr_eq(held, view));
    }
}

impl ShapeModelListener for TreeModelAdapter {
    fn model_changed(&mut self, model: &ShapeModel, event: &ShapeModelEvent) {
        if event.kind() == EventKind::Moved {
            return;
        }
        let (Some(parent), Some(index)) = (event.parent(), event.index()) else {
            return;
        };
        let change = TreeChange {
            parent_path: model.path(parent),
            index,
            child: event.operand(),
        };
        let inserted = event.kind() == EventKind::Added;
        for view in &self.views {
            let mut view = view.borrow_mut();
            if inserted {
                view.nodes_inserted(&change);
            } else {
                view.nodes_removed(&change);
            }
        }
    }
}
