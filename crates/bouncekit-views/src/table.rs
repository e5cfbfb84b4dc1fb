//! Adapter maintaining a tabular projection of the shape tree.
//!
//! Rows are the pre-order flattening of the tree below the root, one
//! row per shape. `Added` and `Removed` translate into contiguous row
//! range insertions and deletions; `Moved` rebuilds every row and
//! signals a full resync, since a single `Moved` event means the whole
//! tree may have changed.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use bouncekit_model::{EventKind, ShapeId, ShapeModel, ShapeModelEvent, ShapeModelListener};

/// One row of the tabular view: a snapshot of a shape's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRow {
    /// The shape this row mirrors.
    pub id: ShapeId,
    /// Kind label, e.g. `"rectangle"` or `"container"`.
    pub kind: &'static str,
    /// Nesting depth below the root, zero for top-level shapes.
    pub depth: usize,
    /// X position within the parent frame.
    pub x: i32,
    /// Y position within the parent frame.
    pub y: i32,
    /// Horizontal velocity.
    pub delta_x: i32,
    /// Vertical velocity.
    pub delta_y: i32,
    /// Bounding box width.
    pub width: i32,
    /// Bounding box height.
    pub height: i32,
    /// Label text, if any.
    pub text: Option<String>,
}

/// Table-view update protocol.
pub trait TableView {
    /// Rows in `range` were inserted.
    fn rows_inserted(&mut self, range: Range<usize>);
    /// Rows formerly in `range` were removed.
    fn rows_removed(&mut self, range: Range<usize>);
    /// Every row may have changed; re-read the whole table.
    fn resynced(&mut self);
}

/// Shared handle to a registered table view.
pub type SharedTableView = Rc<RefCell<dyn TableView>>;

/// Maintains [`ShapeRow`]s in sync with a [`ShapeModel`] and notifies
/// registered table views of the diffs.
pub struct TableModelAdapter {
    rows: Vec<ShapeRow>,
    views: Vec<SharedTableView>,
}

impl TableModelAdapter {
    /// Creates an adapter primed with the model's current state.
    pub fn new(model: &ShapeModel) -> Self {
        Self {
            rows: flatten(model),
            views: Vec::new(),
        }
    }

    /// The current rows, pre-order.
    pub fn rows(&self) -> &[ShapeRow] {
        &self.rows
    }

    /// Registers a table view; notified in registration order.
    pub fn add_table_view(&mut self, view: SharedTableView) {
        self.views.push(view);
    }

    /// Unregisters a table view by handle identity; no-op when absent.
    pub fn remove_table_view(&mut self, view: &SharedTableView) {
        self.views.retain(|held| !Rc::ptr_eq(held, view));
    }

    fn resync(&mut self, model: &ShapeModel) {
        self.rows = flatten(model);
        for view in &self.views {
            view.borrow_mut().resynced();
        }
    }

    fn insert_subtree(&mut self, model: &ShapeModel, operand: ShapeId) {
        let order = preorder_ids(model);
        let Some(start) = order.iter().position(|&id| id == operand) else {
            // The operand is not reachable from the root; fall back to
            // a full rebuild rather than desynchronize.
            self.resync(model);
            return;
        };
        let depth = model.path(operand).len().saturating_sub(2);
        let mut inserted = Vec::new();
        collect_rows(model, operand, depth, &mut inserted);
        let count = inserted.len();
        self.rows.splice(start..start, inserted);
        for view in &self.views {
            view.borrow_mut().rows_inserted(start..start + count);
        }
    }

    fn remove_subtree(&mut self, model: &ShapeModel, operand: ShapeId) {
        let Some(start) = self.rows.iter().position(|row| row.id == operand) else {
            self.resync(model);
            return;
        };
        let depth = self.rows[start].depth;
        let mut end = start + 1;
        while end < self.rows.len() && self.rows[end].depth > depth {
            end += 1;
        }
        self.rows.drain(start..end);
        for view in &self.views {
            view.borrow_mut().rows_removed(start..end);
        }
    }
}

impl ShapeModelListener for TableModelAdapter {
    fn model_changed(&mut self, model: &ShapeModel, event: &ShapeModelEvent) {
        match event.kind() {
            EventKind::Added => self.insert_subtree(model, event.operand()),
            EventKind::Removed => self.remove_subtree(model, event.operand()),
            EventKind::Moved => self.resync(model),
        }
    }
}

fn make_row(model: &ShapeModel, id: ShapeId, depth: usize) -> Option<ShapeRow> {
    let shape = model.shape(id)?;
    Some(ShapeRow {
        id,
        kind: shape.kind().label(),
        depth,
        x: shape.x(),
        y: shape.y(),
        delta_x: shape.delta_x(),
        delta_y: shape.delta_y(),
        width: shape.width(),
        height: shape.height(),
        text: shape.text().map(str::to_owned),
    })
}

fn collect_rows(model: &ShapeModel, id: ShapeId, depth: usize, out: &mut Vec<ShapeRow>) {
    let Some(row) = make_row(model, id, depth) else {
        return;
    };
    out.push(row);
    for &child in model.children(id) {
        collect_rows(model, child, depth + 1, out);
    }
}

/// Pre-order rows for everything below the root.
fn flatten(model: &ShapeModel) -> Vec<ShapeRow> {
    let mut rows = Vec::new();
    for &child in model.children(model.root()) {
        collect_rows(model, child, 0, &mut rows);
    }
    rows
}

/// Pre-order ids for everything below the root.
fn preorder_ids(model: &ShapeModel) -> Vec<ShapeId> {
    let mut ids = Vec::new();
    for &child in model.children(model.root()) {
        collect_ids(model, child, &mut ids);
    }
    ids
}

fn collect_ids(model: &ShapeModel, id: ShapeId, out: &mut Vec<ShapeId>) {
    out.push(id);
    for &child in model.children(id) {
        collect_ids(model, child, out);
    }
}
