//! Tests of the tree and table adapters: single-element diffs for
//! structural events, full resync for movement.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use bouncekit_core::Extent;
use bouncekit_model::{Shape, ShapeModel};
use bouncekit_views::{TableModelAdapter, TableView, TreeChange, TreeModelAdapter, TreeView};

#[derive(Default)]
struct TreeLog {
    inserted: Vec<TreeChange>,
    removed: Vec<TreeChange>,
}

impl TreeView for TreeLog {
    fn nodes_inserted(&mut self, change: &TreeChange) {
        self.inserted.push(change.clone());
    }

    fn nodes_removed(&mut self, change: &TreeChange) {
        self.removed.push(change.clone());
    }
}

#[derive(Default)]
struct TableLog {
    inserted: Vec<Range<usize>>,
    removed: Vec<Range<usize>>,
    resyncs: usize,
}

impl TableView for TableLog {
    fn rows_inserted(&mut self, range: Range<usize>) {
        self.inserted.push(range);
    }

    fn rows_removed(&mut self, range: Range<usize>) {
        self.removed.push(range);
    }

    fn resynced(&mut self) {
        self.resyncs += 1;
    }
}

#[test]
fn tree_adapter_projects_additions_into_single_element_diffs() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();

    let adapter = Rc::new(RefCell::new(TreeModelAdapter::new()));
    let view = Rc::new(RefCell::new(TreeLog::default()));
    adapter.borrow_mut().add_tree_view(view.clone());
    model.add_shape_model_listener(adapter.clone());

    let nest = model.add(Shape::nesting(0, 0, 1, 1, 100, 100), root).unwrap();
    let leaf = model.add(Shape::rectangle(0, 0, 1, 1, 10, 10), nest).unwrap();

    let log = view.borrow();
    assert_eq!(log.inserted.len(), 2);
    assert_eq!(
        log.inserted[0],
        TreeChange {
            parent_path: vec![root],
            index: 0,
            child: nest,
        }
    );
    assert_eq!(
        log.inserted[1],
        TreeChange {
            parent_path: vec![root, nest],
            index: 0,
            child: leaf,
        }
    );
    assert!(log.removed.is_empty());
}

#[test]
fn tree_adapter_projects_removal_with_pre_removal_index() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();
    let nest = model.add(Shape::nesting(0, 0, 1, 1, 100, 100), root).unwrap();
    let first = model.add(Shape::rectangle(0, 0, 1, 1, 10, 10), nest).unwrap();
    let second = model.add(Shape::oval(0, 0, 1, 1, 10, 10), nest).unwrap();

    let adapter = Rc::new(RefCell::new(TreeModelAdapter::new()));
    let view = Rc::new(RefCell::new(TreeLog::default()));
    adapter.borrow_mut().add_tree_view(view.clone());
    model.add_shape_model_listener(adapter.clone());

    model.remove(second);

    let log = view.borrow();
    assert_eq!(log.removed.len(), 1);
    assert_eq!(
        log.removed[0],
        TreeChange {
            parent_path: vec![root, nest],
            index: 1,
            child: second,
        }
    );
    assert_eq!(model.children(nest), &[first]);
}

#[test]
fn tree_adapter_ignores_movement() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();
    model.add(Shape::rectangle(0, 0, 1, 1, 10, 10), root).unwrap();

    let adapter = Rc::new(RefCell::new(TreeModelAdapter::new()));
    let view = Rc::new(RefCell::new(TreeLog::default()));
    adapter.borrow_mut().add_tree_view(view.clone());
    model.add_shape_model_listener(adapter.clone());

    model.clock();

    let log = view.borrow();
    assert!(log.inserted.is_empty());
    assert!(log.removed.is_empty());
}

#[test]
fn table_adapter_starts_from_the_current_model_state() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();
    let nest = model.add(Shape::nesting(0, 0, 1, 1, 100, 100), root).unwrap();
    model.add(Shape::rectangle(3, 4, 1, 2, 10, 20), nest).unwrap();

    let adapter = TableModelAdapter::new(&model);
    let rows = adapter.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].kind, "container");
    assert_eq!(rows[0].depth, 0);
    assert_eq!(rows[1].kind, "rectangle");
    assert_eq!(rows[1].depth, 1);
    assert_eq!((rows[1].x, rows[1].y), (3, 4));
    assert_eq!((rows[1].width, rows[1].height), (10, 20));
}

#[test]
fn table_adapter_inserts_subtree_rows_as_one_contiguous_range() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();
    let first = model.add(Shape::rectangle(0, 0, 1, 1, 10, 10), root).unwrap();

    let adapter = Rc::new(RefCell::new(TableModelAdapter::new(&model)));
    let view = Rc::new(RefCell::new(TableLog::default()));
    adapter.borrow_mut().add_table_view(view.clone());
    model.add_shape_model_listener(adapter.clone());

    // Build a detached-to-be subtree by adding a container and a child
    // into it; each add is its own single-row diff.
    let nest = model.add(Shape::nesting(0, 0, 1, 1, 100, 100), root).unwrap();
    let inner = model.add(Shape::oval(0, 0, 1, 1, 10, 10), nest).unwrap();

    {
        let log = view.borrow();
        assert_eq!(log.inserted.as_slice(), &[1..2, 2..3]);
    }

    // Re-parenting the container elsewhere moves both of its rows:
    // one removal of the contiguous range, one insertion of both rows.
    model.cut(nest);
    model.paste(nest, root).unwrap();

    let log = view.borrow();
    assert_eq!(log.removed.as_slice(), &[1..3]);
    assert_eq!(log.inserted.as_slice(), &[1..2, 2..3, 1..3]);

    let adapter = adapter.borrow();
    let rows = adapter.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, first);
    assert_eq!(rows[1].id, nest);
    assert_eq!(rows[2].id, inner);
}

#[test]
fn table_adapter_resyncs_on_movement() {
    let mut model = ShapeModel::new(Extent::new(500, 500));
    let root = model.root();
    let leaf = model.add(Shape::rectangle(0, 0, 3, 4, 10, 10), root).unwrap();

    let adapter = Rc::new(RefCell::new(TableModelAdapter::new(&model)));
    let view = Rc::new(RefCell::new(TableLog::default()));
    adapter.borrow_mut().add_table_view(view.clone());
    model.add_shape_model_listener(adapter.clone());

    model.clock();

    assert_eq!(view.borrow().resyncs, 1);
    let adapter = adapter.borrow();
    let rows = adapter.rows();
    assert_eq!(rows[0].id, leaf);
    assert_eq!((rows[0].x, rows[0].y), (3, 4));
}
