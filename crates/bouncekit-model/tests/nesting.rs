//! Tests of the composite contract: attach, detach, child queries and
//! the recursive movement/paint walkers.

use bouncekit_core::{Extent, RecordingPainter, StructureError};
use bouncekit_model::{Shape, ShapeId, ShapeTree};

struct Fixture {
    tree: ShapeTree,
    top: ShapeId,
    mid: ShapeId,
    bottom: ShapeId,
    simple: ShapeId,
}

/// Builds a composition with the following structure under the root:
/// container `top` (100x100) holding container `mid` (50x50) holding
/// container `bottom` (10x10 at (5,5)) and rectangle `simple`
/// (5x5 at (1,1)).
fn fixture() -> Fixture {
    let mut tree = ShapeTree::new(Extent::new(500, 500));
    let top = tree.insert(Shape::nesting(0, 0, 2, 2, 100, 100));
    let mid = tree.insert(Shape::nesting(0, 0, 2, 2, 50, 50));
    let bottom = tree.insert(Shape::nesting(5, 5, 2, 2, 10, 10));
    let simple = tree.insert(Shape::rectangle(1, 1, 1, 1, 5, 5));

    tree.attach(mid, bottom).unwrap();
    tree.attach(mid, simple).unwrap();
    tree.attach(top, mid).unwrap();
    let root = tree.root();
    tree.attach(root, top).unwrap();

    Fixture {
        tree,
        top,
        mid,
        bottom,
        simple,
    }
}

#[test]
fn basic_movement_and_painting() {
    let mut f = fixture();

    f.tree.step(Extent::new(500, 500));

    let mut painter = RecordingPainter::new();
    f.tree.paint_node(f.top, &mut painter);
    assert_eq!(
        painter.log(),
        "(rectangle 2,2,100,100)(translate 2,2)(rectangle 2,2,50,50)(translate 2,2)\
         (rectangle 7,7,10,10)(translate 7,7)(translate -7,-7)(rectangle 2,2,5,5)\
         (translate -2,-2)(translate -2,-2)"
    );
}

#[test]
fn attach_links_both_directions() {
    let f = fixture();

    assert_eq!(f.tree.get(f.mid).unwrap().parent(), Some(f.top));
    assert!(f.tree.contains(f.top, f.mid));

    assert_eq!(f.tree.get(f.bottom).unwrap().parent(), Some(f.mid));
    assert!(f.tree.contains(f.mid, f.bottom));
}

#[test]
fn attach_rejects_child_of_another_container() {
    let mut f = fixture();

    let err = f.tree.attach(f.top, f.bottom).unwrap_err();
    assert_eq!(err, StructureError::AlreadyAttached);

    // State of both containers is unchanged.
    assert!(!f.tree.contains(f.top, f.bottom));
    assert_eq!(f.tree.get(f.bottom).unwrap().parent(), Some(f.mid));
}

#[test]
fn attach_rejects_shape_that_does_not_fit() {
    let mut f = fixture();
    let rectangle = f.tree.insert(Shape::rectangle(80, 80, 2, 2, 50, 50));

    let err = f.tree.attach(f.top, rectangle).unwrap_err();
    assert_eq!(
        err,
        StructureError::DoesNotFit {
            right: 130,
            bottom: 130,
            bound_width: 100,
            bound_height: 100,
        }
    );
    assert!(!f.tree.contains(f.top, rectangle));
    assert_eq!(f.tree.get(rectangle).unwrap().parent(), None);
}

#[test]
fn attach_rejects_non_container_parent() {
    let mut f = fixture();
    let orphan = f.tree.insert(Shape::rectangle(0, 0, 1, 1, 5, 5));

    let err = f.tree.attach(f.simple, orphan).unwrap_err();
    assert_eq!(err, StructureError::NotAContainer);
}

#[test]
fn attach_rejects_self_and_descendant_destinations() {
    let mut f = fixture();

    // Detach mid so its parent slot is free, then try to hang it
    // below its own subtree.
    f.tree.detach(f.mid);
    assert_eq!(f.tree.attach(f.bottom, f.mid).unwrap_err(), StructureError::WouldCreateCycle);
}

#[test]
fn attach_rejects_the_root_as_a_child() {
    let mut f = fixture();
    let root = f.tree.root();
    assert_eq!(
        f.tree.attach(f.top, root).unwrap_err(),
        StructureError::WouldCreateCycle
    );
}

#[test]
fn detach_breaks_the_two_way_link() {
    let mut f = fixture();

    assert_eq!(f.tree.detach(f.mid), Some((f.top, 0)));
    assert!(!f.tree.contains(f.top, f.mid));
    assert_eq!(f.tree.get(f.mid).unwrap().parent(), None);
}

#[test]
fn detach_of_unattached_shape_is_a_no_op() {
    let mut f = fixture();
    let orphan = f.tree.insert(Shape::rectangle(0, 0, 1, 1, 5, 5));

    assert_eq!(f.tree.detach(orphan), None);
}

#[test]
fn shape_at_returns_the_child_at_a_position() {
    let f = fixture();

    assert_eq!(f.tree.shape_at(f.top, 0).unwrap(), f.mid);
    assert_eq!(f.tree.shape_at(f.mid, 1).unwrap(), f.simple);
}

#[test]
fn shape_at_rejects_an_invalid_index() {
    let f = fixture();

    let err = f.tree.shape_at(f.top, 1).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.count, 1);
}

#[test]
fn child_count_on_empty_and_populated_containers() {
    let f = fixture();

    assert_eq!(f.tree.child_count(f.bottom), 0);
    assert_eq!(f.tree.child_count(f.mid), 2);
    assert_eq!(f.tree.child_count(f.simple), 0);
}

#[test]
fn index_of_returns_position_or_none() {
    let f = fixture();

    assert_eq!(f.tree.index_of(f.top, f.mid), Some(0));
    assert_eq!(f.tree.index_of(f.mid, f.simple), Some(1));
    assert_eq!(f.tree.index_of(f.top, f.bottom), None);
}

#[test]
fn path_runs_from_root_to_shape() {
    let f = fixture();

    let path = f.tree.path(f.simple);
    assert_eq!(path, vec![f.tree.root(), f.top, f.mid, f.simple]);
}

#[test]
fn path_of_detached_shape_is_a_singleton() {
    let mut f = fixture();
    let orphan = f.tree.insert(Shape::oval(0, 0, 1, 1, 5, 5));

    assert_eq!(f.tree.path(orphan), vec![orphan]);

    f.tree.detach(f.mid);
    assert_eq!(f.tree.path(f.mid), vec![f.mid]);

    // Its own subtree is still intact below it.
    assert_eq!(f.tree.path(f.simple), vec![f.mid, f.simple]);
}

#[test]
fn children_reports_insertion_order() {
    let f = fixture();
    assert_eq!(f.tree.children(f.mid), &[f.bottom, f.simple]);
}

#[test]
fn descendants_walks_preorder() {
    let f = fixture();
    assert_eq!(
        f.tree.descendants(f.top),
        vec![f.top, f.mid, f.bottom, f.simple]
    );
}
