//! Shape tests - rotation and the shape factory

use std::collections::HashSet;

use tstris::game::{Point, Shape, ShapeFactory, ShapeKind};

#[test]
fn test_clockwise_then_counter_clockwise_restores_every_shape() {
    for kind in ShapeKind::ALL {
        let original = Shape::new(kind);
        let mut shape = original.clone();
        shape.rotate_clockwise();
        shape.rotate_counter_clockwise();
        assert_eq!(shape.cells(), original.cells(), "{:?}", kind);
    }
}

#[test]
fn test_counter_clockwise_then_clockwise_restores_every_shape() {
    for kind in ShapeKind::ALL {
        let original = Shape::new(kind);
        let mut shape = original.clone();
        shape.rotate_counter_clockwise();
        shape.rotate_clockwise();
        assert_eq!(shape.cells(), original.cells(), "{:?}", kind);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in ShapeKind::ALL {
        let original = Shape::new(kind);
        let mut shape = original.clone();
        for _ in 0..4 {
            shape.rotate_clockwise();
        }
        assert_eq!(shape.cells(), original.cells(), "{:?}", kind);
    }
}

#[test]
fn test_t_rotate_clockwise() {
    let mut shape = Shape::new(ShapeKind::T);
    shape.rotate_clockwise();
    assert_eq!(
        shape.cells(),
        &[
            vec![false, true, false],
            vec![false, true, true],
            vec![false, true, false],
        ]
    );
}

#[test]
fn test_t_rotate_counter_clockwise() {
    let mut shape = Shape::new(ShapeKind::T);
    shape.rotate_counter_clockwise();
    assert_eq!(
        shape.cells(),
        &[
            vec![false, true, false],
            vec![true, true, false],
            vec![false, true, false],
        ]
    );
}

#[test]
fn test_i_rotate_clockwise_is_vertical() {
    let mut shape = Shape::new(ShapeKind::I);
    shape.rotate_clockwise();
    for row in shape.cells() {
        assert_eq!(row, &vec![false, false, true, false]);
    }
}

#[test]
fn test_shapes_are_square_with_four_blocks() {
    for kind in ShapeKind::ALL {
        let shape = Shape::new(kind);
        assert!(shape.cells().iter().all(|row| row.len() == shape.size()));
        assert_eq!(shape.blocks().len(), 4, "{:?}", kind);
        assert_eq!(shape.origin(), Point::new(0, 0));
        assert_eq!(shape.kind(), kind);
    }
}

#[test]
fn test_shapes_have_distinct_colors_and_patterns() {
    let colors: HashSet<_> = ShapeKind::ALL.iter().map(|&k| Shape::new(k).color()).collect();
    assert_eq!(colors.len(), 7);

    let patterns: HashSet<_> = ShapeKind::ALL
        .iter()
        .map(|&k| Shape::new(k).cells().to_vec())
        .collect();
    assert_eq!(patterns.len(), 7);
}

#[test]
fn test_blocks_follow_origin() {
    let shape = Shape::new(ShapeKind::O).with_origin(Point::new(3, 7));
    assert_eq!(shape.blocks(), vec![(3, 7), (4, 7), (3, 8), (4, 8)]);
}

#[test]
fn test_factory_same_seed_same_sequence() {
    let mut a = ShapeFactory::from_seed(42);
    let mut b = ShapeFactory::from_seed(42);
    for _ in 0..50 {
        assert_eq!(a.random_shape().kind(), b.random_shape().kind());
    }
}

#[test]
fn test_factory_produces_every_kind() {
    let mut factory = ShapeFactory::from_seed(7);
    let kinds: HashSet<_> = (0..500).map(|_| factory.random_shape().kind()).collect();
    assert_eq!(kinds.len(), 7);
}

#[test]
fn test_factory_shapes_match_canonical_constructors() {
    let mut factory = ShapeFactory::from_seed(11);
    for _ in 0..20 {
        let shape = factory.random_shape();
        assert_eq!(shape, Shape::new(shape.kind()));
    }
}
