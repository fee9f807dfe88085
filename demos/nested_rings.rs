use polygon_algebra::{
    core::math::vec2,
    fill, hole, polygon,
    polygon::{internal::boundary_tree::RingBoundaryTree, Polygon, Ring},
    ring, PolygonError,
};

fn square(min: f64, max: f64) -> Ring<f64> {
    ring![(min, min), (max, min), (max, max), (min, max)]
}

fn main() {
    env_logger::init();

    chess_board_nesting();
    explicit_flags();
}

fn chess_board_nesting() {
    println!("Concentric squares alternate fill and hole...");

    // inserted out of order, nesting is independent of ring order
    let rings = vec![
        square(4.0, 16.0),
        square(0.0, 20.0),
        square(8.0, 12.0),
        square(6.0, 14.0),
        square(2.0, 18.0),
    ];
    let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
    for i in 0..rings.len() {
        println!(
            "  ring {}: depth {:?}, parent {:?}, hole {:?}",
            i,
            tree.depth(i),
            tree.parent(i),
            tree.is_hole(i)
        );
    }

    assert_eq!(tree.roots(), &[1]);
    assert_eq!(tree.is_hole(2), Some(false));
    assert!(tree.contains_point(vec2(1.0, 1.0)));
    assert!(!tree.contains_point(vec2(3.0, 3.0)));
    assert!(tree.contains_point(vec2(10.0, 10.0)));

    let p = Polygon::from_rings(rings);
    // 400 - 256 + 144 - 64 + 16
    assert!((p.area().unwrap() - 240.0).abs() < 1e-8);
}

fn explicit_flags() {
    println!("Explicit hole flags...");

    // a root level hole describes everything outside it
    let unbounded = polygon![hole![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
    assert!(unbounded.contains_point(vec2(5.0, 5.0)).unwrap());
    assert!(!unbounded.contains_point(vec2(0.5, 0.5)).unwrap());

    // an explicit fill nested in an unflagged ring turns that ring into a hole
    let outside_with_island = polygon![
        square(0.0, 10.0),
        fill![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)],
    ];
    assert!(outside_with_island.contains_point(vec2(50.0, 0.0)).unwrap());
    assert!(!outside_with_island.contains_point(vec2(1.0, 1.0)).unwrap());
    assert!(outside_with_island.contains_point(vec2(5.0, 5.0)).unwrap());

    // sibling rings disagreeing on their flags
    let conflicting = polygon![
        square(0.0, 10.0),
        hole![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)],
        fill![(5.0, 5.0), (7.0, 5.0), (7.0, 7.0), (5.0, 7.0)],
    ];
    let err = conflicting.boundary_tree(1e-5).unwrap_err();
    println!("  {}", err);
    assert_eq!(err, PolygonError::InconsistentHoleFlags { ring_index: 2 });
}
