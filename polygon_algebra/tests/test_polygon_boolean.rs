mod test_utils;

use polygon_algebra::{
    error::PolygonError,
    fill, hole,
    polygon::{
        difference, difference_opt, intersect, intersect_opt, union, xor, BooleanOp,
        CrossingStrategy, HoleFlag, Polygon, PolygonBooleanOptions, PolygonIntersectionOperation,
        Ring, RingOrientation,
    },
    ring,
};
use test_utils::{area_of, assert_spatially_eq, rect, square, ModifiedPolygonSet, TEST_EPS};

fn poly(rings: Vec<Ring<f64>>) -> Polygon<f64> {
    Polygon::from_rings(rings)
}

fn hole_of(mut ring: Ring<f64>) -> Ring<f64> {
    ring.hole = HoleFlag::Hole;
    ring
}

type BooleanFn = fn(
    Option<&Polygon<f64>>,
    Option<&Polygon<f64>>,
) -> Result<Option<Polygon<f64>>, PolygonError>;

const OPERATIONS: [(&str, BooleanFn); 4] = [
    ("intersect", intersect),
    ("union", union),
    ("difference", difference),
    ("xor", xor),
];

struct BooleanCase {
    a: Polygon<f64>,
    b: Polygon<f64>,
    intersect: Option<Polygon<f64>>,
    union: Option<Polygon<f64>>,
    difference: Option<Polygon<f64>>,
    xor: Option<Polygon<f64>>,
}

impl BooleanCase {
    fn expected(&self, op_name: &str) -> Option<&Polygon<f64>> {
        match op_name {
            "intersect" => self.intersect.as_ref(),
            "union" => self.union.as_ref(),
            "difference" => self.difference.as_ref(),
            _ => self.xor.as_ref(),
        }
    }

    /// Run all operations over every winding and start index modification of both arguments.
    fn run(&self, name: &str) {
        ModifiedPolygonSet::new(&self.a, true, true).accept_closure(&mut |a, a_state| {
            ModifiedPolygonSet::new(&self.b, true, true).accept_closure(&mut |b, b_state| {
                for (op_name, op) in OPERATIONS {
                    let result = op(Some(&a), Some(&b)).unwrap();
                    assert_spatially_eq(
                        result.as_ref(),
                        self.expected(op_name),
                        &format!("{name}: {op_name}, state a: {a_state:?}, state b: {b_state:?}"),
                    );
                }
            });
        });
    }
}

fn overlapping_squares() -> (Polygon<f64>, Polygon<f64>) {
    (poly(vec![square(0.0, 1.0)]), poly(vec![square(0.5, 1.5)]))
}

#[test]
fn overlapping_squares_scenario() {
    let (a, b) = overlapping_squares();
    let union_outline = ring![
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 0.5),
        (1.5, 0.5),
        (1.5, 1.5),
        (0.5, 1.5),
        (0.5, 1.0),
        (0.0, 1.0)
    ];
    BooleanCase {
        a,
        b,
        intersect: Some(poly(vec![square(0.5, 1.0)])),
        union: Some(poly(vec![union_outline.clone()])),
        difference: Some(poly(vec![ring![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.5),
            (0.5, 0.5),
            (0.5, 1.0),
            (0.0, 1.0)
        ]])),
        xor: Some(poly(vec![union_outline, hole_of(square(0.5, 1.0))])),
    }
    .run("overlapping squares");
}

#[test]
fn overlapping_squares_exact_output() {
    let (a, b) = overlapping_squares();

    let result = intersect(Some(&a), Some(&b)).unwrap().unwrap();
    assert_eq!(result.ring_count(), 1);
    assert_eq!(result.rings[0].point_count(), 4);
    assert_eq!(result.rings[0].hole, HoleFlag::Fill);

    let result = union(Some(&a), Some(&b)).unwrap().unwrap();
    assert_eq!(result.ring_count(), 1);
    assert_eq!(result.rings[0].point_count(), 8);
    assert!((result.area().unwrap() - 1.75).abs() < 1e-8);

    let result = difference(Some(&a), Some(&b)).unwrap().unwrap();
    assert_eq!(result.ring_count(), 1);
    assert_eq!(result.rings[0].point_count(), 6);
    assert!((result.area().unwrap() - 0.75).abs() < 1e-8);
}

#[test]
fn xor_is_union_of_differences() {
    let cases = [
        overlapping_squares(),
        (
            poly(vec![square(0.0, 10.0), square(2.0, 4.0)]),
            poly(vec![rect(3.0, -1.0, 6.0, 11.0)]),
        ),
        (poly(vec![square(0.0, 1.0)]), poly(vec![square(3.0, 4.0)])),
    ];

    for (a, b) in cases.iter() {
        let a_minus_b = difference(Some(a), Some(b)).unwrap();
        let b_minus_a = difference(Some(b), Some(a)).unwrap();
        let expected = union(a_minus_b.as_ref(), b_minus_a.as_ref()).unwrap();
        assert_eq!(xor(Some(a), Some(b)).unwrap(), expected);
    }

    let (a, b) = overlapping_squares();
    assert!((area_of(xor(Some(&a), Some(&b)).unwrap().as_ref()) - 1.5).abs() < 1e-8);
}

#[test]
fn commutative_operations() {
    let pairs = [
        overlapping_squares(),
        (
            poly(vec![square(0.0, 10.0), square(2.0, 8.0)]),
            poly(vec![rect(-1.0, 4.0, 11.0, 6.0)]),
        ),
        (
            poly(vec![ring![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]]),
            poly(vec![ring![(0.0, 2.0), (2.0, -1.0), (4.0, 2.0)]]),
        ),
    ];

    for (a, b) in pairs.iter() {
        for (op_name, op) in [("intersect", intersect as BooleanFn), ("union", union), ("xor", xor)] {
            let ab = op(Some(a), Some(b)).unwrap();
            let ba = op(Some(b), Some(a)).unwrap();
            assert_spatially_eq(ab.as_ref(), ba.as_ref(), op_name);
        }
    }
}

#[test]
fn absent_operand_short_circuits() {
    let (a, b) = overlapping_squares();
    assert_eq!(union(Some(&a), None).unwrap(), Some(a.clone()));
    assert_eq!(union(None, Some(&b)).unwrap(), Some(b.clone()));
    assert_eq!(xor(Some(&a), None).unwrap(), Some(a.clone()));
    assert_eq!(xor(None, Some(&b)).unwrap(), Some(b.clone()));
    assert_eq!(intersect(Some(&a), None).unwrap(), None);
    assert_eq!(difference(None, Some(&b)).unwrap(), None);
    assert_eq!(difference(Some(&a), None).unwrap(), Some(a));
}

#[test]
fn disjoint_polygons() {
    let a = poly(vec![square(0.0, 1.0)]);
    let b = poly(vec![square(3.0, 4.0)]);
    BooleanCase {
        intersect: None,
        union: Some(poly(vec![square(0.0, 1.0), square(3.0, 4.0)])),
        difference: Some(a.clone()),
        xor: Some(poly(vec![square(0.0, 1.0), square(3.0, 4.0)])),
        a,
        b,
    }
    .run("disjoint");
}

#[test]
fn squares_stacked_edge_to_edge() {
    let a = poly(vec![square(0.0, 1.0)]);
    let b = poly(vec![rect(0.0, 1.0, 1.0, 2.0)]);
    BooleanCase {
        intersect: None,
        union: Some(poly(vec![rect(0.0, 0.0, 1.0, 2.0)])),
        difference: Some(a.clone()),
        xor: Some(poly(vec![rect(0.0, 0.0, 1.0, 2.0)])),
        a,
        b,
    }
    .run("stacked squares");
}

#[test]
fn squares_touching_at_corner() {
    let a = poly(vec![square(0.0, 1.0)]);
    let b = poly(vec![square(1.0, 2.0)]);
    BooleanCase {
        intersect: None,
        union: Some(poly(vec![square(0.0, 1.0), square(1.0, 2.0)])),
        difference: Some(a.clone()),
        xor: Some(poly(vec![square(0.0, 1.0), square(1.0, 2.0)])),
        a,
        b,
    }
    .run("corner touching squares");
}

#[test]
fn contained_ring() {
    let outer = poly(vec![square(0.0, 10.0)]);
    let inner = poly(vec![square(2.0, 4.0)]);
    let with_hole = poly(vec![square(0.0, 10.0), hole_of(square(2.0, 4.0))]);
    BooleanCase {
        a: outer.clone(),
        b: inner.clone(),
        intersect: Some(inner.clone()),
        union: Some(outer.clone()),
        difference: Some(with_hole.clone()),
        xor: Some(with_hole),
    }
    .run("contained");

    assert_eq!(difference(Some(&inner), Some(&outer)).unwrap(), None);
}

#[test]
fn identical_polygons() {
    let a = poly(vec![ring![(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 3.0)]]);
    BooleanCase {
        a: a.clone(),
        b: a.clone(),
        intersect: Some(a.clone()),
        union: Some(a),
        difference: None,
        xor: None,
    }
    .run("identical");
}

#[test]
fn polygon_with_hole_against_square() {
    let a = poly(vec![square(0.0, 4.0), square(1.0, 3.0)]);
    let b = poly(vec![square(2.0, 5.0)]);
    let l_shape = ring![
        (3.0, 2.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (2.0, 3.0),
        (3.0, 3.0)
    ];

    let result = intersect(Some(&a), Some(&b)).unwrap();
    assert_spatially_eq(result.as_ref(), Some(&poly(vec![l_shape])), "intersect");
    assert!((area_of(result.as_ref()) - 3.0).abs() < 1e-8);

    // 16 - 4 - 3
    let result = difference(Some(&a), Some(&b)).unwrap();
    assert!((area_of(result.as_ref()) - 9.0).abs() < 1e-8);

    // 12 + 9 - 3
    let result = union(Some(&a), Some(&b)).unwrap();
    assert!((area_of(result.as_ref()) - 18.0).abs() < 1e-8);
}

fn chess() -> Polygon<f64> {
    poly(vec![
        square(4.0, 12.0),
        square(0.0, 16.0),
        square(6.0, 10.0),
        square(2.0, 14.0),
    ])
}

#[test]
fn chess_nesting_against_strip() {
    let strip = poly(vec![rect(-1.0, 7.0, 17.0, 9.0)]);
    let expected_intersect = poly(vec![
        rect(0.0, 7.0, 2.0, 9.0),
        rect(4.0, 7.0, 6.0, 9.0),
        rect(10.0, 7.0, 12.0, 9.0),
        rect(14.0, 7.0, 16.0, 9.0),
    ]);
    let expected_strip_minus_chess = poly(vec![
        rect(-1.0, 7.0, 0.0, 9.0),
        rect(2.0, 7.0, 4.0, 9.0),
        rect(6.0, 7.0, 10.0, 9.0),
        rect(12.0, 7.0, 14.0, 9.0),
        rect(16.0, 7.0, 17.0, 9.0),
    ]);

    let a = chess();
    let result = intersect(Some(&a), Some(&strip)).unwrap();
    assert_spatially_eq(result.as_ref(), Some(&expected_intersect), "chess intersect");
    assert!((area_of(result.as_ref()) - 16.0).abs() < 1e-8);

    let result = difference(Some(&strip), Some(&a)).unwrap();
    assert_spatially_eq(
        result.as_ref(),
        Some(&expected_strip_minus_chess),
        "strip minus chess",
    );

    // chess area 256 - 144 + 64 - 16
    let result = union(Some(&a), Some(&strip)).unwrap();
    assert!((area_of(result.as_ref()) - (160.0 + 20.0)).abs() < 1e-8);
}

#[test]
fn chess_clean_ring_containment() {
    let a = chess();
    let in_fill_band = poly(vec![square(4.5, 5.5)]);
    let in_hole_band = poly(vec![square(2.5, 3.5)]);
    let in_center = poly(vec![square(7.0, 9.0)]);

    assert_eq!(
        intersect(Some(&a), Some(&in_fill_band)).unwrap(),
        intersect(Some(&in_fill_band), Some(&a)).unwrap()
    );
    assert_spatially_eq(
        intersect(Some(&a), Some(&in_fill_band)).unwrap().as_ref(),
        Some(&in_fill_band),
        "fill band",
    );
    assert_eq!(intersect(Some(&a), Some(&in_hole_band)).unwrap(), None);
    assert_eq!(intersect(Some(&a), Some(&in_center)).unwrap(), None);
}

#[test]
fn output_rings_oriented_by_hole_flag() {
    let a = poly(vec![square(0.0, 10.0).reversed()]);
    let b = poly(vec![square(2.0, 4.0), rect(6.0, -1.0, 8.0, 11.0)]);
    let result = difference(Some(&a), Some(&b)).unwrap().unwrap();
    assert!(result.ring_count() >= 2);
    for r in result.rings.iter() {
        match r.hole {
            HoleFlag::Fill => assert_eq!(r.orientation(), RingOrientation::CounterClockwise),
            HoleFlag::Hole => assert_eq!(r.orientation(), RingOrientation::Clockwise),
            HoleFlag::Unknown => panic!("output ring without explicit hole flag"),
        }
    }

    // 100 - 4 - 20
    assert!((result.area().unwrap() - 76.0).abs() < 1e-8);
}

#[test]
fn crossing_strategies_agree() {
    let a = chess();
    let strip = poly(vec![rect(-1.0, 7.0, 17.0, 9.0), square(7.5, 8.5)]);
    for (op_name, invert_left, invert_right, invert_result) in [
        ("intersect", false, false, false),
        ("difference", false, true, false),
        ("union", true, true, true),
    ] {
        let expected = intersect_opt(
            Some(&a),
            Some(&strip),
            &PolygonBooleanOptions::new().with_inversions(invert_left, invert_right, invert_result),
        )
        .unwrap();

        for strategy in [CrossingStrategy::Sweep, CrossingStrategy::Parallel] {
            let op = PolygonIntersectionOperation::new()
                .with_strategy(strategy)
                .with_inversions(invert_left, invert_right, invert_result);
            assert_eq!(
                op.intersect(Some(&a), Some(&strip)).unwrap(),
                expected,
                "{op_name}, {strategy:?}"
            );
        }
    }
}

#[test]
fn boolean_dispatch_matches_free_functions() {
    let (a, b) = overlapping_squares();
    let ops = [
        (BooleanOp::And, intersect as BooleanFn),
        (BooleanOp::Or, union),
        (BooleanOp::Not, difference),
        (BooleanOp::Xor, xor),
    ];
    for (op, f) in ops {
        assert_eq!(a.boolean(&b, op).unwrap(), f(Some(&a), Some(&b)).unwrap());
    }
}

#[test]
fn invert_flags_are_honored_by_intersect_opt() {
    let (a, b) = overlapping_squares();
    let options = PolygonBooleanOptions::new().with_inversions(false, true, false);
    assert_eq!(
        intersect_opt(Some(&a), Some(&b), &options).unwrap(),
        difference_opt(Some(&a), Some(&b), &PolygonBooleanOptions::new()).unwrap()
    );
}

#[test]
fn degenerate_rings_are_ignored() {
    let a = poly(vec![ring![(0.0, 0.0), (1.0, 0.0)], square(0.0, 1.0)]);
    let b = poly(vec![square(0.5, 1.5), ring![(5.0, 5.0), (5.0, 5.0), (6.0, 6.0)]]);
    let result = intersect(Some(&a), Some(&b)).unwrap();
    assert_spatially_eq(result.as_ref(), Some(&poly(vec![square(0.5, 1.0)])), "degenerate");

    let only_degenerate = poly(vec![ring![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]]);
    assert_eq!(intersect(Some(&only_degenerate), Some(&b)).unwrap(), None);
}

#[test]
fn inconsistent_hole_flags_fail() {
    let bad = poly(vec![
        square(0.0, 10.0),
        hole![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)],
        fill![(5.0, 5.0), (7.0, 5.0), (7.0, 7.0)],
    ]);
    let (a, _) = overlapping_squares();
    for op in OPERATIONS.map(|(_, op)| op) {
        assert_eq!(
            op(Some(&a), Some(&bad)),
            Err(PolygonError::InconsistentHoleFlags { ring_index: 2 })
        );
    }
}

#[test]
fn nested_fill_flag_inverts_unflagged_outer() {
    // everything outside square(0, 10) plus the island square(2, 8)
    let outside_with_island = poly(vec![
        square(0.0, 10.0),
        fill![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)],
    ]);
    let b = poly(vec![square(-5.0, 5.0)]);
    let result = intersect(Some(&outside_with_island), Some(&b)).unwrap();
    // b less its quadrant inside the outer ring, plus its overlap with the island
    assert!((area_of(result.as_ref()) - (75.0 + 9.0)).abs() < 1e-8);
    assert_eq!(result.map_or(0, |p| p.ring_count()), 2);
}

#[test]
fn invalid_arguments_fail() {
    let (a, _) = overlapping_squares();
    let nan = poly(vec![ring![(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]]);
    assert!(matches!(
        intersect(Some(&a), Some(&nan)),
        Err(PolygonError::InvalidArgument { .. })
    ));

    let options = PolygonBooleanOptions {
        slice_join_eps: 0.0,
        ..PolygonBooleanOptions::new()
    };
    assert_eq!(
        intersect_opt(Some(&a), Some(&a), &options),
        Err(PolygonError::InvalidEpsilon)
    );
}

#[test]
fn f32_polygons() {
    let a: Polygon<f32> =
        polygon_algebra::polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
    let b: Polygon<f32> =
        polygon_algebra::polygon![ring![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]];
    let result = intersect(Some(&a), Some(&b)).unwrap().unwrap();
    assert!((result.area().unwrap() - 0.25).abs() < 1e-5);
    assert!(result.spatially_eq_eps(
        &polygon_algebra::polygon![ring![(0.5, 0.5), (1.0, 0.5), (1.0, 1.0), (0.5, 1.0)]],
        TEST_EPS as f32
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let a = poly(vec![square(0.0, 10.0), hole_of(square(2.0, 4.0))]);
    let json = serde_json::to_string(&a).unwrap();
    assert!(json.contains("\"hole\":\"Hole\""));
    let back: Polygon<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}
