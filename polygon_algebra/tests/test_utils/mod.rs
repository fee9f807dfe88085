#![allow(dead_code)]
mod polygon_modifiers;

pub use polygon_modifiers::*;

use polygon_algebra::polygon::{Polygon, Ring};

pub const TEST_EPS: f64 = 1e-5;

/// Axis aligned counter clockwise rectangle ring with an unknown hole flag.
pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Ring<f64> {
    polygon_algebra::ring![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)]
}

/// Axis aligned square ring from `min` to `max` on both axes.
pub fn square(min: f64, max: f64) -> Ring<f64> {
    rect(min, min, max, max)
}

pub fn assert_spatially_eq(
    actual: Option<&Polygon<f64>>,
    expected: Option<&Polygon<f64>>,
    context: &str,
) {
    let passed = match (actual, expected) {
        (None, None) => true,
        (Some(a), Some(e)) => a.spatially_eq_eps(e, TEST_EPS),
        _ => false,
    };

    assert!(
        passed,
        "{context}\n  actual: {actual:?}\n  expected: {expected:?}"
    );
}

pub fn area_of(polygon: Option<&Polygon<f64>>) -> f64 {
    polygon.map_or(0.0, |p| p.area().unwrap())
}
