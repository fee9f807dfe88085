use super::{midpoint, parametric_from_point, BoundingRect, Vector2};
use crate::core::traits::Real;

/// Directed line segment from `a` to `b`.
///
/// Point order matters: parametric ratios along the segment are measured from `a` (ratio 0) to `b`
/// (ratio 1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment<T = f64> {
    pub a: Vector2<T>,
    pub b: Vector2<T>,
}

impl<T> Segment<T>
where
    T: Real,
{
    #[inline]
    pub fn new(a: Vector2<T>, b: Vector2<T>) -> Self {
        Self { a, b }
    }

    /// Direction vector `b - a`.
    #[inline]
    pub fn direction(&self) -> Vector2<T> {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> T {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Vector2<T> {
        midpoint(self.a, self.b)
    }

    /// Point at parametric `ratio` along the segment.
    #[inline]
    pub fn point_at(&self, ratio: T) -> Vector2<T> {
        self.a.lerp(self.b, ratio)
    }

    /// Same segment with its direction reversed.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    #[inline]
    pub fn bounding_rect(&self) -> BoundingRect<T> {
        BoundingRect::from_corners(self.a, self.b)
    }

    /// Parametric ratio of the point on the segment closest to `point`, in `[0, 1]`.
    #[inline]
    pub fn closest_ratio(&self, point: Vector2<T>) -> T {
        let t = parametric_from_point(self.a, self.b, point);
        num_traits::clamp(t, T::zero(), T::one())
    }

    /// Squared distance from `point` to the closest point on the segment.
    #[inline]
    pub fn distance_squared_to_point(&self, point: Vector2<T>) -> T {
        (point - self.point_at(self.closest_ratio(point))).length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq};

    #[test]
    fn distance_to_point() {
        let seg = Segment::new(vec2(0.0, 0.0), vec2(2.0, 0.0));
        assert_fuzzy_eq!(seg.distance_squared_to_point(vec2(1.0, 1.0)), 1.0);
        assert_fuzzy_eq!(seg.distance_squared_to_point(vec2(3.0, 0.0)), 1.0);
        assert_fuzzy_eq!(seg.distance_squared_to_point(vec2(-1.0, -1.0)), 2.0);
        assert_fuzzy_eq!(seg.distance_squared_to_point(vec2(0.5, 0.0)), 0.0);
    }

    #[test]
    fn closest_ratio_is_clamped() {
        let seg = Segment::new(vec2(0.0, 0.0), vec2(4.0, 0.0));
        assert_fuzzy_eq!(seg.closest_ratio(vec2(1.0, 3.0)), 0.25);
        assert_fuzzy_eq!(seg.closest_ratio(vec2(-2.0, 1.0)), 0.0);
        assert_fuzzy_eq!(seg.closest_ratio(vec2(9.0, -1.0)), 1.0);
        let point = Segment::new(vec2(1.0, 1.0), vec2(1.0, 1.0));
        assert_fuzzy_eq!(point.distance_squared_to_point(vec2(1.0, 3.0)), 4.0);
    }

    #[test]
    fn point_at_ratio() {
        let seg = Segment::new(vec2(1.0, 1.0), vec2(1.0, 5.0));
        assert!(seg.point_at(0.25).fuzzy_eq(vec2(1.0, 2.0)));
        assert!(seg.reversed().point_at(0.25).fuzzy_eq(vec2(1.0, 4.0)));
    }
}
