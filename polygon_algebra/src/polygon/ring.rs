use crate::core::{
    math::{is_parallel_eps, BoundingRect, Segment, Vector2},
    traits::Real,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Tri-state hole flag of a ring.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum HoleFlag {
    /// Nesting decides whether the ring is a fill or a hole.
    #[default]
    Unknown,
    /// Ring interior adds to the region.
    Fill,
    /// Ring interior subtracts from the region.
    Hole,
}

impl HoleFlag {
    /// Flag as an optional bool (`Some(true)` for [HoleFlag::Hole]).
    #[inline]
    pub fn as_option(self) -> Option<bool> {
        match self {
            HoleFlag::Unknown => None,
            HoleFlag::Fill => Some(false),
            HoleFlag::Hole => Some(true),
        }
    }

    #[inline]
    pub fn from_is_hole(is_hole: bool) -> Self {
        if is_hole {
            HoleFlag::Hole
        } else {
            HoleFlag::Fill
        }
    }

    /// Swaps [HoleFlag::Fill] and [HoleFlag::Hole], [HoleFlag::Unknown] is unchanged.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            HoleFlag::Unknown => HoleFlag::Unknown,
            HoleFlag::Fill => HoleFlag::Hole,
            HoleFlag::Hole => HoleFlag::Fill,
        }
    }
}

/// Orientation (winding direction) of a ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingOrientation {
    /// Ring has fewer than 3 points or zero area.
    Degenerate,
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

/// Location of a point relative to a ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointLocation {
    Inside,
    Outside,
    OnBoundary,
}

/// Closed sequence of points. The segment after the last point returns to the first.
///
/// Rings are expected to not self intersect, rings that do produce undefined (best effort)
/// results.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring<T = f64> {
    /// Points in ring order, the closing point is implied (not repeated).
    pub points: Vec<Vector2<T>>,
    /// Whether the ring is a hole, a fill, or to be inferred by nesting.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hole: HoleFlag,
}

impl<T> Index<usize> for Ring<T> {
    type Output = Vector2<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> Ring<T>
where
    T: Real,
{
    /// Create a new empty ring with an unknown hole flag.
    #[inline]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            hole: HoleFlag::Unknown,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize, hole: HoleFlag) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            hole,
        }
    }

    #[inline]
    pub fn from_points<I>(points: I, hole: HoleFlag) -> Self
    where
        I: IntoIterator<Item = Vector2<T>>,
    {
        Self {
            points: points.into_iter().collect(),
            hole,
        }
    }

    /// Add a point to the end of the ring.
    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.points.push(Vector2::new(x, y));
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments, a ring with zero or one point has no segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        }
    }

    #[inline]
    pub fn next_wrapping_index(&self, i: usize) -> usize {
        let next = i + 1;
        if next == self.points.len() {
            0
        } else {
            next
        }
    }

    /// Segment starting at point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn segment(&self, i: usize) -> Segment<T> {
        Segment::new(self.points[i], self.points[self.next_wrapping_index(i)])
    }

    /// Iterate all the segments of the ring, including the closing segment.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<T>> + '_ {
        (0..self.segment_count()).map(move |i| self.segment(i))
    }

    /// Signed area of the ring using the shoelace formula, positive if counter clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_algebra::{polygon::Ring, ring};
    /// # use polygon_algebra::core::traits::*;
    /// let ccw: Ring = ring![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
    /// assert!(ccw.signed_area().fuzzy_eq(2.0));
    /// assert!(ccw.reversed().signed_area().fuzzy_eq(-2.0));
    /// ```
    pub fn signed_area(&self) -> T {
        let mut double_total_area = T::zero();
        for seg in self.iter_segments() {
            double_total_area = double_total_area + seg.a.x * seg.b.y - seg.a.y * seg.b.x;
        }

        double_total_area / T::two()
    }

    pub fn orientation(&self) -> RingOrientation {
        if self.points.len() < 3 {
            return RingOrientation::Degenerate;
        }

        let area = self.signed_area();
        if area > T::zero() {
            RingOrientation::CounterClockwise
        } else if area < T::zero() {
            RingOrientation::Clockwise
        } else {
            RingOrientation::Degenerate
        }
    }

    /// Bounding rectangle of all the points, `None` if the ring is empty.
    #[inline]
    pub fn bounding_rect(&self) -> Option<BoundingRect<T>> {
        BoundingRect::from_points(self.points.iter().copied())
    }

    /// Ring with point order reversed (same hole flag).
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            hole: self.hole,
        }
    }

    /// Returns `true` if all coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Number of ring segments crossed by the ray cast from `point` in the positive x direction.
    ///
    /// Segment end points are treated half open (a segment counts if exactly one end point is
    /// strictly above the ray) so passing through a vertex is counted once.
    pub fn ray_cast_crossings(&self, point: Vector2<T>) -> usize {
        let mut count = 0;
        for seg in self.iter_segments() {
            let (a, b) = (seg.a, seg.b);
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x {
                    count += 1;
                }
            }
        }

        count
    }

    /// Point in ring test by ray cast parity, result is arbitrary for points on the boundary.
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.ray_cast_crossings(point) % 2 == 1
    }

    /// Classify `point` as inside, outside, or within `eps` of the ring boundary.
    pub fn classify_point_eps(&self, point: Vector2<T>, eps: T) -> PointLocation {
        let Some(rect) = self.bounding_rect() else {
            return PointLocation::Outside;
        };

        if !rect.contains_point_eps(point, eps) {
            return PointLocation::Outside;
        }

        let eps_sq = eps * eps;
        if self
            .iter_segments()
            .any(|seg| seg.distance_squared_to_point(point) < eps_sq)
        {
            return PointLocation::OnBoundary;
        }

        if self.contains_point(point) {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    /// Returns `true` if `other` lies inside this ring, assuming the two rings do not cross.
    ///
    /// The first point of `other` (vertexes first, then segment midpoints) not on this ring's
    /// boundary decides. Rings that coincide entirely are not considered contained.
    pub fn non_intersecting_contains_eps(&self, other: &Ring<T>, eps: T) -> bool {
        let (Some(self_rect), Some(other_rect)) = (self.bounding_rect(), other.bounding_rect())
        else {
            return false;
        };

        if !self_rect.contains_rect_eps(&other_rect, eps) {
            return false;
        }

        let candidates = other
            .points
            .iter()
            .copied()
            .chain(other.iter_segments().map(|s| s.midpoint()));

        for pt in candidates {
            match self.classify_point_eps(pt, eps) {
                PointLocation::Inside => return true,
                PointLocation::Outside => return false,
                PointLocation::OnBoundary => {}
            }
        }

        false
    }

    /// Ring with consecutive repeat points (including the last point repeating the first)
    /// removed.
    pub fn remove_repeat_eps(&self, eps: T) -> Self {
        let mut result = Self::with_capacity(self.points.len(), self.hole);
        for &p in self.points.iter() {
            if result.points.last().is_some_and(|l| l.fuzzy_eq_eps(p, eps)) {
                continue;
            }
            result.points.push(p);
        }

        while result.points.len() > 1
            && result.points[0].fuzzy_eq_eps(result.points[result.points.len() - 1], eps)
        {
            result.points.pop();
        }

        result
    }

    /// Ring with repeat points and collinear (straight through or spike) vertexes removed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_algebra::ring;
    /// let r = ring![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert_eq!(r.remove_redundant_eps(1e-5).point_count(), 4);
    /// ```
    pub fn remove_redundant_eps(&self, eps: T) -> Self {
        let mut result = self.remove_repeat_eps(eps);
        let mut changed = true;
        while changed && result.points.len() >= 3 {
            changed = false;
            let n = result.points.len();
            for i in 0..n {
                let prev = result.points[(i + n - 1) % n];
                let curr = result.points[i];
                let next = result.points[(i + 1) % n];
                if is_parallel_eps(curr - prev, next - curr, eps) {
                    result.points.remove(i);
                    changed = true;
                    break;
                }
            }
        }

        result.remove_repeat_eps(eps)
    }

    /// Ring rotated so the smallest point (by x then y) comes first, orientation unchanged.
    pub(crate) fn rotated_to_min_point(&self) -> Self {
        let Some(min_idx) = (0..self.points.len())
            .min_by(|&i, &j| self.points[i].total_cmp(&self.points[j]))
        else {
            return self.clone();
        };

        let mut points = Vec::with_capacity(self.points.len());
        points.extend_from_slice(&self.points[min_idx..]);
        points.extend_from_slice(&self.points[..min_idx]);
        Self {
            points,
            hole: self.hole,
        }
    }

    /// Returns `true` if both rings trace the same boundary, ignoring starting point, orientation,
    /// hole flags and redundant vertexes.
    pub fn same_boundary_eps(&self, other: &Ring<T>, eps: T) -> bool {
        let normalize = |r: &Ring<T>| {
            let r = r.remove_redundant_eps(eps);
            let r = if r.orientation() == RingOrientation::Clockwise {
                r.reversed()
            } else {
                r
            };
            r.rotated_to_min_point()
        };

        let a = normalize(self);
        let b = normalize(other);
        a.points.len() == b.points.len()
            && a
                .points
                .iter()
                .zip(b.points.iter())
                .all(|(p, q)| p.fuzzy_eq_eps(*q, eps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{math::vec2, traits::FuzzyEq};

    fn unit_square() -> Ring<f64> {
        ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    }

    #[test]
    fn segment_counts() {
        let mut r = Ring::<f64>::new();
        assert_eq!(r.segment_count(), 0);
        r.add(0.0, 0.0);
        assert_eq!(r.segment_count(), 0);
        r.add(1.0, 0.0);
        assert_eq!(r.segment_count(), 2);
        assert_eq!(unit_square().segment_count(), 4);
        assert_eq!(unit_square().iter_segments().count(), 4);
    }

    #[test]
    fn orientation_and_area() {
        let sq = unit_square();
        assert_eq!(sq.orientation(), RingOrientation::CounterClockwise);
        assert_eq!(sq.reversed().orientation(), RingOrientation::Clockwise);
        assert_fuzzy_eq!(sq.signed_area(), 1.0);
        let line = ring![(0.0, 0.0), (1.0, 0.0)];
        assert_eq!(line.orientation(), RingOrientation::Degenerate);
    }

    #[test]
    fn ray_cast_through_vertex_counts_once() {
        let diamond = ring![(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
        assert_eq!(diamond.ray_cast_crossings(vec2(0.0, 0.0)), 1);
        assert_eq!(diamond.ray_cast_crossings(vec2(-2.0, 0.0)), 2);
        assert!(diamond.contains_point(vec2(0.2, 0.1)));
        assert!(!diamond.contains_point(vec2(0.9, 0.9)));
    }

    #[test]
    fn classify_points() {
        let sq = unit_square();
        assert_eq!(sq.classify_point_eps(vec2(0.5, 0.5), 1e-8), PointLocation::Inside);
        assert_eq!(sq.classify_point_eps(vec2(1.5, 0.5), 1e-8), PointLocation::Outside);
        assert_eq!(sq.classify_point_eps(vec2(1.0, 0.5), 1e-8), PointLocation::OnBoundary);
        assert_eq!(sq.classify_point_eps(vec2(0.0, 0.0), 1e-8), PointLocation::OnBoundary);
    }

    #[test]
    fn containment_with_touching_vertex() {
        let outer = ring![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        // triangle touching outer boundary at (0, 0)
        let touching = ring![(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)];
        let outside = ring![(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)];
        assert!(outer.non_intersecting_contains_eps(&touching, 1e-8));
        assert!(!touching.non_intersecting_contains_eps(&outer, 1e-8));
        assert!(!outer.non_intersecting_contains_eps(&outside, 1e-8));
        assert!(!outer.non_intersecting_contains_eps(&outer, 1e-8));
    }

    #[test]
    fn same_boundary_ignores_start_and_direction() {
        let sq = unit_square();
        let rotated = ring![(1.0, 1.0), (0.0, 1.0), (0.0, 0.0), (0.5, 0.0), (1.0, 0.0)];
        assert!(sq.same_boundary_eps(&rotated, 1e-8));
        assert!(sq.same_boundary_eps(&rotated.reversed(), 1e-8));
        let other = ring![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
        assert!(!sq.same_boundary_eps(&other, 1e-8));
    }
}
