use super::Vector2;
use crate::core::traits::Real;

/// Axis aligned bounding rectangle.
///
/// All predicates treat the rectangle as closed and widen it by the epsilon given so touching
/// rectangles count as intersecting.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingRect<T = f64> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T> BoundingRect<T>
where
    T: Real,
{
    #[inline]
    pub fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle spanning the two corner points given (in any order).
    #[inline]
    pub fn from_corners(p0: Vector2<T>, p1: Vector2<T>) -> Self {
        let mut result = Self::new(p0.x, p0.y, p0.x, p0.y);
        result.expand_to(p1);
        result
    }

    /// Smallest rectangle containing all `points`, `None` if there are no points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_algebra::core::math::*;
    /// let rect = BoundingRect::from_points([vec2(1.0, 5.0), vec2(-2.0, 3.0), vec2(0.0, 0.0)])
    ///     .unwrap();
    /// assert_eq!(rect, BoundingRect::new(-2.0, 0.0, 1.0, 5.0));
    /// assert!(BoundingRect::<f64>::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector2<T>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut result = Self::new(first.x, first.y, first.x, first.y);
        for p in iter {
            result.expand_to(p);
        }

        Some(result)
    }

    /// Grow the rectangle to include `point`.
    #[inline]
    pub fn expand_to(&mut self, point: Vector2<T>) {
        self.min_x = num_traits::real::Real::min(self.min_x, point.x);
        self.min_y = num_traits::real::Real::min(self.min_y, point.y);
        self.max_x = num_traits::real::Real::max(self.max_x, point.x);
        self.max_y = num_traits::real::Real::max(self.max_y, point.y);
    }

    /// Returns `true` if the rectangles share at least one point (fuzzy by `eps`).
    #[inline]
    pub fn intersects_eps(&self, other: &Self, eps: T) -> bool {
        self.min_x.fuzzy_lt_eps(other.max_x, eps)
            && other.min_x.fuzzy_lt_eps(self.max_x, eps)
            && self.min_y.fuzzy_lt_eps(other.max_y, eps)
            && other.min_y.fuzzy_lt_eps(self.max_y, eps)
    }

    /// Returns `true` if `point` is inside or on the rectangle (fuzzy by `eps`).
    #[inline]
    pub fn contains_point_eps(&self, point: Vector2<T>, eps: T) -> bool {
        point.x.fuzzy_in_range_eps(self.min_x, self.max_x, eps)
            && point.y.fuzzy_in_range_eps(self.min_y, self.max_y, eps)
    }

    /// Returns `true` if `other` lies entirely inside or on this rectangle (fuzzy by `eps`).
    #[inline]
    pub fn contains_rect_eps(&self, other: &Self, eps: T) -> bool {
        self.min_x.fuzzy_lt_eps(other.min_x, eps)
            && self.min_y.fuzzy_lt_eps(other.min_y, eps)
            && other.max_x.fuzzy_lt_eps(self.max_x, eps)
            && other.max_y.fuzzy_lt_eps(self.max_y, eps)
    }

    /// Returns `true` if this rectangle lies entirely inside or on `other`.
    #[inline]
    pub fn within_eps(&self, other: &Self, eps: T) -> bool {
        other.contains_rect_eps(self, eps)
    }
}
