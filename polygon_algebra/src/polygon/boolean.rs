//! Intersection, union, difference and xor of polygons, where an absent polygon is the empty
//! region.
//!
//! Only intersection traces geometry. The other operations complement their arguments and result
//! through [PolygonBooleanOptions] invert flags: `A - B = A ∩ ¬B` and `A ∪ B = ¬(¬A ∩ ¬B)`.
use log::debug;

use crate::{core::traits::Real, error::PolygonError};

use super::{
    internal::{
        crossings::{find_crossings, SegmentOrderCache},
        polygon_intersect::polygon_intersect,
    },
    CrossingStrategy, Polygon, PolygonBooleanOptions, PolygonCrossing,
};

/// Intersection of two polygons with default options.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{polygon, ring};
/// # use polygon_algebra::polygon::intersect;
/// // unit squares stacked edge to edge only touch
/// let a = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
/// let b = polygon![ring![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]];
/// assert!(intersect(Some(&a), Some(&b)).unwrap().is_none());
/// ```
#[inline]
pub fn intersect<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    intersect_opt(a, b, &PolygonBooleanOptions::new())
}

/// Intersection of two polygons honoring all the invert flags of `options`.
///
/// An absent argument is the empty region, so the result is empty unless both are present.
pub fn intersect_opt<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
    options: &PolygonBooleanOptions<T>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    options.validate()?;
    match (a, b) {
        (Some(a), Some(b)) => polygon_intersect(a, b, options),
        _ => Ok(None),
    }
}

/// Union of two polygons with default options.
#[inline]
pub fn union<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    union_opt(a, b, &PolygonBooleanOptions::new())
}

/// Union of two polygons, the invert flags of `options` are ignored.
///
/// If either argument is absent the other is returned unchanged.
pub fn union_opt<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
    options: &PolygonBooleanOptions<T>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    options.validate()?;
    match (a, b) {
        (Some(a), Some(b)) => polygon_intersect(a, b, &options.with_inversions(true, true, true)),
        (Some(p), None) | (None, Some(p)) => Ok(Some(p.clone())),
        (None, None) => Ok(None),
    }
}

/// Difference (`a` minus `b`) of two polygons with default options.
#[inline]
pub fn difference<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    difference_opt(a, b, &PolygonBooleanOptions::new())
}

/// Difference (`a` minus `b`) of two polygons, the invert flags of `options` are ignored.
pub fn difference_opt<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
    options: &PolygonBooleanOptions<T>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    options.validate()?;
    match (a, b) {
        (Some(a), Some(b)) => polygon_intersect(a, b, &options.with_inversions(false, true, false)),
        (Some(a), None) => Ok(Some(a.clone())),
        (None, _) => Ok(None),
    }
}

/// Exclusive or (symmetric difference) of two polygons with default options.
#[inline]
pub fn xor<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    xor_opt(a, b, &PolygonBooleanOptions::new())
}

/// Exclusive or of two polygons computed as `union(a - b, b - a)`, the invert flags of `options`
/// are ignored.
///
/// If either argument is absent the other is returned unchanged.
pub fn xor_opt<T>(
    a: Option<&Polygon<T>>,
    b: Option<&Polygon<T>>,
    options: &PolygonBooleanOptions<T>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    options.validate()?;
    match (a, b) {
        (Some(a), Some(b)) => {
            let a_minus_b = difference_opt(Some(a), Some(b), options)?;
            let b_minus_a = difference_opt(Some(b), Some(a), options)?;
            debug!(
                "xor: a - b has {} rings, b - a has {} rings",
                a_minus_b.as_ref().map_or(0, Polygon::ring_count),
                b_minus_a.as_ref().map_or(0, Polygon::ring_count)
            );
            union_opt(a_minus_b.as_ref(), b_minus_a.as_ref(), options)
        }
        (Some(p), None) | (None, Some(p)) => Ok(Some(p.clone())),
        (None, None) => Ok(None),
    }
}

/// Reusable polygon intersection operation owning its options and a segment order cache.
///
/// Calls with [CrossingStrategy::Sweep] or [CrossingStrategy::Parallel] share the cache, so rings
/// repeatedly passed in are sorted once.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{polygon, ring};
/// # use polygon_algebra::polygon::*;
/// let a = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
/// let b = polygon![ring![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]];
/// let op = PolygonIntersectionOperation::new().with_strategy(CrossingStrategy::Sweep);
/// assert_eq!(op.find_crossings(&a, &b).len(), 2);
/// assert!(op.intersect(Some(&a), Some(&b)).unwrap().is_some());
/// assert_eq!(op.cache().len(), 2);
/// ```
#[derive(Debug)]
pub struct PolygonIntersectionOperation<T>
where
    T: Real,
{
    pub invert_left_hand_side: bool,
    pub invert_right_hand_side: bool,
    pub invert_result: bool,
    pub pos_equal_eps: T,
    pub slice_join_eps: T,
    pub crossing_strategy: CrossingStrategy,
    cache: SegmentOrderCache,
}

impl<T> PolygonIntersectionOperation<T>
where
    T: Real,
{
    pub fn new() -> Self {
        let defaults = PolygonBooleanOptions::<T>::new();
        Self {
            invert_left_hand_side: defaults.invert_left_hand_side,
            invert_right_hand_side: defaults.invert_right_hand_side,
            invert_result: defaults.invert_result,
            pos_equal_eps: defaults.pos_equal_eps,
            slice_join_eps: defaults.slice_join_eps,
            crossing_strategy: defaults.crossing_strategy,
            cache: SegmentOrderCache::new(),
        }
    }

    #[inline]
    pub fn with_strategy(mut self, strategy: CrossingStrategy) -> Self {
        self.crossing_strategy = strategy;
        self
    }

    #[inline]
    pub fn with_inversions(mut self, left: bool, right: bool, result: bool) -> Self {
        self.invert_left_hand_side = left;
        self.invert_right_hand_side = right;
        self.invert_result = result;
        self
    }

    #[inline]
    pub fn cache(&self) -> &SegmentOrderCache {
        &self.cache
    }

    /// Options borrowing this operation's cache.
    pub fn options(&self) -> PolygonBooleanOptions<'_, T> {
        PolygonBooleanOptions {
            invert_left_hand_side: self.invert_left_hand_side,
            invert_right_hand_side: self.invert_right_hand_side,
            invert_result: self.invert_result,
            pos_equal_eps: self.pos_equal_eps,
            slice_join_eps: self.slice_join_eps,
            crossing_strategy: self.crossing_strategy,
            segment_order_cache: Some(&self.cache),
        }
    }

    /// Intersect two polygons honoring this operation's invert flags.
    #[inline]
    pub fn intersect(
        &self,
        a: Option<&Polygon<T>>,
        b: Option<&Polygon<T>>,
    ) -> Result<Option<Polygon<T>>, PolygonError> {
        intersect_opt(a, b, &self.options())
    }

    /// Boundary crossings between two polygons (diagnostic pass-through of the crossing search
    /// used by [PolygonIntersectionOperation::intersect]).
    ///
    /// The crossings are reported against the rings as given, without the reorientation applied
    /// while intersecting.
    #[inline]
    pub fn find_crossings(&self, a: &Polygon<T>, b: &Polygon<T>) -> Vec<PolygonCrossing<T>> {
        find_crossings(a, b, &self.options().crossing_options())
    }
}

impl<T> Default for PolygonIntersectionOperation<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
