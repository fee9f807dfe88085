use super::internal::crossings::SegmentOrderCache;
use crate::{
    core::{math::Vector2, traits::Real},
    error::PolygonError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation to apply to polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BooleanOp {
    /// Return the union of the polygons.
    Or,
    /// Return the intersection of the polygons.
    And,
    /// Return the difference (first polygon minus second polygon).
    Not,
    /// Exclusive OR (symmetric difference) between polygons.
    Xor,
}

/// Address of a point along a polygon boundary.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundaryLocation<T = f64> {
    /// Index of the ring in the polygon.
    pub ring_index: usize,
    /// Index of the segment (its start point) in the ring.
    pub segment_index: usize,
    /// Parametric position along the segment, in `[0, 1)` for crossings.
    pub ratio: T,
}

impl<T> BoundaryLocation<T>
where
    T: Real,
{
    #[inline]
    pub fn new(ring_index: usize, segment_index: usize, ratio: T) -> Self {
        Self {
            ring_index,
            segment_index,
            ratio,
        }
    }
}

/// Point where the boundaries of two polygons meet, located on both boundaries.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonCrossing<T = f64> {
    pub point: Vector2<T>,
    /// Location on the first polygon's boundary.
    pub location_a: BoundaryLocation<T>,
    /// Location on the second polygon's boundary.
    pub location_b: BoundaryLocation<T>,
}

impl<T> PolygonCrossing<T>
where
    T: Real,
{
    #[inline]
    pub fn new(
        point: Vector2<T>,
        location_a: BoundaryLocation<T>,
        location_b: BoundaryLocation<T>,
    ) -> Self {
        Self {
            point,
            location_a,
            location_b,
        }
    }

    /// Same crossing with the roles of the two polygons exchanged.
    #[inline]
    pub fn swapped(&self) -> Self {
        Self::new(self.point, self.location_b, self.location_a)
    }
}

/// Strategy used to enumerate segment pairs when finding crossings. All strategies produce the
/// same crossings in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossingStrategy {
    /// Every segment pair of every surviving ring pair, with a per segment bounding box check.
    #[default]
    Exhaustive,
    /// Segments pre-sorted by minimum x, only pairs with overlapping x extents are classified.
    Sweep,
    /// Ring pairs are processed on the rayon thread pool (each pair uses the sweep) and merged in
    /// ring pair order.
    Parallel,
}

/// Options for finding crossings between two polygons.
#[derive(Debug, Clone)]
pub struct CrossingOptions<'a, T>
where
    T: Real,
{
    /// Fuzzy comparison epsilon used for determining if two positions are equal.
    pub pos_equal_eps: T,
    /// How segment pairs are enumerated.
    pub strategy: CrossingStrategy,
    /// Cache of sorted segment orders reused across calls by [CrossingStrategy::Sweep] and
    /// [CrossingStrategy::Parallel]. A temporary cache is used if `None`.
    pub segment_order_cache: Option<&'a SegmentOrderCache>,
}

impl<'a, T> CrossingOptions<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            pos_equal_eps: T::from(1e-5).unwrap(),
            strategy: CrossingStrategy::Exhaustive,
            segment_order_cache: None,
        }
    }
}

impl<'a, T> Default for CrossingOptions<'a, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Options for polygon boolean operations.
///
/// The invert flags logically complement an argument's region (fill becomes hole and hole becomes
/// fill) without touching its points. [crate::polygon::intersect_opt] honors them as given, the
/// derived operations (union, difference, xor) set them for themselves.
#[derive(Debug, Clone)]
pub struct PolygonBooleanOptions<'a, T>
where
    T: Real,
{
    /// Complement the first polygon before intersecting.
    pub invert_left_hand_side: bool,
    /// Complement the second polygon before intersecting.
    pub invert_right_hand_side: bool,
    /// Complement the result.
    pub invert_result: bool,
    /// Fuzzy comparison epsilon used for determining if two positions are equal.
    pub pos_equal_eps: T,
    /// Fuzzy comparison epsilon used for determining if two positions are equal when stitching
    /// boundary slices together.
    pub slice_join_eps: T,
    /// How crossings are enumerated.
    pub crossing_strategy: CrossingStrategy,
    /// Cache of sorted segment orders reused across calls.
    pub segment_order_cache: Option<&'a SegmentOrderCache>,
}

impl<'a, T> PolygonBooleanOptions<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            invert_left_hand_side: false,
            invert_right_hand_side: false,
            invert_result: false,
            pos_equal_eps: T::from(1e-5).unwrap(),
            slice_join_eps: T::from(1e-4).unwrap(),
            crossing_strategy: CrossingStrategy::Exhaustive,
            segment_order_cache: None,
        }
    }

    /// Copy of these options with the invert flags replaced.
    #[inline]
    pub fn with_inversions(&self, left: bool, right: bool, result: bool) -> Self {
        Self {
            invert_left_hand_side: left,
            invert_right_hand_side: right,
            invert_result: result,
            ..self.clone()
        }
    }

    /// Crossing options sharing the epsilon, strategy and cache of these options.
    #[inline]
    pub fn crossing_options(&self) -> CrossingOptions<'a, T> {
        CrossingOptions {
            pos_equal_eps: self.pos_equal_eps,
            strategy: self.crossing_strategy,
            segment_order_cache: self.segment_order_cache,
        }
    }

    /// Check epsilon values are positive and finite.
    pub fn validate(&self) -> Result<(), PolygonError> {
        let valid = |eps: T| eps > T::zero() && eps.is_finite_value();
        if valid(self.pos_equal_eps) && valid(self.slice_join_eps) {
            Ok(())
        } else {
            Err(PolygonError::InvalidEpsilon)
        }
    }
}

impl<'a, T> Default for PolygonBooleanOptions<'a, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
