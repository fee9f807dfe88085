use super::{is_parallel_eps, parametric_from_point, Segment, Vector2};
use crate::core::traits::Real;
use std::cmp::Ordering;

/// Where along a segment an intersect point lies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SegmentPosition {
    /// At the first point of the segment (parametric ratio 0).
    Start,
    /// Strictly between the segment end points.
    Interior,
    /// At the second point of the segment (parametric ratio 1).
    End,
}

impl SegmentPosition {
    #[inline]
    fn from_ratio<T: Real>(ratio: T) -> Self {
        if ratio == T::zero() {
            SegmentPosition::Start
        } else if ratio == T::one() {
            SegmentPosition::End
        } else {
            SegmentPosition::Interior
        }
    }
}

/// Intersect point between two segments located on both of them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntrPoint<T = f64> {
    /// Position of the intersect.
    pub point: Vector2<T>,
    /// Parametric ratio in `[0, 1]` along the first segment.
    pub ratio1: T,
    /// Parametric ratio in `[0, 1]` along the second segment.
    pub ratio2: T,
    /// Classification of `ratio1`.
    pub pos1: SegmentPosition,
    /// Classification of `ratio2`.
    pub pos2: SegmentPosition,
}

impl<T> IntrPoint<T>
where
    T: Real,
{
    /// Same intersect with the roles of the first and second segment exchanged.
    #[inline]
    pub fn swapped(&self) -> Self {
        Self {
            point: self.point,
            ratio1: self.ratio2,
            ratio2: self.ratio1,
            pos1: self.pos2,
            pos2: self.pos1,
        }
    }

    /// Returns `true` if the point falls on the second point of either segment.
    #[inline]
    pub fn at_either_end(&self) -> bool {
        self.pos1 == SegmentPosition::End || self.pos2 == SegmentPosition::End
    }
}

/// Holds the result of classifying the intersect between two segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SegmentSegmentIntr<T = f64> {
    /// Segments do not touch.
    NoIntersect,
    /// Segments meet at a single point (crossing, touching, or sharing an end point).
    Point(IntrPoint<T>),
    /// Segments are collinear and share a sub segment of non zero length.
    Overlapping {
        /// The shared sub segment, directed along the first segment.
        overlap: Segment<T>,
        /// Location of `overlap.a` on both segments.
        start: IntrPoint<T>,
        /// Location of `overlap.b` on both segments.
        end: IntrPoint<T>,
    },
}

impl<T> SegmentSegmentIntr<T>
where
    T: Real,
{
    /// Same result with the roles of the first and second segment exchanged.
    ///
    /// Overlaps stay directed along whichever segment becomes the first segment.
    pub fn swapped(&self) -> Self {
        use SegmentSegmentIntr::*;
        match *self {
            NoIntersect => NoIntersect,
            Point(p) => Point(p.swapped()),
            Overlapping { overlap, start, end } => {
                let start = start.swapped();
                let end = end.swapped();
                if start.ratio1 <= end.ratio1 {
                    Overlapping {
                        overlap,
                        start,
                        end,
                    }
                } else {
                    Overlapping {
                        overlap: overlap.reversed(),
                        start: end,
                        end: start,
                    }
                }
            }
        }
    }
}

/// Same as [segment_segment_intr_eps] using the default fuzzy epsilon.
#[inline]
pub fn segment_segment_intr<T>(seg1: Segment<T>, seg2: Segment<T>) -> SegmentSegmentIntr<T>
where
    T: Real,
{
    segment_segment_intr_eps(seg1, seg2, T::fuzzy_epsilon())
}

/// Classifies the intersect between two line segments.
///
/// The parametric ratios are found by solving the 2x2 linear system of the two segment equations
/// `P(t) = a + t * (b - a)` using perpendicular dot products. A (fuzzy) zero denominator means the
/// segments are parallel, in which case they are either disjoint or collinear.
///
/// Points within `epsilon` of a segment end point snap to that end point so ratios of exactly 0 or
/// 1 (and [SegmentPosition::Start]/[SegmentPosition::End]) are reported for shared vertexes.
/// Collinear segments only produce [SegmentSegmentIntr::Overlapping] when they share extent, end
/// to end touching is a [SegmentSegmentIntr::Point].
///
/// The result does not depend on argument order: swapping the segments yields
/// [SegmentSegmentIntr::swapped] of the original result.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::core::math::*;
/// let seg1 = Segment::new(vec2(0.0, 0.0), vec2(1.0, 0.0));
/// let seg2 = Segment::new(vec2(0.5, -1.0), vec2(0.5, 1.0));
/// if let SegmentSegmentIntr::Point(p) = segment_segment_intr(seg1, seg2) {
///     assert_eq!(p.ratio1, 0.5);
///     assert_eq!(p.ratio2, 0.5);
///     assert_eq!(p.pos1, SegmentPosition::Interior);
/// } else {
///     unreachable!("expected point intersect between line segments");
/// }
/// ```
pub fn segment_segment_intr_eps<T>(
    seg1: Segment<T>,
    seg2: Segment<T>,
    epsilon: T,
) -> SegmentSegmentIntr<T>
where
    T: Real,
{
    // always compute with a canonical argument order so both orders agree bit for bit
    let order = seg1
        .a
        .total_cmp(&seg2.a)
        .then_with(|| seg1.b.total_cmp(&seg2.b));

    if order == Ordering::Greater {
        return classify_ordered(seg2, seg1, epsilon).swapped();
    }

    classify_ordered(seg1, seg2, epsilon)
}

fn classify_ordered<T>(seg1: Segment<T>, seg2: Segment<T>, eps: T) -> SegmentSegmentIntr<T>
where
    T: Real,
{
    use SegmentSegmentIntr::*;

    if !seg1
        .bounding_rect()
        .intersects_eps(&seg2.bounding_rect(), eps)
    {
        return NoIntersect;
    }

    let v1 = seg1.a;
    let v2 = seg1.b;
    let u1 = seg2.a;
    let u2 = seg2.b;
    let v = v2 - v1;
    let u = u2 - u1;

    // segment lengths are used to scale parametric values for fuzzy comparing so the epsilon is
    // applied at a length/position scale
    let seg1_length = v.length();
    let seg2_length = u.length();

    let seg1_is_point = seg1_length < eps;
    let seg2_is_point = seg2_length < eps;
    if seg1_is_point || seg2_is_point {
        return classify_degenerate(seg1, seg2, seg1_is_point, seg2_is_point, eps);
    }

    if !is_parallel_eps(v, u, eps) {
        let w = v1 - u1;
        let v_pdot_u = v.perp_dot(u);
        let seg1_t = u.perp_dot(w) / v_pdot_u;
        let seg2_t = v.perp_dot(w) / v_pdot_u;
        if !(seg1_t * seg1_length).fuzzy_in_range_eps(T::zero(), seg1_length, eps)
            || !(seg2_t * seg2_length).fuzzy_in_range_eps(T::zero(), seg2_length, eps)
        {
            return NoIntersect;
        }

        let point = shared_vertex(seg1, seg2, eps).unwrap_or_else(|| {
            if (seg1_t * seg1_length).fuzzy_eq_zero_eps(eps) {
                v1
            } else if ((T::one() - seg1_t) * seg1_length).fuzzy_eq_zero_eps(eps) {
                v2
            } else if (seg2_t * seg2_length).fuzzy_eq_zero_eps(eps) {
                u1
            } else if ((T::one() - seg2_t) * seg2_length).fuzzy_eq_zero_eps(eps) {
                u2
            } else {
                seg1.point_at(seg1_t)
            }
        });

        return Point(locate_point(seg1, seg2, point, eps));
    }

    // parallel, check collinear by distance of seg2 end points from the seg1 line
    let u1_dist = v.perp_dot(u1 - v1).abs() / seg1_length;
    let u2_dist = v.perp_dot(u2 - v1).abs() / seg1_length;
    if !u1_dist.fuzzy_eq_zero_eps(eps) || !u2_dist.fuzzy_eq_zero_eps(eps) {
        return NoIntersect;
    }

    let u1_t = parametric_from_point(v1, v2, u1);
    let u2_t = parametric_from_point(v1, v2, u2);
    let ((lo_t, lo_pt), (hi_t, hi_pt)) = if u1_t <= u2_t {
        ((u1_t, u1), (u2_t, u2))
    } else {
        ((u2_t, u2), (u1_t, u1))
    };

    let overlap_length = (num_traits::real::Real::min(hi_t, T::one())
        - num_traits::real::Real::max(lo_t, T::zero()))
        * seg1_length;
    if overlap_length < -eps {
        return NoIntersect;
    }

    let start_point = if (lo_t * seg1_length).fuzzy_lt_eps(T::zero(), eps) {
        v1
    } else {
        lo_pt
    };
    let end_point = if (hi_t * seg1_length).fuzzy_gt_eps(seg1_length, eps) {
        v2
    } else {
        hi_pt
    };

    if start_point.fuzzy_eq_eps(end_point, eps) {
        // end to end touch
        return Point(locate_point(seg1, seg2, start_point, eps));
    }

    Overlapping {
        overlap: Segment::new(start_point, end_point),
        start: locate_point(seg1, seg2, start_point, eps),
        end: locate_point(seg1, seg2, end_point, eps),
    }
}

fn classify_degenerate<T>(
    seg1: Segment<T>,
    seg2: Segment<T>,
    seg1_is_point: bool,
    seg2_is_point: bool,
    eps: T,
) -> SegmentSegmentIntr<T>
where
    T: Real,
{
    let eps_sq = eps * eps;
    let touching = if seg1_is_point && seg2_is_point {
        seg1.a.fuzzy_eq_eps(seg2.a, eps)
    } else if seg1_is_point {
        seg2.distance_squared_to_point(seg1.a) < eps_sq
    } else {
        seg1.distance_squared_to_point(seg2.a) < eps_sq
    };

    if !touching {
        return SegmentSegmentIntr::NoIntersect;
    }

    let point = if seg1_is_point { seg1.a } else { seg2.a };
    SegmentSegmentIntr::Point(locate_point(seg1, seg2, point, eps))
}

/// End point shared by both segments (fuzzy), preferring the first segment's vertex.
fn shared_vertex<T>(seg1: Segment<T>, seg2: Segment<T>, eps: T) -> Option<Vector2<T>>
where
    T: Real,
{
    [seg1.a, seg1.b]
        .into_iter()
        .find(|p| p.fuzzy_eq_eps(seg2.a, eps) || p.fuzzy_eq_eps(seg2.b, eps))
}

/// Parametric ratio of `point` along `seg`, snapped to exactly 0 or 1 at the end points.
fn snapped_ratio<T>(seg: Segment<T>, point: Vector2<T>, eps: T) -> T
where
    T: Real,
{
    if point.fuzzy_eq_eps(seg.a, eps) {
        return T::zero();
    }

    if point.fuzzy_eq_eps(seg.b, eps) {
        return T::one();
    }

    seg.closest_ratio(point)
}

fn locate_point<T>(seg1: Segment<T>, seg2: Segment<T>, point: Vector2<T>, eps: T) -> IntrPoint<T>
where
    T: Real,
{
    let ratio1 = snapped_ratio(seg1, point, eps);
    let ratio2 = snapped_ratio(seg2, point, eps);
    IntrPoint {
        point,
        ratio1,
        ratio2,
        pos1: SegmentPosition::from_ratio(ratio1),
        pos2: SegmentPosition::from_ratio(ratio2),
    }
}
