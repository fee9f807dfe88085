//! Intersection of two polygons by slicing ring boundaries at their crossings and stitching the
//! kept slices back into closed rings.
use log::{debug, trace, warn};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder};

use crate::{
    core::{
        math::{ccw_angle_between, midpoint, Segment, Vector2},
        traits::Real,
    },
    error::PolygonError,
    polygon::{HoleFlag, Polygon, PolygonBooleanOptions, PolygonCrossing, Ring, RingOrientation},
};

use super::{boundary_tree::RingBoundaryTree, crossings::find_crossings};

fn build_spatial_index<T>(
    builder: StaticAABB2DIndexBuilder<T>,
) -> Result<StaticAABB2DIndex<T>, PolygonError>
where
    T: Real,
{
    match builder.build() {
        Ok(x) => Ok(x),
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => Err(PolygonError::InvalidArgument {
                reason: format!("failed to build spatial index: {e}"),
            }),
        },
    }
}

/// Rings of `polygon` with repeat points removed and degenerate rings dropped, paired with the
/// index of each kept ring in `polygon`.
fn cleaned_rings<T>(polygon: &Polygon<T>, eps: T) -> (Vec<Ring<T>>, Vec<usize>)
where
    T: Real,
{
    let mut rings = Vec::with_capacity(polygon.rings.len());
    let mut source_index = Vec::with_capacity(polygon.rings.len());
    for (i, ring) in polygon.rings.iter().enumerate() {
        let cleaned = ring.remove_repeat_eps(eps);
        if cleaned.orientation() == RingOrientation::Degenerate {
            trace!("dropping degenerate ring {}", i);
            continue;
        }
        rings.push(cleaned);
        source_index.push(i);
    }

    (rings, source_index)
}

/// One argument of the intersection: its boundary tree, polarity, and rings oriented so the
/// (possibly inverted) region is always on the left.
struct Operand<'a, T>
where
    T: Real,
{
    tree: RingBoundaryTree<'a, T>,
    inverted: bool,
    oriented: Polygon<T>,
    segment_refs: Vec<(usize, usize)>,
    segment_index: Option<StaticAABB2DIndex<T>>,
}

impl<'a, T> Operand<'a, T>
where
    T: Real,
{
    fn new(
        rings: &'a [Ring<T>],
        source_index: &[usize],
        inverted: bool,
        eps: T,
    ) -> Result<Self, PolygonError> {
        let tree = RingBoundaryTree::build(rings, eps).map_err(|e| match e {
            PolygonError::InconsistentHoleFlags { ring_index } => {
                PolygonError::InconsistentHoleFlags {
                    ring_index: source_index[ring_index],
                }
            }
            other => other,
        })?;

        let mut oriented = Polygon::new();
        for (i, ring) in rings.iter().enumerate() {
            let region_is_hole = tree.is_hole(i).unwrap_or(false) != inverted;
            let ccw = ring.orientation() == RingOrientation::CounterClockwise;
            let mut r = if ccw == region_is_hole {
                ring.reversed()
            } else {
                ring.clone()
            };
            r.hole = HoleFlag::from_is_hole(region_is_hole);
            oriented.rings.push(r);
        }

        let segment_refs: Vec<(usize, usize)> = oriented
            .rings
            .iter()
            .enumerate()
            .flat_map(|(i, r)| (0..r.segment_count()).map(move |j| (i, j)))
            .collect();

        let segment_index = if segment_refs.is_empty() {
            None
        } else {
            let mut builder = StaticAABB2DIndexBuilder::new(segment_refs.len());
            for &(i, j) in segment_refs.iter() {
                let rect = oriented.rings[i].segment(j).bounding_rect();
                builder.add(rect.min_x, rect.min_y, rect.max_x, rect.max_y);
            }
            Some(build_spatial_index(builder)?)
        };

        Ok(Self {
            tree,
            inverted,
            oriented,
            segment_refs,
            segment_index,
        })
    }

    #[inline]
    fn region_contains_point(&self, point: Vector2<T>) -> bool {
        self.tree.contains_point(point) != self.inverted
    }

    #[inline]
    fn region_contains_ring(&self, ring: &Ring<T>) -> bool {
        self.tree.contains_ring(ring) != self.inverted
    }

    /// Oriented boundary segment passing within `eps` of `point`.
    fn boundary_segment_at(&self, point: Vector2<T>, eps: T) -> Option<Segment<T>> {
        let index = self.segment_index.as_ref()?;
        let eps_sq = eps * eps;
        index
            .query(point.x - eps, point.y - eps, point.x + eps, point.y + eps)
            .into_iter()
            .map(|k| {
                let (i, j) = self.segment_refs[k];
                self.oriented.rings[i].segment(j)
            })
            .find(|seg| seg.distance_squared_to_point(point) < eps_sq)
    }
}

/// Position along a ring where the ring is cut.
#[derive(Debug, Copy, Clone)]
struct CutPoint<T> {
    segment_index: usize,
    ratio: T,
    point: Vector2<T>,
}

/// Open piece of a ring boundary between two consecutive cut points (or a whole ring cut once).
#[derive(Debug, Clone)]
struct BoundarySlice<T> {
    points: Vec<Vector2<T>>,
    source_is_a: bool,
}

fn push_remove_repeat<T>(points: &mut Vec<Vector2<T>>, point: Vector2<T>, eps: T)
where
    T: Real,
{
    if points.last().is_some_and(|l| l.fuzzy_eq_eps(point, eps)) {
        return;
    }
    points.push(point);
}

/// Cut points of each ring sorted along the ring with coincident cut points merged.
fn cut_points_by_ring<T>(
    crossings: &[PolygonCrossing<T>],
    ring_count: usize,
    use_location_a: bool,
    eps: T,
) -> Vec<Vec<CutPoint<T>>>
where
    T: Real,
{
    let mut by_ring = vec![Vec::new(); ring_count];
    for c in crossings.iter() {
        let loc = if use_location_a {
            c.location_a
        } else {
            c.location_b
        };
        by_ring[loc.ring_index].push(CutPoint {
            segment_index: loc.segment_index,
            ratio: loc.ratio,
            point: c.point,
        });
    }

    for cuts in by_ring.iter_mut() {
        cuts.sort_by(|x, y| {
            x.segment_index.cmp(&y.segment_index).then_with(|| {
                x.ratio
                    .partial_cmp(&y.ratio)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        cuts.dedup_by(|next, prev| next.point.fuzzy_eq_eps(prev.point, eps));
        while cuts.len() > 1 && cuts[0].point.fuzzy_eq_eps(cuts[cuts.len() - 1].point, eps) {
            cuts.pop();
        }
    }

    by_ring
}

/// Cut `ring` into slices between consecutive cut points.
fn slice_ring<T>(
    ring: &Ring<T>,
    cuts: &[CutPoint<T>],
    source_is_a: bool,
    eps: T,
    output: &mut Vec<BoundarySlice<T>>,
) where
    T: Real,
{
    let n = ring.point_count();
    let k = cuts.len();
    for idx in 0..k {
        let start = cuts[idx];
        let wraps = idx + 1 == k;
        let end = cuts[(idx + 1) % k];

        let vertex_count = if !wraps && end.segment_index == start.segment_index {
            0
        } else {
            match (end.segment_index + n - start.segment_index) % n {
                0 => n,
                c => c,
            }
        };

        let mut points = Vec::with_capacity(vertex_count + 2);
        points.push(start.point);
        for j in 1..=vertex_count {
            push_remove_repeat(&mut points, ring[(start.segment_index + j) % n], eps);
        }
        push_remove_repeat(&mut points, end.point, eps);

        if points.len() < 2 {
            continue;
        }

        output.push(BoundarySlice {
            points,
            source_is_a,
        });
    }
}

/// Whether a slice lies on the boundary of the intersection of its own region with `other`.
///
/// The midpoint of the slice's first segment decides. A slice running along the other operand's
/// boundary is kept once (from the first operand) when both regions lie on the same side of it and
/// dropped when they lie on opposite sides.
fn keep_slice<T>(slice: &BoundarySlice<T>, other: &Operand<T>, eps: T) -> bool
where
    T: Real,
{
    let p0 = slice.points[0];
    let p1 = slice.points[1];
    let mid = midpoint(p0, p1);
    match other.boundary_segment_at(mid, eps) {
        Some(other_seg) => slice.source_is_a && (p1 - p0).dot(other_seg.direction()) > T::zero(),
        None => other.region_contains_point(mid),
    }
}

/// Picks the slice to continue with at a shared point: the tightest left turn relative to the
/// incoming direction, so touching output regions are traced separately.
fn select_next_slice<T>(
    current: &[Vector2<T>],
    slices: &[BoundarySlice<T>],
    candidates: &[usize],
) -> Option<usize>
where
    T: Real,
{
    if candidates.len() == 1 {
        return Some(candidates[0]);
    }

    let n = current.len();
    let back = current[n - 2] - current[n - 1];
    candidates.iter().copied().min_by(|&i, &j| {
        let cw_angle = |s: &BoundarySlice<T>| {
            let out = s.points[1] - s.points[0];
            T::tau() - ccw_angle_between(back, out)
        };
        cw_angle(&slices[i])
            .partial_cmp(&cw_angle(&slices[j]))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    })
}

/// Stitch slices end to start into closed point loops.
fn stitch_slices<T>(
    slices: &[BoundarySlice<T>],
    slice_join_eps: T,
    pos_equal_eps: T,
) -> Result<Vec<Vec<Vector2<T>>>, PolygonError>
where
    T: Real,
{
    let mut result = Vec::new();
    if slices.is_empty() {
        return Ok(result);
    }

    // load all the slice start points into spatial index
    let aabb_index = {
        let mut builder = StaticAABB2DIndexBuilder::new(slices.len());
        for slice in slices.iter() {
            let pt = slice.points[0];
            builder.add(
                pt.x - slice_join_eps,
                pt.y - slice_join_eps,
                pt.x + slice_join_eps,
                pt.y + slice_join_eps,
            );
        }
        build_spatial_index(builder)?
    };

    let mut visited = vec![false; slices.len()];
    for i in 0..slices.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let beginning = i;
        let mut current = slices[i].points.clone();
        let mut loop_count = 0;
        let max_loop_count = slices.len();
        loop {
            if loop_count > max_loop_count {
                unreachable!("loop_count exceeded max_loop_count while stitching slices");
            }
            loop_count += 1;

            let ep = current[current.len() - 1];
            let candidates: Vec<usize> = aabb_index
                .query(
                    ep.x - slice_join_eps,
                    ep.y - slice_join_eps,
                    ep.x + slice_join_eps,
                    ep.y + slice_join_eps,
                )
                .into_iter()
                .filter(|&c| c == beginning || !visited[c])
                .collect();

            let Some(next) = select_next_slice(&current, slices, &candidates) else {
                // may arrive here due to epsilon/thresholds around overlapping segments
                warn!(
                    "discarding unclosed trace of {} points starting at slice {}",
                    current.len(),
                    beginning
                );
                break;
            };

            if next == beginning {
                current.pop();
                result.push(current);
                break;
            }

            current.pop();
            for &p in slices[next].points.iter() {
                push_remove_repeat(&mut current, p, pos_equal_eps);
            }
            visited[next] = true;
        }
    }

    Ok(result)
}

/// Split a closed point loop wherever it passes through the same point twice.
fn split_at_repeated_points<T>(points: Vec<Vector2<T>>, eps: T) -> Vec<Vec<Vector2<T>>>
where
    T: Real,
{
    let find_repeat = |pts: &[Vector2<T>]| {
        let mut order: Vec<usize> = (0..pts.len()).collect();
        order.sort_by(|&i, &j| pts[i].total_cmp(&pts[j]));
        order
            .windows(2)
            .find(|w| pts[w[0]].fuzzy_eq_eps(pts[w[1]], eps))
            .map(|w| (w[0].min(w[1]), w[0].max(w[1])))
    };

    let mut result = Vec::new();
    let mut stack = vec![points];
    while let Some(pts) = stack.pop() {
        match find_repeat(&pts) {
            Some((i, j)) => {
                let inner = pts[i..j].to_vec();
                let mut outer = pts[j..].to_vec();
                outer.extend_from_slice(&pts[..i]);
                stack.push(inner);
                stack.push(outer);
            }
            None => result.push(pts),
        }
    }

    result
}

/// Turn a traced loop into output rings with explicit hole flags (fills counter clockwise).
fn finalize_loop<T>(
    points: Vec<Vector2<T>>,
    eps: T,
    invert_result: bool,
    output: &mut Vec<Ring<T>>,
) where
    T: Real,
{
    let traced = Ring::from_points(points, HoleFlag::Unknown).remove_repeat_eps(eps);
    for pts in split_at_repeated_points(traced.points, eps) {
        let ring = Ring::from_points(pts, HoleFlag::Unknown).remove_redundant_eps(eps);
        if ring.point_count() < 3 || ring.signed_area().abs() < eps * eps {
            continue;
        }

        let is_hole = (ring.orientation() == RingOrientation::Clockwise) != invert_result;
        let mut ring = if invert_result { ring.reversed() } else { ring };
        ring.hole = HoleFlag::from_is_hole(is_hole);
        output.push(ring);
    }
}

/// Intersection of two polygons honoring the polarity inversions of `options`.
///
/// Inverting an argument complements its region without touching its points, inverting the result
/// complements the output's fill/hole classification. Returns `Ok(None)` for an empty region.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{polygon, ring};
/// # use polygon_algebra::polygon::internal::polygon_intersect::polygon_intersect;
/// # use polygon_algebra::polygon::{Polygon, PolygonBooleanOptions};
/// let a: Polygon = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
/// let b = polygon![ring![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]];
/// let result = polygon_intersect(&a, &b, &PolygonBooleanOptions::new()).unwrap().unwrap();
/// assert_eq!(result.ring_count(), 1);
/// assert!((result.area().unwrap() - 0.25).abs() < 1e-8);
/// ```
pub fn polygon_intersect<T>(
    polygon_a: &Polygon<T>,
    polygon_b: &Polygon<T>,
    options: &PolygonBooleanOptions<T>,
) -> Result<Option<Polygon<T>>, PolygonError>
where
    T: Real,
{
    options.validate()?;
    for (name, p) in [("first", polygon_a), ("second", polygon_b)] {
        if !p.is_finite() {
            return Err(PolygonError::InvalidArgument {
                reason: format!("{name} polygon has a non-finite coordinate"),
            });
        }
    }

    let eps = options.pos_equal_eps;
    let (rings_a, source_a) = cleaned_rings(polygon_a, eps);
    let (rings_b, source_b) = cleaned_rings(polygon_b, eps);
    let operand_a = Operand::new(&rings_a, &source_a, options.invert_left_hand_side, eps)?;
    let operand_b = Operand::new(&rings_b, &source_b, options.invert_right_hand_side, eps)?;

    let crossings = find_crossings(
        &operand_a.oriented,
        &operand_b.oriented,
        &options.crossing_options(),
    );

    let cuts_a = cut_points_by_ring(&crossings, rings_a.len(), true, eps);
    let cuts_b = cut_points_by_ring(&crossings, rings_b.len(), false, eps);

    let mut slices = Vec::new();
    let mut output_rings = Vec::new();
    let mut slice_count = 0;
    for (this, other, cuts, source_is_a) in [
        (&operand_a, &operand_b, &cuts_a, true),
        (&operand_b, &operand_a, &cuts_b, false),
    ] {
        for (ring, ring_cuts) in this.oriented.rings.iter().zip(cuts.iter()) {
            if ring_cuts.is_empty() {
                // clean ring, whole ring is in or out
                if other.region_contains_ring(ring) {
                    finalize_loop(
                        ring.points.clone(),
                        eps,
                        options.invert_result,
                        &mut output_rings,
                    );
                }
                continue;
            }

            let mut ring_slices = Vec::new();
            slice_ring(ring, ring_cuts, source_is_a, eps, &mut ring_slices);
            slice_count += ring_slices.len();
            slices.extend(ring_slices.into_iter().filter(|s| keep_slice(s, other, eps)));
        }
    }

    debug!(
        "intersect: {} crossings, kept {} of {} slices, {} clean rings kept",
        crossings.len(),
        slices.len(),
        slice_count,
        output_rings.len()
    );

    for traced in stitch_slices(&slices, options.slice_join_eps, eps)? {
        finalize_loop(traced, eps, options.invert_result, &mut output_rings);
    }

    debug!("intersect: {} output rings", output_rings.len());
    if output_rings.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Polygon::from_rings(output_rings)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn pinched_loop_splits_into_two() {
        let pts = vec![
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(2.0, 1.0),
            vec2(2.0, 2.0),
            vec2(1.0, 2.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ];
        let mut rings = Vec::new();
        finalize_loop(pts, 1e-5, false, &mut rings);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.hole == HoleFlag::Fill));
        assert!(rings.iter().all(|r| r.point_count() == 4));
    }

    #[test]
    fn cut_points_merge_at_ring_start() {
        let a = vec2(0.0, 0.0);
        let crossings = vec![
            PolygonCrossing::new(
                vec2(1.0, 0.0),
                crate::polygon::BoundaryLocation::new(0, 1, 0.0),
                crate::polygon::BoundaryLocation::new(0, 0, 0.5),
            ),
            PolygonCrossing::new(
                a,
                crate::polygon::BoundaryLocation::new(0, 3, 0.999_999_9),
                crate::polygon::BoundaryLocation::new(0, 1, 0.5),
            ),
            PolygonCrossing::new(
                a,
                crate::polygon::BoundaryLocation::new(0, 0, 0.0),
                crate::polygon::BoundaryLocation::new(0, 2, 0.5),
            ),
        ];
        let cuts = cut_points_by_ring(&crossings, 1, true, 1e-5);
        assert_eq!(cuts[0].len(), 2);
        assert_eq!(cuts[0][0].segment_index, 0);
        assert_eq!(cuts[0][1].segment_index, 1);
    }

    #[test]
    fn single_cut_slices_whole_ring() {
        let ring = crate::ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let cuts = [CutPoint {
            segment_index: 1,
            ratio: 0.5,
            point: vec2(1.0, 0.5),
        }];
        let mut slices = Vec::new();
        slice_ring(&ring, &cuts, true, 1e-5, &mut slices);
        assert_eq!(slices.len(), 1);
        assert_eq!(
            slices[0].points,
            vec![
                vec2(1.0, 0.5),
                vec2(1.0, 1.0),
                vec2(0.0, 1.0),
                vec2(0.0, 0.0),
                vec2(1.0, 0.0),
                vec2(1.0, 0.5)
            ]
        );
    }
}
