//! Boundary crossing generation between two polygons.
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::{Arc, PoisonError, RwLock},
};

use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    core::{
        math::{segment_segment_intr_eps, BoundingRect, IntrPoint, SegmentSegmentIntr},
        traits::Real,
    },
    polygon::{BoundaryLocation, CrossingOptions, CrossingStrategy, Polygon, PolygonCrossing, Ring},
};

/// Identity of a ring's content: point count plus a hash of every coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct RingKey {
    point_count: usize,
    fingerprint: u64,
}

impl RingKey {
    fn new<T: Real>(ring: &Ring<T>) -> Self {
        let mut hasher = DefaultHasher::new();
        for p in ring.points.iter() {
            p.x.hash_bits().hash(&mut hasher);
            p.y.hash_bits().hash(&mut hasher);
        }

        Self {
            point_count: ring.point_count(),
            fingerprint: hasher.finish(),
        }
    }
}

/// Caller owned cache of ring segment indexes sorted by segment minimum x.
///
/// Rings are immutable inputs so entries are never invalidated. Lookups take a shared read lock,
/// a missing entry is computed outside any lock and inserted if still absent (the first writer
/// wins), so concurrent workers asking for the same ring never block each other on the sort.
#[derive(Debug, Default)]
pub struct SegmentOrderCache {
    orders: RwLock<HashMap<RingKey, Arc<[usize]>>>,
}

impl SegmentOrderCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rings cached.
    pub fn len(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segment indexes of `ring` sorted by their minimum x, computed on first request.
    pub fn sorted_segment_order<T>(&self, ring: &Ring<T>) -> Arc<[usize]>
    where
        T: Real,
    {
        let key = RingKey::new(ring);
        if let Some(order) = self
            .orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(order);
        }

        let order: Arc<[usize]> = sort_segments_by_min_x(ring).into();
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(orders.entry(key).or_insert(order))
    }
}

fn sort_segments_by_min_x<T>(ring: &Ring<T>) -> Vec<usize>
where
    T: Real,
{
    let min_xs: Vec<T> = ring
        .iter_segments()
        .map(|s| num_traits::real::Real::min(s.a.x, s.b.x))
        .collect();
    let mut order: Vec<usize> = (0..min_xs.len()).collect();
    order.sort_by(|&i, &j| {
        min_xs[i]
            .partial_cmp(&min_xs[j])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(i.cmp(&j))
    });
    order
}

/// Crossing for an intersect point unless it falls on the second point of either segment.
///
/// Every ring vertex is the end of one segment and the start of the next, so keeping only the
/// start occurrences emits each shared vertex crossing exactly once.
#[inline]
fn crossing_from_intr<T>(
    intr: &IntrPoint<T>,
    ring_a: usize,
    seg_a: usize,
    ring_b: usize,
    seg_b: usize,
) -> Option<PolygonCrossing<T>>
where
    T: Real,
{
    if intr.at_either_end() {
        return None;
    }

    Some(PolygonCrossing::new(
        intr.point,
        BoundaryLocation::new(ring_a, seg_a, intr.ratio1),
        BoundaryLocation::new(ring_b, seg_b, intr.ratio2),
    ))
}

struct RingPair<'a, T> {
    ring_a: &'a Ring<T>,
    ring_b: &'a Ring<T>,
    index_a: usize,
    index_b: usize,
}

impl<'a, T> RingPair<'a, T>
where
    T: Real,
{
    fn classify_segment_pair(
        &self,
        seg_a: usize,
        seg_b: usize,
        eps: T,
        output: &mut Vec<PolygonCrossing<T>>,
    ) {
        let intr = segment_segment_intr_eps(
            self.ring_a.segment(seg_a),
            self.ring_b.segment(seg_b),
            eps,
        );

        let mut push = |p: &IntrPoint<T>| {
            if let Some(c) = crossing_from_intr(p, self.index_a, seg_a, self.index_b, seg_b) {
                output.push(c);
            }
        };

        match intr {
            SegmentSegmentIntr::NoIntersect => {}
            SegmentSegmentIntr::Point(p) => push(&p),
            SegmentSegmentIntr::Overlapping { start, end, .. } => {
                push(&start);
                push(&end);
            }
        }
    }

    fn crossings_exhaustive(&self, eps: T) -> Vec<PolygonCrossing<T>> {
        let mut result = Vec::new();
        let rects_b: Vec<BoundingRect<T>> =
            self.ring_b.iter_segments().map(|s| s.bounding_rect()).collect();

        for (seg_a, s) in self.ring_a.iter_segments().enumerate() {
            let rect_a = s.bounding_rect();
            for (seg_b, rect_b) in rects_b.iter().enumerate() {
                if rect_a.intersects_eps(rect_b, eps) {
                    self.classify_segment_pair(seg_a, seg_b, eps, &mut result);
                }
            }
        }

        result
    }

    fn crossings_sweep(&self, eps: T, cache: &SegmentOrderCache) -> Vec<PolygonCrossing<T>> {
        let order_a = cache.sorted_segment_order(self.ring_a);
        let order_b = cache.sorted_segment_order(self.ring_b);
        let rects_a: Vec<BoundingRect<T>> =
            self.ring_a.iter_segments().map(|s| s.bounding_rect()).collect();
        let rects_b: Vec<BoundingRect<T>> =
            self.ring_b.iter_segments().map(|s| s.bounding_rect()).collect();

        let mut candidates = Vec::new();
        for &seg_a in order_a.iter() {
            let rect_a = &rects_a[seg_a];
            let max_x = rect_a.max_x + eps;
            let end = order_b.partition_point(|&seg_b| rects_b[seg_b].min_x <= max_x);
            for &seg_b in order_b[..end].iter() {
                if rect_a.intersects_eps(&rects_b[seg_b], eps) {
                    candidates.push((seg_a, seg_b));
                }
            }
        }

        // classify in segment index order so output matches the exhaustive enumeration
        candidates.sort_unstable();
        let mut result = Vec::new();
        for (seg_a, seg_b) in candidates {
            self.classify_segment_pair(seg_a, seg_b, eps, &mut result);
        }

        result
    }
}

/// Find every point where the boundary of `polygon_a` meets the boundary of `polygon_b`.
///
/// Ring pairs whose bounding rectangles do not touch are skipped before any segment work. Each
/// point intersect contributes one crossing and each collinear overlap contributes up to two (one
/// per overlap end point), in every case discarding points on the second point of either segment
/// so shared vertexes are reported exactly once.
///
/// Crossings are ordered by ring pair `(ring_index_a, ring_index_b)`, then by segment pair, for
/// every [CrossingStrategy].
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{polygon, ring};
/// # use polygon_algebra::polygon::internal::crossings::find_crossings;
/// # use polygon_algebra::polygon::CrossingOptions;
/// let a = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
/// let b = polygon![ring![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]];
/// let crossings = find_crossings(&a, &b, &CrossingOptions::new());
/// assert_eq!(crossings.len(), 2);
/// ```
pub fn find_crossings<T>(
    polygon_a: &Polygon<T>,
    polygon_b: &Polygon<T>,
    options: &CrossingOptions<T>,
) -> Vec<PolygonCrossing<T>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    let rects_a: Vec<Option<BoundingRect<T>>> =
        polygon_a.rings.iter().map(|r| r.bounding_rect()).collect();
    let rects_b: Vec<Option<BoundingRect<T>>> =
        polygon_b.rings.iter().map(|r| r.bounding_rect()).collect();

    let mut ring_pairs = Vec::new();
    for (i, rect_a) in rects_a.iter().enumerate() {
        let Some(rect_a) = rect_a else {
            continue;
        };
        for (j, rect_b) in rects_b.iter().enumerate() {
            if rect_b.is_some_and(|rect_b| rect_a.intersects_eps(&rect_b, eps)) {
                ring_pairs.push(RingPair {
                    ring_a: &polygon_a.rings[i],
                    ring_b: &polygon_b.rings[j],
                    index_a: i,
                    index_b: j,
                });
            }
        }
    }

    let local_cache = SegmentOrderCache::new();
    let cache = options.segment_order_cache.unwrap_or(&local_cache);

    let per_pair: Vec<Vec<PolygonCrossing<T>>> = match options.strategy {
        CrossingStrategy::Exhaustive => ring_pairs
            .iter()
            .map(|pair| pair.crossings_exhaustive(eps))
            .collect(),
        CrossingStrategy::Sweep => ring_pairs
            .iter()
            .map(|pair| pair.crossings_sweep(eps, cache))
            .collect(),
        // indexed parallel collect keeps ring pair order
        CrossingStrategy::Parallel => ring_pairs
            .par_iter()
            .map(|pair| pair.crossings_sweep(eps, cache))
            .collect(),
    };

    for (pair, crossings) in ring_pairs.iter().zip(per_pair.iter()) {
        trace!(
            "ring pair ({}, {}) produced {} crossings",
            pair.index_a,
            pair.index_b,
            crossings.len()
        );
    }

    let result: Vec<PolygonCrossing<T>> = per_pair.into_iter().flatten().collect();
    debug!(
        "found {} crossings across {} candidate ring pairs ({:?})",
        result.len(),
        ring_pairs.len(),
        options.strategy
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{polygon, ring};

    #[test]
    fn cache_reuses_sorted_orders() {
        let cache = SegmentOrderCache::new();
        let r = ring![(3.0, 0.0), (4.0, 1.0), (0.0, 2.0), (1.0, 0.5)];
        let order = cache.sorted_segment_order(&r);
        assert_eq!(&order[..], &[1, 2, 3, 0]);
        let again = cache.sorted_segment_order(&r.clone());
        assert!(Arc::ptr_eq(&order, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn disjoint_ring_bounds_are_skipped() {
        let a = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]];
        let b = polygon![ring![(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]];
        assert!(find_crossings(&a, &b, &CrossingOptions::new()).is_empty());
    }
}
