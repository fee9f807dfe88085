//! Containment forest over non crossing rings, used to resolve fill/hole nesting.
use log::trace;

use crate::{
    core::{math::Vector2, traits::Real},
    error::PolygonError,
    polygon::{PointLocation, Ring, RingOrientation},
};

/// Containment forest over a set of rings that do not cross each other.
///
/// Nodes are stored in an arena indexed by ring index (one node per ring), a ring nested directly
/// inside another ring is a child of it. Degenerate rings (fewer than 3 points or zero area) bound
/// nothing and are left out of the tree.
///
/// Rings at the same nesting level (siblings) share one fill/hole state and every level is the
/// complement of its parent's level. The first explicit flag, at whatever depth, fixes the state
/// of all levels; with no explicit flags the root level is fill.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{ring, core::math::vec2};
/// # use polygon_algebra::polygon::internal::boundary_tree::RingBoundaryTree;
/// let rings = vec![
///     ring![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
///     ring![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)],
/// ];
/// let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
/// assert_eq!(tree.is_hole(1), Some(true));
/// assert!(tree.contains_point(vec2(1.0, 1.0)));
/// assert!(!tree.contains_point(vec2(5.0, 5.0)));
/// ```
#[derive(Debug, Clone)]
pub struct RingBoundaryTree<'a, T> {
    rings: &'a [Ring<T>],
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
    parent: Vec<Option<usize>>,
    in_tree: Vec<bool>,
    root_level_is_hole: bool,
    eps: T,
}

impl<'a, T> RingBoundaryTree<'a, T>
where
    T: Real,
{
    /// Build the tree by inserting `rings` one at a time.
    ///
    /// Fails with [PolygonError::InconsistentHoleFlags] if a ring's explicit hole flag contradicts
    /// the state established for its nesting level, the lowest offending ring index is reported.
    pub fn build(rings: &'a [Ring<T>], eps: T) -> Result<Self, PolygonError> {
        let n = rings.len();
        let mut tree = Self {
            rings,
            roots: Vec::new(),
            children: vec![Vec::new(); n],
            parent: vec![None; n],
            in_tree: vec![false; n],
            root_level_is_hole: false,
            eps,
        };

        for i in 0..n {
            if rings[i].orientation() == RingOrientation::Degenerate {
                trace!("ring {} is degenerate, left out of boundary tree", i);
                continue;
            }
            tree.insert(i);
        }

        tree.resolve_hole_flags()?;
        Ok(tree)
    }

    fn level(&self, parent: Option<usize>) -> &Vec<usize> {
        match parent {
            None => &self.roots,
            Some(p) => &self.children[p],
        }
    }

    fn level_mut(&mut self, parent: Option<usize>) -> &mut Vec<usize> {
        match parent {
            None => &mut self.roots,
            Some(p) => &mut self.children[p],
        }
    }

    fn insert(&mut self, ring_index: usize) {
        let rings = self.rings;
        let eps = self.eps;
        let new_ring = &rings[ring_index];

        // descend to the deepest node bounding the new ring
        let mut parent = None;
        while let Some(c) = self
            .level(parent)
            .iter()
            .copied()
            .find(|&c| rings[c].non_intersecting_contains_eps(new_ring, eps))
        {
            parent = Some(c);
        }

        // reparent siblings the new ring bounds
        let siblings = std::mem::take(self.level_mut(parent));
        let (moved, mut kept): (Vec<usize>, Vec<usize>) = siblings
            .into_iter()
            .partition(|&c| new_ring.non_intersecting_contains_eps(&rings[c], eps));

        for &c in moved.iter() {
            self.parent[c] = Some(ring_index);
        }
        self.children[ring_index] = moved;
        kept.push(ring_index);
        *self.level_mut(parent) = kept;
        self.parent[ring_index] = parent;
        self.in_tree[ring_index] = true;
    }

    fn resolve_hole_flags(&mut self) -> Result<(), PolygonError> {
        // first explicit flag at any depth fixes the parity of every level
        self.root_level_is_hole = (0..self.rings.len())
            .find_map(|i| {
                let explicit = self.rings[i].hole.as_option()?;
                let depth = self.depth(i)?;
                Some(explicit != (depth % 2 == 1))
            })
            .unwrap_or(false);

        for ring_index in 0..self.rings.len() {
            if let (Some(explicit), Some(resolved)) =
                (self.rings[ring_index].hole.as_option(), self.is_hole(ring_index))
            {
                if explicit != resolved {
                    return Err(PolygonError::InconsistentHoleFlags { ring_index });
                }
            }
        }

        Ok(())
    }

    /// Rings not nested inside any other ring.
    #[inline]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Rings nested directly inside `ring_index`.
    #[inline]
    pub fn children(&self, ring_index: usize) -> &[usize] {
        &self.children[ring_index]
    }

    /// Ring `ring_index` is nested directly inside, `None` for roots and rings not in the tree.
    #[inline]
    pub fn parent(&self, ring_index: usize) -> Option<usize> {
        self.parent[ring_index]
    }

    /// Whether the outermost level of rings are holes (the region is unbounded).
    #[inline]
    pub fn root_level_is_hole(&self) -> bool {
        self.root_level_is_hole
    }

    /// Nesting depth of a ring (0 for roots), `None` if the ring is degenerate.
    pub fn depth(&self, ring_index: usize) -> Option<usize> {
        if !self.in_tree[ring_index] {
            return None;
        }

        let mut depth = 0;
        let mut current = ring_index;
        while let Some(p) = self.parent[current] {
            depth += 1;
            current = p;
        }

        Some(depth)
    }

    /// Effective hole state of a ring, `None` if the ring is degenerate.
    #[inline]
    pub fn is_hole(&self, ring_index: usize) -> Option<bool> {
        self.depth(ring_index)
            .map(|d| (d % 2 == 1) != self.root_level_is_hole)
    }

    /// Returns `true` if `point` lies in the filled region described by the tree.
    ///
    /// Descends through the rings containing the point, the state of the first level with no ring
    /// containing it decides. Result is arbitrary for points on a ring boundary.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        let mut level = &self.roots;
        let mut level_is_hole = self.root_level_is_hole;
        while let Some(&c) = level.iter().find(|&&c| self.rings[c].contains_point(point)) {
            level = &self.children[c];
            level_is_hole = !level_is_hole;
        }

        level_is_hole
    }

    /// Returns `true` if `ring` lies in the filled region, assuming it does not cross any ring of
    /// the tree.
    ///
    /// The first point of `ring` (vertexes first, then segment midpoints) not on any tree ring
    /// boundary decides.
    pub fn contains_ring(&self, ring: &Ring<T>) -> bool {
        let candidates = ring
            .points
            .iter()
            .copied()
            .chain(ring.iter_segments().map(|s| s.midpoint()));

        let mut first = None;
        for pt in candidates {
            first.get_or_insert(pt);
            if !self.is_on_boundary(pt) {
                return self.contains_point(pt);
            }
        }

        // every test point on a boundary (coincident rings), fall back to parity of the first
        first.is_some_and(|pt| self.contains_point(pt))
    }

    /// Returns `true` if `point` is within epsilon of a ring of the tree.
    pub fn is_on_boundary(&self, point: Vector2<T>) -> bool {
        (0..self.rings.len()).any(|i| {
            self.in_tree[i]
                && self.rings[i].classify_point_eps(point, self.eps) == PointLocation::OnBoundary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, fill, hole, ring};

    fn square(min: f64, max: f64) -> Ring<f64> {
        ring![(min, min), (max, min), (max, max), (min, max)]
    }

    #[test]
    fn insertion_order_does_not_change_nesting() {
        let rings = vec![square(2.0, 8.0), square(4.0, 6.0), square(0.0, 10.0)];
        let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
        assert_eq!(tree.roots(), &[2]);
        assert_eq!(tree.children(2), &[0]);
        assert_eq!(tree.children(0), &[1]);
        assert_eq!(tree.depth(1), Some(2));
        assert_eq!(tree.is_hole(0), Some(true));
        assert_eq!(tree.is_hole(1), Some(false));
    }

    #[test]
    fn nested_explicit_flag_sets_outer_levels() {
        let rings = vec![square(0.0, 10.0), fill![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0)]];
        let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
        assert!(tree.root_level_is_hole());
        assert_eq!(tree.is_hole(0), Some(true));
        assert_eq!(tree.is_hole(1), Some(false));
    }

    #[test]
    fn explicit_flag_contradicting_level_fails() {
        let rings = vec![
            square(0.0, 10.0),
            hole![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0)],
            fill![(5.0, 5.0), (7.0, 5.0), (7.0, 7.0)],
        ];
        let err = RingBoundaryTree::build(&rings, 1e-5).unwrap_err();
        assert_eq!(err, PolygonError::InconsistentHoleFlags { ring_index: 2 });
    }

    #[test]
    fn root_holes_describe_unbounded_region() {
        let rings = vec![hole![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
        let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
        assert!(tree.root_level_is_hole());
        assert!(tree.contains_point(vec2(5.0, 5.0)));
        assert!(!tree.contains_point(vec2(0.5, 0.5)));
    }

    #[test]
    fn degenerate_rings_are_left_out() {
        let rings = vec![square(0.0, 1.0), ring![(0.2, 0.2), (0.4, 0.4)]];
        let tree = RingBoundaryTree::build(&rings, 1e-5).unwrap();
        assert_eq!(tree.depth(1), None);
        assert_eq!(tree.is_hole(1), None);
        assert_eq!(tree.roots(), &[0]);
    }
}
