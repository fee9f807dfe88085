use crate::{
    core::{
        math::{BoundingRect, Vector2},
        traits::Real,
    },
    error::PolygonError,
};

use super::{
    boolean::{difference_opt, intersect_opt, union_opt, xor_opt},
    internal::boundary_tree::RingBoundaryTree,
    BooleanOp, PolygonBooleanOptions, Ring,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Region described by an ordered collection of rings.
///
/// No winding direction is imposed on the rings. Rings with an unknown hole flag are classified by
/// nesting (see [RingBoundaryTree]).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon<T = f64> {
    pub rings: Vec<Ring<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { rings: Vec::new() }
    }

    #[inline]
    pub fn from_rings(rings: Vec<Ring<T>>) -> Self {
        Self { rings }
    }

    #[inline]
    pub fn add_ring(&mut self, ring: Ring<T>) {
        self.rings.push(ring);
    }

    #[inline]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Returns `true` if the polygon has no rings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Bounding rectangle of all the ring points, `None` if there are no points.
    pub fn bounding_rect(&self) -> Option<BoundingRect<T>> {
        BoundingRect::from_points(self.rings.iter().flat_map(|r| r.points.iter().copied()))
    }

    /// Polygon with every ring's point order reversed.
    pub fn reversed(&self) -> Self {
        Self {
            rings: self.rings.iter().map(|r| r.reversed()).collect(),
        }
    }

    /// Returns `true` if all coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.rings.iter().all(|r| r.is_finite())
    }

    /// Build the containment tree of the rings using `eps` for boundary tests.
    #[inline]
    pub fn boundary_tree(&self, eps: T) -> Result<RingBoundaryTree<'_, T>, PolygonError> {
        RingBoundaryTree::build(&self.rings, eps)
    }

    /// Area of the region: fill rings add and hole rings subtract.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_algebra::{polygon, polygon::Polygon, ring};
    /// let p: Polygon = polygon![
    ///     ring![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
    ///     ring![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)],
    /// ];
    /// assert!((p.area().unwrap() - 12.0).abs() < 1e-8);
    /// ```
    pub fn area(&self) -> Result<T, PolygonError> {
        let eps = T::from(1e-5).unwrap();
        let tree = self.boundary_tree(eps)?;
        let mut total = T::zero();
        for (i, ring) in self.rings.iter().enumerate() {
            match tree.is_hole(i) {
                Some(true) => total = total - ring.signed_area().abs(),
                Some(false) => total = total + ring.signed_area().abs(),
                None => {}
            }
        }

        Ok(total)
    }

    /// Returns `true` if `point` lies in the filled region (result is arbitrary on a boundary).
    pub fn contains_point(&self, point: Vector2<T>) -> Result<bool, PolygonError> {
        let eps = T::from(1e-5).unwrap();
        Ok(self.boundary_tree(eps)?.contains_point(point))
    }

    /// Returns `true` if both polygons have the same rings with the same fill/hole classification,
    /// ignoring ring order, starting point, orientation and collinear redundant vertexes.
    ///
    /// Polygons whose hole flags are inconsistent with their nesting are never equal.
    pub fn spatially_eq_eps(&self, other: &Polygon<T>, eps: T) -> bool {
        let (Ok(tree_self), Ok(tree_other)) = (self.boundary_tree(eps), other.boundary_tree(eps))
        else {
            return false;
        };

        let classified = |p: &Polygon<T>, tree: &RingBoundaryTree<T>| {
            p.rings
                .iter()
                .enumerate()
                .filter_map(|(i, r)| tree.is_hole(i).map(|h| (r.remove_redundant_eps(eps), h)))
                .filter(|(r, _)| r.point_count() >= 3)
                .collect::<Vec<_>>()
        };

        let lhs = classified(self, &tree_self);
        let rhs = classified(other, &tree_other);
        if lhs.len() != rhs.len() {
            return false;
        }

        let mut matched = vec![false; rhs.len()];
        lhs.iter().all(|(r, is_hole)| {
            let found = rhs.iter().enumerate().position(|(j, (o, o_hole))| {
                !matched[j] && is_hole == o_hole && r.same_boundary_eps(o, eps)
            });
            match found {
                Some(j) => {
                    matched[j] = true;
                    true
                }
                None => false,
            }
        })
    }

    /// Perform a boolean `operation` between this polygon and another using default options.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_algebra::{polygon, ring};
    /// # use polygon_algebra::polygon::*;
    /// let a: Polygon = polygon![ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]];
    /// let b = polygon![ring![(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]];
    /// let union = a.boolean(&b, BooleanOp::Or).unwrap().unwrap();
    /// assert_eq!(union.ring_count(), 1);
    /// assert!((union.area().unwrap() - 1.75).abs() < 1e-8);
    /// ```
    #[inline]
    pub fn boolean(
        &self,
        other: &Polygon<T>,
        operation: BooleanOp,
    ) -> Result<Option<Polygon<T>>, PolygonError> {
        self.boolean_opt(other, operation, &PolygonBooleanOptions::new())
    }

    /// Perform a boolean `operation` between this polygon and another using the options given.
    ///
    /// The invert flags of `options` are replaced by the ones `operation` requires.
    pub fn boolean_opt(
        &self,
        other: &Polygon<T>,
        operation: BooleanOp,
        options: &PolygonBooleanOptions<T>,
    ) -> Result<Option<Polygon<T>>, PolygonError> {
        let plain = options.with_inversions(false, false, false);
        match operation {
            BooleanOp::Or => union_opt(Some(self), Some(other), &plain),
            BooleanOp::And => intersect_opt(Some(self), Some(other), &plain),
            BooleanOp::Not => difference_opt(Some(self), Some(other), &plain),
            BooleanOp::Xor => xor_opt(Some(self), Some(other), &plain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, ring};

    fn square(min: f64, max: f64) -> Ring<f64> {
        ring![(min, min), (max, min), (max, max), (min, max)]
    }

    #[test]
    fn spatial_eq_ignores_order_start_and_winding() {
        let a = Polygon::from_rings(vec![square(0.0, 10.0), square(2.0, 4.0)]);
        let mut shifted = square(0.0, 10.0).reversed();
        shifted.points.rotate_left(2);
        shifted.points.insert(1, vec2(5.0, 0.0));
        let b = Polygon::from_rings(vec![square(2.0, 4.0).reversed(), shifted]);
        assert!(a.spatially_eq_eps(&b, 1e-5));
        assert!(!a.spatially_eq_eps(&Polygon::from_rings(vec![square(0.0, 10.0)]), 1e-5));
    }

    #[test]
    fn contains_point_respects_holes() {
        let p = Polygon::from_rings(vec![square(0.0, 10.0), square(2.0, 4.0)]);
        assert!(p.contains_point(vec2(1.0, 1.0)).unwrap());
        assert!(!p.contains_point(vec2(3.0, 3.0)).unwrap());
        assert!(!p.contains_point(vec2(11.0, 3.0)).unwrap());
    }
}
