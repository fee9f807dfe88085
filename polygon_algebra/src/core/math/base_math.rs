use super::Vector2;
use crate::core::traits::Real;

/// Midpoint of a line segment defined by `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) / T::two(), (p0.y + p1.y) / T::two())
}

/// Returns the parametric value of the projection of `point` onto the line through `p0` and `p1`.
///
/// Zero length segments return 0.
#[inline]
pub fn parametric_from_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    let v = p1 - p0;
    let len_sq = v.length_squared();
    if len_sq == T::zero() {
        return T::zero();
    }

    (point - p0).dot(v) / len_sq
}

/// Counter clockwise angle in radians, in `[0, 2PI)`, to rotate direction `from` onto direction
/// `to`.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::core::math::*;
/// # use polygon_algebra::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(ccw_angle_between(vec2(1.0f64, 0.0), vec2(0.0, 1.0)).fuzzy_eq(PI / 2.0));
/// assert!(ccw_angle_between(vec2(1.0f64, 0.0), vec2(0.0, -1.0)).fuzzy_eq(3.0 * PI / 2.0));
/// assert!(ccw_angle_between(vec2(0.0f64, 2.0), vec2(0.0, 1.0)).fuzzy_eq(0.0));
/// ```
#[inline]
pub fn ccw_angle_between<T>(from: Vector2<T>, to: Vector2<T>) -> T
where
    T: Real,
{
    let a = T::atan2(from.perp_dot(to), from.dot(to));
    if a < T::zero() {
        a + T::tau()
    } else {
        a
    }
}

/// Returns `true` if the directions `v1` and `v2` are parallel (or anti-parallel) within
/// `epsilon`, measured as the sine of the angle between them.
#[inline]
pub fn is_parallel_eps<T>(v1: Vector2<T>, v2: Vector2<T>, epsilon: T) -> bool
where
    T: Real,
{
    let scale = v1.length() * v2.length();
    if scale == T::zero() {
        return true;
    }

    (v1.perp_dot(v2) / scale).fuzzy_eq_zero_eps(epsilon)
}
