/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Used for extracting macro repetition count for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Internal helper for the ring construction macros.
#[doc(hidden)]
#[macro_export]
macro_rules! ring_with_flag {
    ($flag:expr; $( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut r = $crate::polygon::Ring::with_capacity(size, $flag);
            $(
                r.add($x.0, $x.1);
            )*
            r
        }
    };
}

/// Construct a ring with an unknown hole flag from a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::ring;
/// # use polygon_algebra::polygon::*;
/// let r = ring![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
/// assert_eq!(r.point_count(), 3);
/// assert_eq!(r.hole, HoleFlag::Unknown);
/// ```
#[macro_export]
macro_rules! ring {
    ($( $x:expr ),* $(,)?) => {
        $crate::ring_with_flag!($crate::polygon::HoleFlag::Unknown; $($x),*)
    };
}

/// Construct a ring explicitly flagged as a fill from a list of (x, y) tuples.
#[macro_export]
macro_rules! fill {
    ($( $x:expr ),* $(,)?) => {
        $crate::ring_with_flag!($crate::polygon::HoleFlag::Fill; $($x),*)
    };
}

/// Construct a ring explicitly flagged as a hole from a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::hole;
/// # use polygon_algebra::polygon::*;
/// let r = hole![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
/// assert_eq!(r.hole, HoleFlag::Hole);
/// ```
#[macro_export]
macro_rules! hole {
    ($( $x:expr ),* $(,)?) => {
        $crate::ring_with_flag!($crate::polygon::HoleFlag::Hole; $($x),*)
    };
}

/// Construct a polygon from a list of rings.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::{polygon, ring, hole};
/// let p = polygon![
///     ring![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
///     hole![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)],
/// ];
/// assert_eq!(p.ring_count(), 2);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $r:expr ),* $(,)?) => {
        $crate::polygon::Polygon::from_rings(vec![$($r),*])
    };
}
