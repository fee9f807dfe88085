/// Approximate equality for floating point values.
///
/// Coordinates, ratios and lengths are never compared exactly: every equality test goes through
/// this trait, either with an explicit epsilon (the `_eps` forms used by the algorithms) or with
/// the type's default epsilon.
///
/// # Examples
///
/// ```
/// # use polygon_algebra::core::traits::*;
/// let sum: f64 = 0.1 + 0.2;
/// assert_ne!(sum, 0.3);
/// assert!(sum.fuzzy_eq(0.3));
/// assert!(!1.0f64.fuzzy_eq_eps(1.1, 0.01));
/// assert!(1e-6f64.fuzzy_eq_zero_eps(1e-5));
/// ```
pub trait FuzzyEq: Sized + Copy {
    /// Default epsilon of the type.
    fn fuzzy_epsilon() -> Self;

    /// `|self - other| < fuzzy_epsilon`.
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// `|self| < fuzzy_epsilon`.
    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool;

    #[inline]
    fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, Self::fuzzy_epsilon())
    }
}

macro_rules! impl_fuzzy_eq {
    ($ty:ty, $eps:expr) => {
        impl FuzzyEq for $ty {
            #[inline]
            fn fuzzy_epsilon() -> Self {
                $eps
            }

            #[inline]
            fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
                (*self - other).fuzzy_eq_zero_eps(fuzzy_epsilon)
            }

            #[inline]
            fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool {
                self.abs() < fuzzy_epsilon
            }
        }
    };
}

impl_fuzzy_eq!(f32, 1.0e-6);
impl_fuzzy_eq!(f64, 1.0e-8);
