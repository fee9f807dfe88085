//! Error type for polygon boolean operations.
use thiserror::Error;

/// Errors that can occur while performing polygon set operations.
///
/// All failures are scoped to a single operation call, nothing is retained between calls so the
/// caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonError {
    /// An argument was unusable, e.g. a coordinate is NaN or infinite.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument.
        reason: String,
    },

    /// A ring's explicit hole/fill flag contradicts the flag implied by its nesting.
    #[error("ring {ring_index} has a hole/fill flag inconsistent with its nesting")]
    InconsistentHoleFlags {
        /// Index of the offending ring in its polygon.
        ring_index: usize,
    },

    /// An epsilon option was zero, negative, or not finite.
    #[error("epsilon values must be positive and finite")]
    InvalidEpsilon,
}
