//! Error types for field, scalar and point construction.

use thiserror::Error;

/// Errors returned when decoding or constructing field elements, scalars and
/// curve points, or when a partial field operation has no result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The input did not have the fixed encoding width.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The encoded integer is not below the modulus.
    #[error("non-canonical encoding")]
    NonCanonical,

    /// Zero has no multiplicative inverse.
    #[error("element is not invertible")]
    NotInvertible,

    /// The element is a quadratic non-residue.
    #[error("no square root exists")]
    NoSquareRoot,

    /// The coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The point lies outside the prime-order subgroup.
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,

    /// A compressed encoding had a bad prefix, or its x-coordinate has no
    /// matching point.
    #[error("invalid point encoding")]
    InvalidEncoding,
}
