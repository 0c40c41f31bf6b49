//! Error types for the Schnorr signature scheme.

use curve::CurveError;
use thiserror::Error;

/// Errors that can occur while decoding, signing and verifying.
///
/// Verification never panics on malformed input: every failure is reported as
/// one of these variants, wrapped in a [`crate::Rejection`] by the verifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum SchnorrError {
    /// A field element or scalar had the wrong width or was not canonical,
    /// or a compressed point could not be decompressed.
    #[error("encoding error: {0}")]
    Encoding(CurveError),

    /// The public key coordinates do not satisfy the curve equation.
    #[error("public key is not on the curve")]
    NotOnCurve,

    /// The public key lies outside the prime-order subgroup.
    #[error("public key is not in the prime-order subgroup")]
    NotInSubgroup,

    /// The signature encoding did not have the fixed total width.
    #[error("malformed signature: expected {expected} bytes, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },

    /// A component that honest signing never produces.
    #[error("degenerate input: {0}")]
    DegenerateInput(Degeneracy),

    /// The verification equation did not hold.
    #[error("signature verification failed")]
    VerificationFailed,
}

/// The kinds of degenerate input rejected before or during the equation check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Degeneracy {
    /// The response scalar `s` is zero.
    #[error("zero response scalar")]
    ZeroResponse,

    /// The public key is the point at infinity.
    #[error("identity public key")]
    IdentityPublicKey,

    /// The recomputed commitment `s*G - e*P` is the point at infinity.
    #[error("identity commitment")]
    IdentityCommitment,

    /// The signing nonce is zero.
    #[error("zero nonce")]
    ZeroNonce,

    /// The secret signing scalar is zero.
    #[error("zero secret key")]
    ZeroSecret,
}

impl From<CurveError> for SchnorrError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::NotOnCurve => SchnorrError::NotOnCurve,
            CurveError::NotInSubgroup => SchnorrError::NotInSubgroup,
            other => SchnorrError::Encoding(other),
        }
    }
}
