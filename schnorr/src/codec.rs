//! Byte-level parsing of public keys and signatures.
//!
//! Every decoder requires the exact encoding width and rejects anything else
//! without attempting a partial parse.

use curve::{Affine, FieldElement, Scalar};

use crate::constants::{COMMITMENT_SIZE, SIG_SIZE};
use crate::errors::SchnorrError;
use crate::keys::VerifyingKey;
use crate::signatures::Signature;

/// Decode a 64-byte `x || y` public key.
///
/// # Errors
///
/// Returns [`SchnorrError::Encoding`] for a wrong length or a non-canonical
/// coordinate, [`SchnorrError::NotOnCurve`] or [`SchnorrError::NotInSubgroup`]
/// for an invalid point.
pub fn decode_public_key(bytes: &[u8]) -> Result<VerifyingKey, SchnorrError> {
    let point = Affine::from_uncompressed(bytes)?;
    VerifyingKey::from_point(point)
}

/// Decode a 33-byte `prefix || x` public key, prefix 0x02 for even y and
/// 0x03 for odd y.
///
/// # Errors
///
/// Returns [`SchnorrError::Encoding`] for a wrong length, a bad prefix, a
/// non-canonical `x` or an `x` with no point on the curve.
pub fn decode_compressed_public_key(bytes: &[u8]) -> Result<VerifyingKey, SchnorrError> {
    let point = Affine::from_compressed(bytes)?;
    VerifyingKey::from_point(point)
}

/// Decode a 64-byte `r || s` signature.
///
/// Only the encodings are checked here. Lifting `r` to a curve point and the
/// zero-response check are left to the verifier.
///
/// # Errors
///
/// Returns [`SchnorrError::MalformedSignature`] if the length is not
/// [`SIG_SIZE`], and [`SchnorrError::Encoding`] if `r` is not below `p` or
/// `s` is not below `n`.
pub fn decode_signature(bytes: &[u8]) -> Result<Signature, SchnorrError> {
    if bytes.len() != SIG_SIZE {
        return Err(SchnorrError::MalformedSignature {
            expected: SIG_SIZE,
            actual: bytes.len(),
        });
    }

    let (r, s) = bytes.split_at(COMMITMENT_SIZE);
    let r = FieldElement::from_bytes(r)?;
    let s = Scalar::from_bytes(s)?;

    Ok(Signature::new(r, s))
}
