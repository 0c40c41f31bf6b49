//! Signature type and its wire encoding.

use curve::{Affine, Choice, FieldElement, Scalar};
use serde::{Deserialize, Serialize};

use crate::codec::decode_signature;
use crate::constants::{COMMITMENT_SIZE, SIG_SIZE};
use crate::errors::SchnorrError;

/// A Schnorr signature consisting of a commitment and a response.
///
/// The signature is a pair `(r, s)` where:
/// - `r` is the x-coordinate of the commitment point `R = k*G`, always the
///   point with even y
/// - `s` is the response scalar `k + e*sk`
///
/// # Structure
///
/// The signature satisfies `s*G - e*P == R`, where `P` is the public key and
/// `e` is the Fiat-Shamir challenge derived from `r`, `P` and the message
/// digest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Signature {
    r: FieldElement,
    s: Scalar,
}

impl Signature {
    pub fn new(r: FieldElement, s: Scalar) -> Self {
        Self { r, s }
    }

    /// Parse a 64-byte `r || s` encoding. See [`decode_signature`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        decode_signature(bytes)
    }

    /// Canonical 64-byte `r || s` encoding.
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..COMMITMENT_SIZE].copy_from_slice(&self.r.to_bytes());
        out[COMMITMENT_SIZE..].copy_from_slice(&self.s.to_bytes());
        out
    }

    #[inline]
    pub fn commitment_x(&self) -> &FieldElement {
        &self.r
    }

    #[inline]
    pub fn response(&self) -> &Scalar {
        &self.s
    }

    /// Lift `r` to the commitment point with even y.
    ///
    /// Fails with [`SchnorrError::Encoding`] if no point has x-coordinate `r`.
    pub fn commitment(&self) -> Result<Affine, SchnorrError> {
        Ok(Affine::decompress(&self.r.to_bytes(), Choice::from(0))?)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SchnorrError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        decode_signature(bytes)
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = SchnorrError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        decode_signature(&bytes)
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Self {
        sig.to_bytes().to_vec()
    }
}
