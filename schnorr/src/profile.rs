//! Compile-time selection of curve parameters and challenge transcript.

use curve::{Affine, CurveParams, FieldElement, GRUMPKIN, Scalar};

use crate::hasher::{Hasher, Sha256};

/// The hash function and challenge transcript a verifier is instantiated
/// against. Signer and verifier must agree on every byte hashed here.
pub trait Profile {
    /// Stable identifier, used in logs.
    const NAME: &'static str;

    type Hasher: Hasher;

    /// Curve constants, including the encoding widths the verifier expects.
    fn params() -> &'static CurveParams;

    /// Derive the challenge `e` from the commitment `r`, the public key and
    /// the message digest.
    fn challenge(
        commitment: &FieldElement,
        public_key: &Affine,
        digest: &<Self::Hasher as Hasher>::Digest,
    ) -> Scalar;
}

/// Schnorr over Grumpkin with SHA-256.
///
/// The challenge is `SHA-256(r || P.x || P.y || digest)`, read as a big-endian
/// integer and reduced mod `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrumpkinSha256;

impl Profile for GrumpkinSha256 {
    const NAME: &'static str = "grumpkin-schnorr-sha256";

    type Hasher = Sha256;

    fn params() -> &'static CurveParams {
        &GRUMPKIN
    }

    fn challenge(
        commitment: &FieldElement,
        public_key: &Affine,
        digest: &<Self::Hasher as Hasher>::Digest,
    ) -> Scalar {
        let mut hasher = <Self::Hasher as Hasher>::new();
        hasher.update(&commitment.to_bytes());
        hasher.update(&public_key.to_uncompressed());
        hasher.update(digest.as_ref());
        Scalar::from_bytes_reduced(hasher.finalize().as_array())
    }
}
