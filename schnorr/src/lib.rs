//! Schnorr signature verification over the Grumpkin elliptic curve.
//!
//! This library implements the `grumpkin-schnorr-sha256` profile:
//! - The Grumpkin curve `y^2 = x^3 - 17`, a prime-order group
//! - SHA-256 for the message pre-hash and the Fiat-Shamir challenge
//! - 64-byte `x || y` public keys and 64-byte `r || s` signatures, where `r`
//!   is the x-coordinate of the even-y commitment point
//!
//! # Overview
//!
//! Verification recomputes `e = SHA-256(r || P.x || P.y || SHA-256(msg)) mod n`
//! and accepts iff `s*G - e*P` is the commitment point lifted from `r`.
//! Every malformed or adversarial input is rejected with a typed reason.
//! Nothing on the verification path panics.
//!
//! # Example
//!
//! ```
//! let message = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9];
//! let public_key = [0u8; 64];
//! let signature = [0u8; 64];
//!
//! // Malformed inputs are rejected, never a fault.
//! assert!(!schnorr::verify(&message, &public_key, &signature));
//!
//! let verdict = schnorr::SchnorrVerifier::<schnorr::GrumpkinSha256>::new()
//!     .verify_detailed(&message, &public_key, &signature);
//! assert_eq!(verdict.into_result(), Err(schnorr::SchnorrError::NotOnCurve));
//! ```
//!
//! The `signer` feature adds a reference `SigningKey` for producing test
//! fixtures.

// The signer's dependencies stay out of verification-only builds.
#![cfg_attr(not(any(test, feature = "signer")), deny(unused_crate_dependencies))]

mod codec;
mod constants;
mod errors;
mod hasher;
mod keys;
mod profile;
mod signatures;
mod verifier;


pub use codec::{decode_compressed_public_key, decode_public_key, decode_signature};
pub use constants::{
    COMMITMENT_SIZE, COMPRESSED_PK_SIZE, DIGEST_SIZE, PK_SIZE, RESPONSE_SIZE, SIG_SIZE, SK_SIZE,
};
pub use errors::{Degeneracy, SchnorrError};
pub use hasher::{Digest, Hasher, Sha256};
#[cfg(any(test, feature = "signer"))]
pub use keys::SigningKey;
pub use keys::VerifyingKey;
pub use profile::{GrumpkinSha256, Profile};
pub use signatures::Signature;
pub use verifier::{Rejection, SchnorrVerifier, Stage, Verdict};

/// Verify `signature` on `message` under `public_key` with the default
/// profile. Returns `false` for any invalid or malformed input.
pub fn verify(message: &[u8], public_key: &[u8], signature: &[u8]) -> bool {
    SchnorrVerifier::<GrumpkinSha256>::new().verify(message, public_key, signature)
}
