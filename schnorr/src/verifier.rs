//! Verification state machine.
//!
//! A call moves linearly through `Decoding -> ChallengeRecompute ->
//! EquationCheck -> Verdict` with no retries. A failure at any stage stops
//! the call and is reported as a [`Rejection`] naming the stage and reason.

use core::fmt::{self, Display, Formatter};
use core::marker::PhantomData;

use curve::{CurveError, Projective, double_scalar_mul_basepoint};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, trace};

use crate::codec::{decode_public_key, decode_signature};
use crate::errors::{Degeneracy, SchnorrError};
use crate::hasher::Hasher;
use crate::keys::VerifyingKey;
use crate::profile::{GrumpkinSha256, Profile};
use crate::signatures::Signature;

/// Stages of a verification call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    ChallengeRecompute,
    EquationCheck,
    Verdict,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decoding => "decoding",
            Stage::ChallengeRecompute => "challenge",
            Stage::EquationCheck => "equation",
            Stage::Verdict => "verdict",
        };
        f.write_str(name)
    }
}

/// Why and where a signature was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("rejected during {stage}: {error}")]
pub struct Rejection {
    pub stage: Stage,
    pub error: SchnorrError,
}

/// Outcome of a verification call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    #[inline]
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject(rejection) => Some(rejection),
        }
    }

    /// Collapse into a `Result`, dropping the stage.
    pub fn into_result(self) -> Result<(), SchnorrError> {
        match self {
            Verdict::Accept => Ok(()),
            Verdict::Reject(rejection) => Err(rejection.error),
        }
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> Self {
        verdict.is_accept()
    }
}

/// Schnorr verifier for a fixed [`Profile`].
///
/// The verifier holds no state. One instance may be shared freely across
/// threads, and every call on the same inputs returns the same verdict.
///
/// # Example
///
/// ```
/// use schnorr::{SchnorrVerifier, Stage};
///
/// let verifier: SchnorrVerifier = SchnorrVerifier::default();
/// let verdict = verifier.verify_detailed(b"message", &[0u8; 64], &[0u8; 63]);
/// let rejection = verdict.rejection().expect("rejected");
/// assert_eq!(rejection.stage, Stage::Decoding);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchnorrVerifier<P: Profile = GrumpkinSha256> {
    _profile: PhantomData<P>,
}

impl<P: Profile> Default for SchnorrVerifier<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Profile> SchnorrVerifier<P> {
    pub const fn new() -> Self {
        Self {
            _profile: PhantomData,
        }
    }

    /// Returns `true` iff `signature` is a valid signature on `message` under
    /// `public_key`. Every kind of failure yields `false`.
    pub fn verify(&self, message: &[u8], public_key: &[u8], signature: &[u8]) -> bool {
        self.verify_detailed(message, public_key, signature)
            .is_accept()
    }

    /// Like [`Self::verify`], reporting why a signature was rejected.
    pub fn verify_detailed(&self, message: &[u8], public_key: &[u8], signature: &[u8]) -> Verdict {
        let digest = P::Hasher::digest(message);
        self.verify_prehashed(&digest, public_key, signature)
    }

    /// Verify against a message digest computed by the caller.
    pub fn verify_prehashed(
        &self,
        digest: &<P::Hasher as Hasher>::Digest,
        public_key: &[u8],
        signature: &[u8],
    ) -> Verdict {
        let params = P::params();
        trace!(
            profile = P::NAME,
            curve = params.name,
            stage = %Stage::Decoding,
            "verifying signature"
        );

        let key_width = 2 * params.field_bytes;
        if public_key.len() != key_width {
            return reject(
                Stage::Decoding,
                SchnorrError::Encoding(CurveError::InvalidLength {
                    expected: key_width,
                    actual: public_key.len(),
                }),
            );
        }
        let sig_width = params.field_bytes + params.scalar_bytes;
        if signature.len() != sig_width {
            return reject(
                Stage::Decoding,
                SchnorrError::MalformedSignature {
                    expected: sig_width,
                    actual: signature.len(),
                },
            );
        }

        let key = match decode_public_key(public_key) {
            Ok(key) => key,
            Err(err) => return reject(Stage::Decoding, err),
        };
        let sig = match decode_signature(signature) {
            Ok(sig) => sig,
            Err(err) => return reject(Stage::Decoding, err),
        };

        self.verify_parsed(digest, &key, &sig)
    }

    /// Verify an already decoded key and signature.
    ///
    /// The remaining decoding checks run here: the response must be non-zero
    /// and `r` must lift to a curve point.
    pub fn verify_parsed(
        &self,
        digest: &<P::Hasher as Hasher>::Digest,
        key: &VerifyingKey,
        sig: &Signature,
    ) -> Verdict {
        if bool::from(sig.response().is_zero()) {
            return reject(
                Stage::Decoding,
                SchnorrError::DegenerateInput(Degeneracy::ZeroResponse),
            );
        }
        let commitment = match sig.commitment() {
            Ok(point) => point,
            Err(err) => return reject(Stage::Decoding, err),
        };

        trace!(profile = P::NAME, stage = %Stage::ChallengeRecompute);
        let e = P::challenge(sig.commitment_x(), key.as_point(), digest);

        trace!(profile = P::NAME, stage = %Stage::EquationCheck);
        // R' = s*G - e*P
        let candidate = double_scalar_mul_basepoint(sig.response(), &-e, key.as_point());
        if bool::from(candidate.is_infinity()) {
            return reject(
                Stage::EquationCheck,
                SchnorrError::DegenerateInput(Degeneracy::IdentityCommitment),
            );
        }
        if !bool::from(candidate.ct_eq(&Projective::from(&commitment))) {
            return reject(Stage::EquationCheck, SchnorrError::VerificationFailed);
        }

        trace!(profile = P::NAME, stage = %Stage::Verdict, "signature accepted");
        Verdict::Accept
    }
}

fn reject(stage: Stage, error: SchnorrError) -> Verdict {
    debug!(%stage, %error, "signature rejected");
    Verdict::Reject(Rejection { stage, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256;
    use crate::keys::SigningKey;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixture(message: &[u8]) -> (VerifyingKey, Signature) {
        let mut rng = StdRng::seed_from_u64(42);
        let sk = SigningKey::random(&mut rng);
        let sig = sk.sign(&mut rng, message).expect("sign");
        (sk.verifying_key(), sig)
    }

    #[test]
    fn test_accepts_valid_signature() {
        let (key, sig) = fixture(b"hello");
        let verifier = SchnorrVerifier::<GrumpkinSha256>::new();
        let verdict = verifier.verify_detailed(b"hello", &key.to_bytes(), &sig.to_bytes());
        assert_eq!(verdict, Verdict::Accept);
        assert!(bool::from(verdict));
    }

    #[test]
    fn test_prehashed_matches_raw() {
        let (key, sig) = fixture(b"hello");
        let verifier = SchnorrVerifier::<GrumpkinSha256>::new();
        let digest = Sha256::digest(b"hello");
        assert!(
            verifier
                .verify_prehashed(&digest, &key.to_bytes(), &sig.to_bytes())
                .is_accept()
        );
        assert!(verifier.verify_parsed(&digest, &key, &sig).is_accept());
    }

    #[test]
    fn test_wrong_message_fails_equation() {
        let (key, sig) = fixture(b"hello");
        let verdict = SchnorrVerifier::<GrumpkinSha256>::new().verify_detailed(
            b"hellp",
            &key.to_bytes(),
            &sig.to_bytes(),
        );
        assert_eq!(
            verdict.rejection(),
            Some(&Rejection {
                stage: Stage::EquationCheck,
                error: SchnorrError::VerificationFailed,
            })
        );
    }

    #[test]
    fn test_zero_response_rejected_while_decoding() {
        let (key, sig) = fixture(b"hello");
        let mut bytes = sig.to_bytes();
        bytes[32..].fill(0);

        let verdict = SchnorrVerifier::<GrumpkinSha256>::new().verify_detailed(
            b"hello",
            &key.to_bytes(),
            &bytes,
        );
        assert_eq!(
            verdict.into_result(),
            Err(SchnorrError::DegenerateInput(Degeneracy::ZeroResponse))
        );
    }

    #[test]
    fn test_malformed_inputs_rejected_while_decoding() {
        let (key, sig) = fixture(b"hello");
        let verifier = SchnorrVerifier::<GrumpkinSha256>::new();

        let verdict = verifier.verify_detailed(b"hello", &key.to_bytes()[..63], &sig.to_bytes());
        assert_eq!(verdict.rejection().map(|r| r.stage), Some(Stage::Decoding));

        let verdict = verifier.verify_detailed(b"hello", &key.to_bytes(), &sig.to_bytes()[..63]);
        assert_eq!(
            verdict.rejection(),
            Some(&Rejection {
                stage: Stage::Decoding,
                error: SchnorrError::MalformedSignature {
                    expected: 64,
                    actual: 63
                },
            })
        );
    }

    #[test]
    fn test_widths_follow_profile_params() {
        let (key, sig) = fixture(b"hello");
        let params = GrumpkinSha256::params();
        let verifier = SchnorrVerifier::<GrumpkinSha256>::new();

        let mut long_sig = sig.to_bytes().to_vec();
        long_sig.push(0);
        assert_eq!(
            verifier
                .verify_detailed(b"hello", &key.to_bytes(), &long_sig)
                .into_result(),
            Err(SchnorrError::MalformedSignature {
                expected: params.field_bytes + params.scalar_bytes,
                actual: long_sig.len(),
            })
        );

        let compressed = key.to_compressed();
        assert_eq!(
            verifier
                .verify_detailed(b"hello", &compressed, &sig.to_bytes())
                .into_result(),
            Err(SchnorrError::Encoding(CurveError::InvalidLength {
                expected: 2 * params.field_bytes,
                actual: compressed.len(),
            }))
        );
    }

    #[test]
    fn test_rejection_display() {
        let rejection = Rejection {
            stage: Stage::EquationCheck,
            error: SchnorrError::VerificationFailed,
        };
        assert_eq!(
            rejection.to_string(),
            "rejected during equation: signature verification failed"
        );
    }
}
