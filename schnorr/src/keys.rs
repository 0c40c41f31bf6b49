//! Signing and verifying keys for the Schnorr signature scheme.

use curve::Affine;
use serde::{Deserialize, Serialize};

use crate::codec::{decode_compressed_public_key, decode_public_key};
use crate::constants::{COMPRESSED_PK_SIZE, PK_SIZE};
use crate::errors::{Degeneracy, SchnorrError};
use crate::hasher::{Hasher, Sha256};
use crate::profile::GrumpkinSha256;
use crate::signatures::Signature;
use crate::verifier::SchnorrVerifier;

#[cfg(any(test, feature = "signer"))]
pub use signer::SigningKey;

/// A public verifying key for verifying Schnorr signatures.
///
/// The verifying key is a point on the Grumpkin curve, never the identity.
/// It is constructed once from its encoding and is read-only thereafter.
///
/// # Example
///
/// ```
/// use schnorr::VerifyingKey;
///
/// let bytes = hex_literal();
/// let key = VerifyingKey::from_bytes(&bytes).expect("valid key");
/// assert_eq!(key.to_bytes(), bytes);
/// # fn hex_literal() -> [u8; 64] {
/// #     let mut bytes = [0u8; 64];
/// #     bytes[31] = 1;
/// #     bytes[32..].copy_from_slice(&curve::GRUMPKIN.generator_y);
/// #     bytes
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct VerifyingKey {
    point: Affine,
}

impl VerifyingKey {
    /// Wrap a curve point, rejecting the identity.
    pub fn from_point(point: Affine) -> Result<Self, SchnorrError> {
        if bool::from(point.is_identity()) {
            return Err(SchnorrError::DegenerateInput(Degeneracy::IdentityPublicKey));
        }
        Ok(Self { point })
    }

    /// Parse a 64-byte `x || y` encoding. See [`decode_public_key`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        decode_public_key(bytes)
    }

    /// Parse a 33-byte compressed encoding. See [`decode_compressed_public_key`].
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, SchnorrError> {
        decode_compressed_public_key(bytes)
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        self.point.to_uncompressed()
    }

    pub fn to_compressed(&self) -> [u8; COMPRESSED_PK_SIZE] {
        self.point.to_compressed()
    }

    #[inline]
    pub fn as_point(&self) -> &Affine {
        &self.point
    }

    /// Verifies a signature on a message using this verifying key.
    ///
    /// The message is pre-hashed with SHA-256 and checked under the
    /// `grumpkin-schnorr-sha256` profile.
    ///
    /// # Errors
    ///
    /// Returns the reason the signature was rejected, for example
    /// [`SchnorrError::VerificationFailed`] if the equation does not hold or
    /// [`SchnorrError::DegenerateInput`] for a zero response.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SchnorrError> {
        let digest = Sha256::digest(message);
        SchnorrVerifier::<GrumpkinSha256>::new()
            .verify_parsed(&digest, self, signature)
            .into_result()
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SchnorrError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        decode_public_key(bytes)
    }
}

impl TryFrom<Vec<u8>> for VerifyingKey {
    type Error = SchnorrError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        decode_public_key(&bytes)
    }
}

impl From<VerifyingKey> for Vec<u8> {
    fn from(key: VerifyingKey) -> Self {
        key.to_bytes().to_vec()
    }
}

#[cfg(any(test, feature = "signer"))]
mod signer {
    use core::fmt::{self, Debug, Formatter};

    use curve::{Affine, Group, RandomField, Scalar};
    use rand::Rng;
    use subtle::ConditionallySelectable;
    use zeroize::{Zeroize, ZeroizeOnDrop};

    use super::VerifyingKey;
    use crate::constants::SK_SIZE;
    use crate::errors::{Degeneracy, SchnorrError};
    use crate::hasher::{Digest, Hasher, Sha256};
    use crate::profile::{GrumpkinSha256, Profile};
    use crate::signatures::Signature;

    /// A secret signing key for creating Schnorr signatures.
    ///
    /// Only used to produce fixtures: the signer is not constant-time
    /// audited. The secret scalar is zeroized on drop.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SigningKey;
    ///
    /// let mut rng = rand::rng();
    /// let signing_key = SigningKey::random(&mut rng);
    /// let verifying_key = signing_key.verifying_key();
    ///
    /// let signature = signing_key.sign(&mut rng, b"hello").expect("signing failed");
    /// assert!(verifying_key.verify(b"hello", &signature).is_ok());
    /// ```
    #[derive(Clone, Zeroize, ZeroizeOnDrop)]
    pub struct SigningKey {
        scalar: Scalar,
    }

    impl SigningKey {
        /// Generates a random non-zero signing key.
        pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
            Self {
                scalar: Scalar::random_nonzero(rng),
            }
        }

        /// Parse a 32-byte big-endian secret scalar.
        pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
            let scalar = Scalar::from_bytes(bytes)?;
            if bool::from(scalar.is_zero()) {
                return Err(SchnorrError::DegenerateInput(Degeneracy::ZeroSecret));
            }
            Ok(Self { scalar })
        }

        pub fn to_bytes(&self) -> [u8; SK_SIZE] {
            self.scalar.to_bytes()
        }

        /// Derives the public verifying key `sk*G`.
        pub fn verifying_key(&self) -> VerifyingKey {
            VerifyingKey {
                point: <Affine as Group>::mul_generator(&self.scalar),
            }
        }

        /// Signs `message` with a fresh random nonce.
        pub fn sign<R: Rng + ?Sized>(
            &self,
            rng: &mut R,
            message: &[u8],
        ) -> Result<Signature, SchnorrError> {
            self.sign_prehashed(rng, &Sha256::digest(message))
        }

        /// Signs an already hashed message with a fresh random nonce.
        pub fn sign_prehashed<R: Rng + ?Sized>(
            &self,
            rng: &mut R,
            digest: &Digest,
        ) -> Result<Signature, SchnorrError> {
            let mut nonce = Scalar::random_nonzero(rng);
            let sig = self.sign_prehashed_with_nonce(digest, &nonce);
            nonce.zeroize();
            sig
        }

        /// Deterministic signing with a caller-chosen nonce.
        ///
        /// The signature is computed as:
        /// 1. `R = k*G`, and `k` is replaced by `n - k` if `R.y` is odd
        /// 2. `e = SHA-256(R.x || P.x || P.y || digest) mod n`
        /// 3. `s = k + e*sk`
        /// 4. Return `(R.x, s)`
        ///
        /// Reusing a nonce across two messages reveals the signing key.
        pub fn sign_prehashed_with_nonce(
            &self,
            digest: &Digest,
            nonce: &Scalar,
        ) -> Result<Signature, SchnorrError> {
            if bool::from(nonce.is_zero()) {
                return Err(SchnorrError::DegenerateInput(Degeneracy::ZeroNonce));
            }

            let commitment = <Affine as Group>::mul_generator(nonce);
            let mut k = Scalar::conditional_select(nonce, &-*nonce, commitment.y().is_odd());
            let r = commitment.x();

            let pk = self.verifying_key();
            let e = GrumpkinSha256::challenge(&r, pk.as_point(), digest);
            let s = k + e * self.scalar;
            k.zeroize();

            if bool::from(s.is_zero()) {
                return Err(SchnorrError::DegenerateInput(Degeneracy::ZeroResponse));
            }
            Ok(Signature::new(r, s))
        }
    }

    impl Debug for SigningKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str("SigningKey(..)")
        }
    }

    impl From<&SigningKey> for VerifyingKey {
        /// Converts a reference to a signing key into a verifying key.
        ///
        /// This is equivalent to calling `signing_key.verifying_key()`.
        fn from(sk: &SigningKey) -> Self {
            sk.verifying_key()
        }
    }
}
