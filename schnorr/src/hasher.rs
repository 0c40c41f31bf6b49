//! Message pre-hash and challenge hashing.
//!
//! The [`Hasher`] trait is a small streaming interface so the verifier can be
//! parameterized over the hash function at compile time. [`Sha256`] backs the
//! only supported profile.
//!
//! # Example
//! ```rust
//! use schnorr::{Hasher, Sha256};
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"hello,");
//! hasher.update(b"world!");
//! let digest = hasher.finalize();
//!
//! assert_eq!(digest, Sha256::digest(b"hello,world!"));
//! ```

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::Deref;
use sha2::{Digest as _, Sha256 as ISha256};

use crate::constants::DIGEST_SIZE;
use crate::errors::SchnorrError;
use curve::CurveError;

/// Streaming hash function with a fixed-length output.
///
/// Implementations hold no state across [`Hasher::finalize`] calls: finalizing
/// resets the hasher, so one instance can produce independent digests.
pub trait Hasher: Clone + Send + Sync + 'static {
    type Digest: AsRef<[u8]> + Copy + Debug + Eq + Send + Sync;

    fn new() -> Self;

    /// Absorb `message` into the running state.
    fn update(&mut self, message: &[u8]);

    /// Produce the digest of everything absorbed so far and reset the state.
    fn finalize(&mut self) -> Self::Digest;

    /// Discard everything absorbed so far.
    fn reset(&mut self);

    /// One-shot digest of `message`.
    fn digest(message: &[u8]) -> Self::Digest {
        let mut hasher = Self::new();
        hasher.update(message);
        hasher.finalize()
    }
}

/// SHA-256 hasher.
#[derive(Clone, Debug, Default)]
pub struct Sha256 {
    hasher: ISha256,
}

impl Hasher for Sha256 {
    type Digest = Digest;

    fn new() -> Self {
        Self {
            hasher: ISha256::new(),
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Self::Digest {
        let array: [u8; DIGEST_SIZE] = self.hasher.finalize_reset().into();
        Digest(array)
    }

    fn reset(&mut self) {
        self.hasher = ISha256::new();
    }
}

/// Digest of a SHA-256 hashing operation.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const fn as_array(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(value: [u8; DIGEST_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = SchnorrError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DIGEST_SIZE] = value.try_into().map_err(|_| {
            SchnorrError::Encoding(CurveError::InvalidLength {
                expected: DIGEST_SIZE,
                actual: value.len(),
            })
        })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Digest {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_DIGEST: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_sha256_known_value() {
        let digest = Sha256::digest(b"hello world");
        assert_eq!(digest.to_string(), HELLO_DIGEST);
    }

    #[test]
    fn test_sha256_streaming_matches_one_shot() {
        let mut hasher = Sha256::new();
        hasher.update(b"hello");
        hasher.update(b" ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Sha256::digest(b"hello world"));
    }

    #[test]
    fn test_finalize_resets() {
        let mut hasher = Sha256::new();
        hasher.update(b"hello world");
        let first = hasher.finalize();
        hasher.update(b"hello world");
        assert_eq!(hasher.finalize(), first);
    }

    #[test]
    fn test_reset_discards_input() {
        let mut hasher = Sha256::new();
        hasher.update(b"garbage");
        hasher.reset();
        hasher.update(b"hello world");
        assert_eq!(hasher.finalize().to_string(), HELLO_DIGEST);
    }

    #[test]
    fn test_digest_try_from() {
        let bytes = [7u8; DIGEST_SIZE];
        let digest = Digest::try_from(&bytes[..]).expect("32 bytes");
        assert_eq!(digest.as_array(), &bytes);

        let err = Digest::try_from(&bytes[..31]).unwrap_err();
        assert_eq!(
            err,
            SchnorrError::Encoding(CurveError::InvalidLength {
                expected: DIGEST_SIZE,
                actual: 31
            })
        );
    }
}
