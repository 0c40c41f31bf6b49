//! Scalar field of the curve. n = 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

use crate::error::CurveError;
use crate::group::ScalarBits;
use crate::montgomery::{
    add_mod, limbs_from_be_bytes, limbs_to_be_bytes, lt_mask, mont_mul, mont_reduce, neg_mod,
    sub_mod,
};

/// Scalar modulo the group order, in Montgomery form.
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct Scalar([u64; 4]);

// Group order: n = 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47
pub(crate) const MODULUS: [u64; 4] = [
    0x3c208c16d87cfd47,
    0x97816a916871ca8d,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

// R = 2^256 mod n (Montgomery parameter)
const R: [u64; 4] = [
    0xd35d438dc58f0d9d,
    0x0a78eb28f5c70b3d,
    0x666ea36f7879462c,
    0x0e0a77c19a07df2f,
];

// R^2 = 2^512 mod n (for Montgomery conversion)
const R2: [u64; 4] = [
    0xf32cfc5b538afa89,
    0xb5e71911d44501fb,
    0x47ab1eff0a417ff6,
    0x06d89f71cab8351f,
];

// -n^{-1} mod 2^64
const INV: u64 = 0x87d20782e4866389;

impl Scalar {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = Scalar([0, 0, 0, 0]);

    /// One element (in Montgomery form: R mod n)
    pub const ONE: Self = Scalar(R);

    /// Create a scalar from a small integer.
    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        Scalar(mont_mul(&[val, 0, 0, 0], &R2, &MODULUS, INV))
    }

    /// Decode a 32-byte big-endian encoding. The value must be below n.
    pub fn from_repr(bytes: &[u8; 32]) -> CtOption<Self> {
        let limbs = limbs_from_be_bytes(bytes);
        let is_canonical = Choice::from((lt_mask(&limbs, &MODULUS) & 1) as u8);
        CtOption::new(Self::from_u256(limbs), is_canonical)
    }

    /// Decode a big-endian encoding of exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        let bytes: &[u8; 32] = bytes.try_into().map_err(|_| CurveError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Option::from(Self::from_repr(bytes)).ok_or(CurveError::NonCanonical)
    }

    /// Interpret 32 big-endian bytes as an integer and reduce it mod n.
    ///
    /// Used to map hash outputs, which may exceed n, onto scalars.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_u256(limbs_from_be_bytes(bytes))
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_be_bytes(&self.to_canonical_limbs())
    }

    // Any value below 2^256 is reduced by the Montgomery multiplication itself.
    #[inline]
    const fn from_u256(limbs: [u64; 4]) -> Self {
        Scalar(mont_mul(&limbs, &R2, &MODULUS, INV))
    }

    /// Convert from Montgomery form to canonical little-endian limbs
    #[inline]
    const fn to_canonical_limbs(&self) -> [u64; 4] {
        let l = self.0;
        mont_reduce([l[0], l[1], l[2], l[3], 0, 0, 0, 0], &MODULUS, INV)
    }

    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    #[inline]
    pub const fn square(&self) -> Self {
        Scalar(mont_mul(&self.0, &self.0, &MODULUS, INV))
    }
}

impl ScalarBits for Scalar {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_limbs()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl TryFrom<[u8; 32]> for Scalar {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Option::from(Self::from_repr(&bytes)).ok_or(CurveError::NonCanonical)
    }
}

impl From<Scalar> for [u8; 32] {
    fn from(scalar: Scalar) -> Self {
        scalar.to_bytes()
    }
}

impl Distribution<Scalar> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        loop {
            let mut bytes: [u8; 32] = rng.random();
            // n < 2^254
            bytes[0] &= 0x3f;

            if let Some(scalar) = Option::<Scalar>::from(Scalar::from_repr(&bytes)) {
                return scalar;
            }
        }
    }
}

// Arithmetic operations
impl Add for Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Scalar(add_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl AddAssign for Scalar {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Scalar {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Scalar(sub_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl SubAssign for Scalar {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Scalar(neg_mod(&self.0, &MODULUS))
    }
}

impl Mul for Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Scalar(mont_mul(&self.0, &rhs.0, &MODULUS, INV))
    }
}

impl MulAssign for Scalar {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Display and Debug
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self)
    }
}
