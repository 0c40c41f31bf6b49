//! Base field of the curve. p = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.
//! No operation branches on the value of an element.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::error::CurveError;
use crate::montgomery::{
    add_mod, limbs_from_be_bytes, limbs_to_be_bytes, lt_mask, mont_mul, mont_reduce, neg_mod,
    sub_mod,
};

/// Element of the base field, in Montgomery form.
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct FieldElement([u64; 4]);

// Field modulus: p = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001
const MODULUS: [u64; 4] = [
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

// R = 2^256 mod p (Montgomery parameter)
const R: [u64; 4] = [
    0xac96341c4ffffffb,
    0x36fc76959f60cd29,
    0x666ea36f7879462e,
    0x0e0a77c19a07df2f,
];

// R^2 = 2^512 mod p (for Montgomery conversion)
const R2: [u64; 4] = [
    0x1bb8e645ae216da7,
    0x53fe3ab1e35c59e3,
    0x8c49833d53bb8085,
    0x0216d0b17f4e44a5,
];

// -p^{-1} mod 2^64
const INV: u64 = 0xc2e1f593efffffff;

// p - 2, the Fermat inversion exponent
const P_MINUS_2: [u64; 4] = [
    0x43e1f593efffffff,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

// p - 1 = 2^S * t with t odd
const S: u32 = 28;

// (t - 1) / 2
const T_MINUS1_OVER2: [u64; 4] = [
    0xcdcb848a1f0fac9f,
    0x0c0ac2e9419f4243,
    0x098d014dc2822db4,
    0x0000000183227397,
];

// 5^t, a primitive 2^S-th root of unity (Montgomery form)
const ROOT_OF_UNITY: FieldElement = FieldElement([
    0x636e735580d13d9c,
    0xa22bf3742445ffd6,
    0x56452ac01eb203d8,
    0x1860ef942963f9e7,
]);

impl FieldElement {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = FieldElement([0, 0, 0, 0]);

    /// One element (in Montgomery form: R mod p)
    pub const ONE: Self = FieldElement(R);

    /// The curve constant b = -17 (Montgomery form)
    pub const CURVE_B: Self = FieldElement([
        0xdd7056026000005a,
        0x223fa97acb319311,
        0xcc388229877910c0,
        0x034394632b724eaa,
    ]);

    /// 3 * b = -51, used by the complete addition formulas (Montgomery form)
    pub(crate) const CURVE_B3: Self = FieldElement([
        0x985102072000010e,
        0x66befc706194b935,
        0x64a9867c966b3240,
        0x09cabd298256ec00,
    ]);

    /// Create a field element from a small integer.
    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        FieldElement(mont_mul(&[val, 0, 0, 0], &R2, &MODULUS, INV))
    }

    /// Decode a 32-byte big-endian encoding. The value must be below p.
    pub fn from_repr(bytes: &[u8; 32]) -> CtOption<Self> {
        let limbs = limbs_from_be_bytes(bytes);
        let is_canonical = Choice::from((lt_mask(&limbs, &MODULUS) & 1) as u8);
        CtOption::new(Self::from_canonical_limbs(limbs), is_canonical)
    }

    /// Decode a big-endian encoding of exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        let bytes: &[u8; 32] = bytes.try_into().map_err(|_| CurveError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Option::from(Self::from_repr(bytes)).ok_or(CurveError::NonCanonical)
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_be_bytes(&self.to_canonical_limbs())
    }

    #[inline]
    pub(crate) const fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        FieldElement(mont_mul(&limbs, &R2, &MODULUS, INV))
    }

    /// Convert from Montgomery form to canonical little-endian limbs
    #[inline]
    pub(crate) const fn to_canonical_limbs(&self) -> [u64; 4] {
        let l = self.0;
        mont_reduce([l[0], l[1], l[2], l[3], 0, 0, 0, 0], &MODULUS, INV)
    }

    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Parity of the canonical representative.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.to_canonical_limbs()[0] & 1) as u8)
    }

    #[inline]
    pub const fn square(&self) -> Self {
        FieldElement(mont_mul(&self.0, &self.0, &MODULUS, INV))
    }

    #[inline]
    pub const fn double(&self) -> Self {
        FieldElement(add_mod(&self.0, &self.0, &MODULUS))
    }

    /// Exponentiation by a public exponent.
    ///
    /// The running time depends on the exponent only, never on `self`.
    pub fn pow_vartime(&self, exp: &[u64; 4]) -> Self {
        let mut result = Self::ONE;
        for limb in exp.iter().rev() {
            for shift in (0..64).rev() {
                result = result.square();
                if (limb >> shift) & 1 == 1 {
                    result *= *self;
                }
            }
        }
        result
    }

    /// Multiplicative inverse via Fermat's little theorem, zero for zero.
    #[inline]
    pub(crate) fn invert_or_zero(&self) -> Self {
        self.pow_vartime(&P_MINUS_2)
    }

    /// Multiplicative inverse.
    ///
    /// Fails with [`CurveError::NotInvertible`] for zero only.
    pub fn invert(&self) -> Result<Self, CurveError> {
        let inverse = CtOption::new(self.invert_or_zero(), !self.is_zero());
        Option::from(inverse).ok_or(CurveError::NotInvertible)
    }

    /// Square root via constant-time Tonelli-Shanks.
    ///
    /// Of the two roots, the one with an even canonical representative is
    /// returned.
    pub(crate) fn sqrt_ct(&self) -> CtOption<Self> {
        // w = self^((t - 1) / 2)
        let w = self.pow_vartime(&T_MINUS1_OVER2);

        let mut v = S;
        let mut x = w * *self;
        let mut b = x * w;
        let mut z = ROOT_OF_UNITY;

        for max_v in (1..=S).rev() {
            let mut k = 1u32;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= z;
            v = k;
        }

        let x = Self::conditional_select(&x, &-x, x.is_odd());
        CtOption::new(x, x.square().ct_eq(self))
    }

    /// Square root with an even canonical representative.
    ///
    /// Fails with [`CurveError::NoSquareRoot`] for quadratic non-residues.
    pub fn sqrt(&self) -> Result<Self, CurveError> {
        Option::from(self.sqrt_ct()).ok_or(CurveError::NoSquareRoot)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl TryFrom<[u8; 32]> for FieldElement {
    type Error = CurveError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Option::from(Self::from_repr(&bytes)).ok_or(CurveError::NonCanonical)
    }
}

impl From<FieldElement> for [u8; 32] {
    fn from(element: FieldElement) -> Self {
        element.to_bytes()
    }
}

impl Distribution<FieldElement> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldElement {
        loop {
            let mut bytes: [u8; 32] = rng.random();
            // p < 2^254
            bytes[0] &= 0x3f;

            if let Some(element) = Option::<FieldElement>::from(FieldElement::from_repr(&bytes)) {
                return element;
            }
        }
    }
}

// Arithmetic operations
impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        FieldElement(add_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FieldElement(sub_mod(&self.0, &rhs.0, &MODULUS))
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldElement(neg_mod(&self.0, &MODULUS))
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        FieldElement(mont_mul(&self.0, &rhs.0, &MODULUS, INV))
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Display and Debug
impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_limbs();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomField;
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn to_biguint(element: &FieldElement) -> BigUint {
        BigUint::from_bytes_be(&element.to_bytes())
    }

    fn modulus() -> BigUint {
        BigUint::from_bytes_be(&crate::GRUMPKIN.field_modulus)
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(FieldElement::ZERO + FieldElement::ZERO, FieldElement::ZERO);
        assert_eq!(FieldElement::ONE * FieldElement::ONE, FieldElement::ONE);
        assert_eq!(FieldElement::ZERO * FieldElement::ONE, FieldElement::ZERO);
        assert_eq!(FieldElement::from_u64(1), FieldElement::ONE);
        assert_eq!(FieldElement::from_u64(0), FieldElement::ZERO);
    }

    #[test]
    fn test_small_arithmetic() {
        let a = FieldElement::from_u64(6);
        let b = FieldElement::from_u64(7);
        assert_eq!(a + b, FieldElement::from_u64(13));
        assert_eq!(b - a, FieldElement::ONE);
        assert_eq!(a * b, FieldElement::from_u64(42));
        assert_eq!(a - b, -FieldElement::ONE);
        assert_eq!(a.double(), FieldElement::from_u64(12));
    }

    #[test]
    fn test_arithmetic_matches_biguint() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = modulus();
        for _ in 0..64 {
            let a = FieldElement::random(&mut rng);
            let b = FieldElement::random(&mut rng);
            let (x, y) = (to_biguint(&a), to_biguint(&b));

            assert_eq!(to_biguint(&(a + b)), (&x + &y) % &p);
            assert_eq!(to_biguint(&(a - b)), (&x + &p - &y) % &p);
            assert_eq!(to_biguint(&(a * b)), (&x * &y) % &p);
            assert_eq!(to_biguint(&-a), (&p - &x) % &p);
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let a = FieldElement::random(&mut rng);
            let a_inv = a.invert().expect("non-zero element");
            assert_eq!(a * a_inv, FieldElement::ONE);
        }
        assert_eq!(FieldElement::ZERO.invert(), Err(CurveError::NotInvertible));
    }

    #[test]
    fn test_sqrt() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..16 {
            let a = FieldElement::random(&mut rng);
            let square = a.square();
            let root = square.sqrt().expect("square has a root");
            assert_eq!(root.square(), square);
            assert!(root == a || root == -a);
            assert!(!bool::from(root.is_odd()));
        }
        assert_eq!(FieldElement::ZERO.sqrt(), Ok(FieldElement::ZERO));
    }

    #[test]
    fn test_sqrt_non_residue() {
        // 5 generates the multiplicative group, so it is a non-residue
        let five = FieldElement::from_u64(5);
        assert_eq!(five.sqrt(), Err(CurveError::NoSquareRoot));
        // x^3 - 17 for x = 3 has no root
        let three = FieldElement::from_u64(3);
        let rhs = three.square() * three + FieldElement::CURVE_B;
        assert_eq!(rhs.sqrt(), Err(CurveError::NoSquareRoot));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..16 {
            let a = FieldElement::random(&mut rng);
            let bytes = a.to_bytes();
            assert_eq!(FieldElement::from_bytes(&bytes), Ok(a));
        }
    }

    #[test]
    fn test_from_bytes_rejects_non_canonical() {
        let p = crate::GRUMPKIN.field_modulus;
        assert_eq!(FieldElement::from_bytes(&p), Err(CurveError::NonCanonical));
        assert_eq!(
            FieldElement::from_bytes(&[0xff; 32]),
            Err(CurveError::NonCanonical)
        );

        let mut below = p;
        below[31] -= 1;
        assert_eq!(FieldElement::from_bytes(&below), Ok(-FieldElement::ONE));
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert_eq!(
            FieldElement::from_bytes(&[0u8; 31]),
            Err(CurveError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
        assert_eq!(
            FieldElement::from_bytes(&[0u8; 33]),
            Err(CurveError::InvalidLength {
                expected: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn test_parity() {
        assert!(!bool::from(FieldElement::ZERO.is_odd()));
        assert!(bool::from(FieldElement::ONE.is_odd()));
        // p - 1 is even
        assert!(!bool::from((-FieldElement::ONE).is_odd()));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", FieldElement::from_u64(255)),
            "0x00000000000000000000000000000000000000000000000000000000000000ff"
        );
    }
}
