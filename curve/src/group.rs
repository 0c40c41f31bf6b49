use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Canonical little-endian limbs of a scalar, consumed by the ladders.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

pub trait Group:
    Sized
    + Copy
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
    + ConditionallySelectable
    + ConstantTimeEq
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> Choice;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    #[inline]
    fn mul_generator(scalar: &Self::Scalar) -> Self {
        Self::generator().scalar_mul(scalar)
    }

    /// Double-and-add-always over all 256 scalar bits.
    ///
    /// Every iteration performs one doubling and one addition and picks the
    /// result with a constant-time select, so the sequence of group
    /// operations is independent of the scalar.
    #[inline]
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        ladder(self, &scalar.to_u64_limbs())
    }
}

/// Fixed-length double-and-add-always over raw little-endian limbs.
pub(crate) fn ladder<G: Group>(point: &G, limbs: &[u64; 4]) -> G {
    let mut result = G::identity();

    for &limb in limbs.iter().rev() {
        for shift in (0..64).rev() {
            result = result.double();
            let bit = Choice::from(((limb >> shift) & 1) as u8);
            let sum = result + *point;
            result = G::conditional_select(&result, &sum, bit);
        }
    }

    result
}
