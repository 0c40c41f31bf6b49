// Grumpkin: E(GF(p)) : y^2 = x^3 - 17
// p = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001 (254 bits)
// E generator point: (1 : 0x2cf135e7506a45d632d270d45f1181294833fc48d823f272c : 1)
// Curve prime order (hex): 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47
// Curve cofactor: 1

use crate::basefield::FieldElement;
use crate::error::CurveError;
use crate::params::GRUMPKIN;
use crate::projective::Projective;
use crate::{Group, Scalar};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Size of an uncompressed `x || y` encoding.
pub const UNCOMPRESSED_SIZE: usize = 64;

/// Size of a compressed `prefix || x` encoding.
pub const COMPRESSED_SIZE: usize = 33;

const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
///
/// Every value of this type is either the identity or a point on the curve
/// in the prime-order subgroup. Coordinates are kept canonical, so equality
/// compares coordinates directly.
#[derive(Copy, Clone, Debug)]
pub struct Affine {
    x: FieldElement,
    y: FieldElement,
    /// 1 for the point at infinity (identity element), 0 otherwise
    infinity: u8,
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// The point at infinity.
    #[inline]
    pub const fn identity() -> Self {
        Self::INFINITY
    }

    /// The generator (1, sqrt(-16)).
    pub const fn generator() -> Self {
        Affine {
            x: FieldElement::ONE,
            y: GENERATOR_Y,
            infinity: 0,
        }
    }

    /// Assemble a point without validation. Callers guarantee the invariant.
    #[inline]
    pub(crate) fn from_raw(x: FieldElement, y: FieldElement, infinity: Choice) -> Self {
        Affine {
            x,
            y,
            infinity: infinity.unwrap_u8(),
        }
    }

    /// Build a point from affine coordinates.
    ///
    /// Fails with [`CurveError::NotOnCurve`] unless `y^2 = x^3 - 17`, and with
    /// [`CurveError::NotInSubgroup`] if the point has a small-order component.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<Self, CurveError> {
        let point = Affine { x, y, infinity: 0 };
        if !bool::from(point.is_on_curve()) {
            return Err(CurveError::NotOnCurve);
        }
        point.check_subgroup()
    }

    /// Recover a point from its x-coordinate and the parity of y.
    ///
    /// Fails with [`CurveError::InvalidEncoding`] if `x_bytes` is not 32 bytes
    /// long or no point has this x-coordinate, and with
    /// [`CurveError::NonCanonical`] if `x` is not below `p`.
    pub fn decompress(x_bytes: &[u8], y_is_odd: Choice) -> Result<Self, CurveError> {
        let x_bytes: &[u8; 32] = x_bytes
            .try_into()
            .map_err(|_| CurveError::InvalidEncoding)?;
        let x = Option::<FieldElement>::from(FieldElement::from_repr(x_bytes))
            .ok_or(CurveError::NonCanonical)?;
        let rhs = x.square() * x + FieldElement::CURVE_B;

        let point = rhs.sqrt_ct().and_then(|root| {
            let y = FieldElement::conditional_select(&root, &-root, y_is_odd);
            // A zero root has only one parity
            CtOption::new(Affine { x, y, infinity: 0 }, !(y.is_odd() ^ y_is_odd))
        });

        Option::<Self>::from(point)
            .ok_or(CurveError::InvalidEncoding)?
            .check_subgroup()
    }

    /// Decode a 64-byte `x || y` encoding.
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != UNCOMPRESSED_SIZE {
            return Err(CurveError::InvalidLength {
                expected: UNCOMPRESSED_SIZE,
                actual: bytes.len(),
            });
        }
        let x = FieldElement::from_bytes(&bytes[..32])?;
        let y = FieldElement::from_bytes(&bytes[32..])?;
        Self::from_coordinates(x, y)
    }

    /// Encode as `x || y`. The identity encodes as 64 zero bytes, which no
    /// decoder accepts.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_SIZE];
        out[..32].copy_from_slice(&self.x.to_bytes());
        out[32..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Decode a 33-byte `prefix || x` encoding, prefix 0x02 (even y) or 0x03 (odd y).
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != COMPRESSED_SIZE {
            return Err(CurveError::InvalidLength {
                expected: COMPRESSED_SIZE,
                actual: bytes.len(),
            });
        }
        let y_is_odd = match bytes[0] {
            TAG_EVEN => Choice::from(0),
            TAG_ODD => Choice::from(1),
            _ => return Err(CurveError::InvalidEncoding),
        };
        Self::decompress(&bytes[1..], y_is_odd)
    }

    /// Encode as `prefix || x`. The identity encodes as 33 zero bytes, which
    /// no decoder accepts.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_SIZE] {
        let mut out = [0u8; COMPRESSED_SIZE];
        let tag = u8::conditional_select(&TAG_EVEN, &TAG_ODD, self.y.is_odd());
        out[0] = u8::conditional_select(&tag, &0, self.is_identity());
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    #[inline]
    pub fn x(&self) -> FieldElement {
        self.x
    }

    #[inline]
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Check if a point is on the curve: y^2 = x^3 - 17.
    pub fn is_on_curve(&self) -> Choice {
        let y2 = self.y.square();
        let rhs = self.x.square() * self.x + FieldElement::CURVE_B;

        y2.ct_eq(&rhs) | self.is_identity()
    }

    /// Check that `n * P` is the identity.
    pub fn is_torsion_free(&self) -> Choice {
        Projective::from_affine(self)
            .mul_limbs(&crate::scalarfield::MODULUS)
            .is_infinity()
    }

    fn check_subgroup(self) -> Result<Self, CurveError> {
        // With cofactor 1 every point on the curve is in the group.
        if GRUMPKIN.needs_subgroup_check() && !bool::from(self.is_torsion_free()) {
            return Err(CurveError::NotInSubgroup);
        }
        Ok(self)
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        Projective::from_affine(self).double().to_affine()
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        // The identity keeps y = 0
        Affine {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

// sqrt(-16) = 0x2cf135e7506a45d632d270d45f1181294833fc48d823f272c
const GENERATOR_Y: FieldElement = FieldElement::from_canonical_limbs([
    0x833fc48d823f272c,
    0x2d270d45f1181294,
    0xcf135e7506a45d63,
    0x0000000000000002,
]);

impl Group for Affine {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> Choice {
        Self::is_identity(self)
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    /// Runs the ladder in projective coordinates and normalizes once.
    fn scalar_mul(&self, scalar: &Scalar) -> Self {
        Projective::from_affine(self).scalar_mul(scalar).to_affine()
    }
}

impl ConditionallySelectable for Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Affine {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let neither_identity = !self.is_identity() & !other.is_identity();

        both_identity | (neither_identity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl PartialEq for Affine {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Affine {}

// Implement addition for affine points
impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        (Projective::from_affine(&self) + Projective::from_affine(&other)).to_affine()
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<&Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<&Affine> for Scalar {
    type Output = Affine;

    fn mul(self, point: &Affine) -> Affine {
        <Affine as Group>::scalar_mul(point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_point(rng: &mut StdRng) -> Affine {
        Affine::generator().scalar_mul(&Scalar::random(rng))
    }

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(bool::from(inf.is_identity()));
        assert!(bool::from(inf.is_on_curve()));
        assert_eq!(inf, <Affine as Group>::identity());
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Affine::generator();
        assert!(
            bool::from(g.is_on_curve()),
            "Generator point is not on the curve"
        );
        assert!(!bool::from(g.is_identity()));
        assert!(bool::from(g.is_torsion_free()));
    }

    #[test]
    fn test_from_coordinates() {
        let g = Affine::generator();
        assert_eq!(Affine::from_coordinates(g.x(), g.y()), Ok(g));
        assert_eq!(
            Affine::from_coordinates(g.x(), g.y() + FieldElement::ONE),
            Err(CurveError::NotOnCurve)
        );
        assert_eq!(
            Affine::from_coordinates(FieldElement::ZERO, FieldElement::ZERO),
            Err(CurveError::NotOnCurve)
        );
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
    }

    #[test]
    fn test_point_doubling() {
        let g = Affine::generator();
        let g2 = g.double();

        assert!(bool::from(g2.is_on_curve()));
        assert_eq!(g + g, g2);
    }

    #[test]
    fn test_point_negation() {
        let g = Affine::generator();
        let neg_g = g.negate();

        assert!(bool::from(neg_g.is_on_curve()));
        assert_eq!(g + neg_g, Affine::INFINITY);
        assert_eq!(-Affine::INFINITY, Affine::INFINITY);
    }

    #[test]
    fn test_scalar_multiplication() {
        let g = Affine::generator();
        let result = g * &Scalar::from_u64(5);

        // 5G computed independently
        let expected_x = [
            0x1b, 0x09, 0x86, 0xd6, 0x03, 0x03, 0x3b, 0xe6, 0x32, 0x1c, 0x18, 0x04, 0xf6, 0xf8,
            0xb4, 0xb1, 0x4a, 0xef, 0x01, 0x4e, 0x65, 0xa6, 0x4d, 0x95, 0x44, 0xa6, 0x43, 0x05,
            0x82, 0x69, 0x43, 0x87,
        ];
        assert_eq!(result.x().to_bytes(), expected_x);
        assert_eq!(result, g + g + g + g + g);
        assert_eq!(Scalar::from_u64(5) * &g, result);
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let g = Affine::generator();
        assert_eq!(g.scalar_mul(&Scalar::ZERO), Affine::INFINITY);
        assert_eq!(g.scalar_mul(&Scalar::ONE), g);
        assert_eq!(Affine::INFINITY.scalar_mul(&Scalar::from_u64(7)), Affine::INFINITY);
    }

    #[test]
    fn test_uncompressed_round_trip() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..8 {
            let point = random_point(&mut rng);
            let bytes = point.to_uncompressed();
            assert_eq!(Affine::from_uncompressed(&bytes), Ok(point));
        }
    }

    #[test]
    fn test_uncompressed_rejects_bad_input() {
        assert_eq!(
            Affine::from_uncompressed(&[0u8; 63]),
            Err(CurveError::InvalidLength {
                expected: 64,
                actual: 63
            })
        );
        // The identity is not encodable
        assert_eq!(
            Affine::from_uncompressed(&Affine::INFINITY.to_uncompressed()),
            Err(CurveError::NotOnCurve)
        );
        let mut bytes = Affine::generator().to_uncompressed();
        bytes[0..32].copy_from_slice(&crate::GRUMPKIN.field_modulus);
        assert_eq!(
            Affine::from_uncompressed(&bytes),
            Err(CurveError::NonCanonical)
        );
    }

    #[test]
    fn test_compressed_round_trip() {
        let mut rng = StdRng::seed_from_u64(37);
        let mut seen_odd = false;
        let mut seen_even = false;
        for _ in 0..16 {
            let point = random_point(&mut rng);
            let bytes = point.to_compressed();
            if bytes[0] == TAG_ODD {
                seen_odd = true;
            } else {
                seen_even = true;
            }
            assert_eq!(Affine::from_compressed(&bytes), Ok(point));
        }
        assert!(seen_odd && seen_even);
    }

    #[test]
    fn test_decompress_parity() {
        let g = Affine::generator();
        let x = g.x().to_bytes();
        assert_eq!(Affine::decompress(&x, Choice::from(0)), Ok(g));
        assert_eq!(Affine::decompress(&x, Choice::from(1)), Ok(-g));
    }

    #[test]
    fn test_decompress_rejects_invalid() {
        // x^3 - 17 is a non-residue for x = 0 and x = 3
        let zero = FieldElement::ZERO.to_bytes();
        let three = FieldElement::from_u64(3).to_bytes();
        assert_eq!(
            Affine::decompress(&zero, Choice::from(0)),
            Err(CurveError::InvalidEncoding)
        );
        assert_eq!(
            Affine::decompress(&three, Choice::from(1)),
            Err(CurveError::InvalidEncoding)
        );

        let mut bytes = Affine::generator().to_compressed();
        bytes[0] = 0x04;
        assert_eq!(
            Affine::from_compressed(&bytes),
            Err(CurveError::InvalidEncoding)
        );
    }

    #[test]
    fn test_decompress_wrong_length_is_invalid_encoding() {
        let x = Affine::generator().x().to_bytes();
        for len in [0, 1, 31, 33, 64] {
            let mut input = x.to_vec();
            input.resize(len, 0);
            assert_eq!(
                Affine::decompress(&input, Choice::from(0)),
                Err(CurveError::InvalidEncoding)
            );
        }

        assert_eq!(
            Affine::decompress(&GRUMPKIN.field_modulus, Choice::from(0)),
            Err(CurveError::NonCanonical)
        );
    }

    #[test]
    fn test_equality_ignores_identity_coordinates() {
        let from_projective = crate::Projective::INFINITY.to_affine();
        assert_eq!(from_projective, Affine::INFINITY);
        assert_ne!(Affine::generator(), Affine::INFINITY);
    }
}
