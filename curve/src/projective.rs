use crate::affine::Affine;
use crate::basefield::FieldElement;
use crate::group::ladder;
use crate::{Group, Scalar};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Projective point on the elliptic curve.
/// Represents a point in projective coordinates (X:Y:Z) where (x,y) = (X/Z, Y/Z).
/// The point at infinity is represented as (0:1:0).
///
/// Addition and doubling use the complete formulas of Renes, Costello and
/// Batina (<https://eprint.iacr.org/2015/1060>, algorithms 7 and 9) for
/// `a = 0`. They hold for every pair of inputs, the identity included, so no
/// operation needs a special case.
#[derive(Copy, Clone, Debug)]
pub struct Projective {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl Projective {
    /// The point at infinity (identity element): (0:1:0)
    pub const INFINITY: Self = Projective {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Affine {
        let z_inv = self.z.invert_or_zero();
        // The identity maps to (0, 0) with the infinity flag set
        Affine::from_raw(self.x * z_inv, self.y * z_inv, self.is_infinity())
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        let finite = Projective {
            x: point.x(),
            y: point.y(),
            z: FieldElement::ONE,
        };
        Self::conditional_select(&finite, &Self::INFINITY, point.is_identity())
    }

    /// Check if a point is on the curve: Y^2*Z = X^3 + b*Z^3.
    pub fn is_on_curve(&self) -> Choice {
        let y2z = self.y.square() * self.z;
        let x3 = self.x.square() * self.x;
        let z3 = self.z.square() * self.z;
        let rhs = x3 + FieldElement::CURVE_B * z3;

        y2z.ct_eq(&rhs) | self.is_infinity()
    }

    /// The generator (1, sqrt(-16)).
    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    /// Point doubling: 2*P, algorithm 9.
    pub fn double(&self) -> Self {
        let b3 = FieldElement::CURVE_B3;

        let t0 = self.y.square();
        let z3 = t0.double();
        let z3 = z3.double();
        let z3 = z3.double();
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = b3 * t2;
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2.double();
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3.double();

        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Multiply by raw little-endian limbs that need not be reduced mod n.
    pub(crate) fn mul_limbs(&self, limbs: &[u64; 4]) -> Self {
        ladder(self, limbs)
    }
}

impl Group for Projective {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> Choice {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Projective::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl ConditionallySelectable for Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Projective {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for Projective {
    // (X1:Y1:Z1) = (X2:Y2:Z2) iff X1*Z2 = X2*Z1 and Y1*Z2 = Y2*Z1. Valid
    // representations of the identity have X = 0 and Y != 0.
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;
        let y1 = self.y * other.z;
        let y2 = other.y * self.z;

        x1.ct_eq(&x2) & y1.ct_eq(&y2)
    }
}

impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Projective {}

// Complete point addition, algorithm 7
impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let b3 = FieldElement::CURVE_B3;

        let t0 = self.x * other.x;
        let t1 = self.y * other.y;
        let t2 = self.z * other.z;
        let t3 = self.x + self.y;
        let t4 = other.x + other.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = other.y + other.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = other.x + other.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0.double();
        let t0 = x3 + t0;
        let t2 = b3 * t2;
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = b3 * y3;
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<&Scalar> for Projective {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<&Projective> for Scalar {
    type Output = Projective;

    fn mul(self, point: &Projective) -> Projective {
        <Projective as Group>::scalar_mul(point, &self)
    }
}

// Conversions
impl From<Affine> for Projective {
    fn from(point: Affine) -> Self {
        Projective::from_affine(&point)
    }
}

impl From<&Affine> for Projective {
    fn from(point: &Affine) -> Self {
        Projective::from_affine(point)
    }
}

impl From<Projective> for Affine {
    fn from(point: Projective) -> Self {
        point.to_affine()
    }
}
