//! The Grumpkin elliptic curve group, `y^2 = x^3 - 17` over the BN254 scalar field.
//!
//! This crate provides the base field, the scalar field, affine and projective
//! curve points, and helpers for random sampling. All arithmetic on field
//! elements, scalars and points runs in constant time with respect to the
//! values involved; fallible constructors return [`CurveError`].
//! The curve parameters are fixed and described by [`GRUMPKIN`].

mod affine;
mod basefield;
mod error;
mod group;
mod montgomery;
mod msm;
mod params;
mod projective;
mod random;
mod scalarfield;

pub use affine::{Affine, COMPRESSED_SIZE, UNCOMPRESSED_SIZE};
pub use basefield::FieldElement;
pub use error::CurveError;
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint;
pub use params::{CurveParams, GRUMPKIN};
pub use projective::Projective;
pub use random::RandomField;
pub use scalarfield::Scalar;
pub use subtle::Choice;
