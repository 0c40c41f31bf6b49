use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use subtle::ConstantTimeEq;

/// Uniform sampling for field elements and scalars.
///
/// Implemented for every type `StandardUniform` can sample, so the rejection
/// samplers next to `FieldElement` and `Scalar` are the only source of
/// randomness. The default value is taken to be zero.
pub trait RandomField: Sized + Default + ConstantTimeEq {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Resample until the value is non-zero, as required for secret keys
    /// and nonces.
    fn random_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let value = Self::random(rng);
            if !bool::from(value.ct_eq(&Self::default())) {
                return value;
            }
        }
    }
}

impl<T> RandomField for T
where
    StandardUniform: Distribution<T>,
    T: Default + ConstantTimeEq,
{
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}
