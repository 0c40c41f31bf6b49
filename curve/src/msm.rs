use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::group::ScalarBits;
use crate::{Affine, Projective, Scalar};

/// Compute a * G + b * P, where G is the fixed generator.
///
/// Shamir's trick over a four-entry table `[O, G, P, G + P]`: every one of the
/// 256 steps doubles once, scans the whole table with constant-time selects,
/// and adds the selected entry, even when it is the identity.
pub fn double_scalar_mul_basepoint(a: &Scalar, b: &Scalar, point: &Affine) -> Projective {
    let g = Projective::generator();
    let p = Projective::from_affine(point);
    let table = [Projective::INFINITY, g, p, g + p];

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = Projective::INFINITY;

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).rev() {
            result = result.double();

            let index = (((a_limb >> shift) & 1) | (((b_limb >> shift) & 1) << 1)) as u8;
            let mut addend = Projective::INFINITY;
            for (i, entry) in table.iter().enumerate() {
                addend.conditional_assign(entry, (i as u8).ct_eq(&index));
            }
            result += addend;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_matches_separate_multiplications() {
        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..4 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let point = Affine::generator().scalar_mul(&Scalar::random(&mut rng));

            let expected = Projective::generator().scalar_mul(&a)
                + Projective::from_affine(&point).scalar_mul(&b);
            assert_eq!(double_scalar_mul_basepoint(&a, &b, &point), expected);
        }
    }

    #[test]
    fn test_cancellation_gives_identity() {
        // a*G + (-a)*G = O
        let a = Scalar::from_u64(123456);
        let result = double_scalar_mul_basepoint(&a, &-a, &Affine::generator());
        assert!(bool::from(result.is_identity()));
    }

    #[test]
    fn test_identity_point() {
        let a = Scalar::from_u64(77);
        let result = double_scalar_mul_basepoint(&a, &Scalar::from_u64(5), &Affine::INFINITY);
        assert_eq!(result, Projective::generator().scalar_mul(&a));
    }
}
