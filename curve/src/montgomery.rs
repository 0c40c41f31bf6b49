//! Shared 4x64-bit limb arithmetic for the base and scalar fields.
//!
//! Every routine here runs the same instruction sequence regardless of the
//! limb values: carries and borrows are propagated as masks, never as branches.
//! Both moduli are below 2^255, so the sum of two reduced values never
//! overflows 256 bits.

/// Compute `a + b + carry`, returning the low word and the carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a - (b + borrow)`, returning the low word and the borrow mask
/// (`0` or `u64::MAX`).
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a + b * c + carry`, returning the low word and the carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// `a - b mod m` for `a, b < m`. Also used as the final conditional
/// subtraction for values in `[0, 2m)` by calling `sub_mod(x, m, m)`.
#[inline]
pub(crate) const fn sub_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(a[0], b[0], 0);
    let (d1, borrow) = sbb(a[1], b[1], borrow);
    let (d2, borrow) = sbb(a[2], b[2], borrow);
    let (d3, borrow) = sbb(a[3], b[3], borrow);

    // Add the modulus back if we underflowed
    let (d0, carry) = adc(d0, m[0] & borrow, 0);
    let (d1, carry) = adc(d1, m[1] & borrow, carry);
    let (d2, carry) = adc(d2, m[2] & borrow, carry);
    let (d3, _) = adc(d3, m[3] & borrow, carry);

    [d0, d1, d2, d3]
}

/// `a + b mod m` for `a, b < m`.
#[inline]
pub(crate) const fn add_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (d0, carry) = adc(a[0], b[0], 0);
    let (d1, carry) = adc(a[1], b[1], carry);
    let (d2, carry) = adc(a[2], b[2], carry);
    let (d3, _) = adc(a[3], b[3], carry);

    sub_mod(&[d0, d1, d2, d3], m, m)
}

/// `-a mod m` for `a < m`, mapping zero to zero.
#[inline]
pub(crate) const fn neg_mod(a: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(m[0], a[0], 0);
    let (d1, borrow) = sbb(m[1], a[1], borrow);
    let (d2, borrow) = sbb(m[2], a[2], borrow);
    let (d3, _) = sbb(m[3], a[3], borrow);

    let mask = (((a[0] | a[1] | a[2] | a[3]) == 0) as u64).wrapping_sub(1);
    [d0 & mask, d1 & mask, d2 & mask, d3 & mask]
}

/// Borrow mask of `a - m`: all ones iff `a < m`.
#[inline]
pub(crate) const fn lt_mask(a: &[u64; 4], m: &[u64; 4]) -> u64 {
    let (_, borrow) = sbb(a[0], m[0], 0);
    let (_, borrow) = sbb(a[1], m[1], borrow);
    let (_, borrow) = sbb(a[2], m[2], borrow);
    let (_, borrow) = sbb(a[3], m[3], borrow);
    borrow
}

/// Montgomery multiplication: `a * b * 2^-256 mod m`.
///
/// `inv` is `-m^{-1} mod 2^64`. Either operand may be any 256-bit value as
/// long as the other is below `m`; the result is always fully reduced.
#[inline]
pub(crate) const fn mont_mul(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4], inv: u64) -> [u64; 4] {
    let (r0, carry) = mac(0, a[0], b[0], 0);
    let (r1, carry) = mac(0, a[0], b[1], carry);
    let (r2, carry) = mac(0, a[0], b[2], carry);
    let (r3, r4) = mac(0, a[0], b[3], carry);

    let (r1, carry) = mac(r1, a[1], b[0], 0);
    let (r2, carry) = mac(r2, a[1], b[1], carry);
    let (r3, carry) = mac(r3, a[1], b[2], carry);
    let (r4, r5) = mac(r4, a[1], b[3], carry);

    let (r2, carry) = mac(r2, a[2], b[0], 0);
    let (r3, carry) = mac(r3, a[2], b[1], carry);
    let (r4, carry) = mac(r4, a[2], b[2], carry);
    let (r5, r6) = mac(r5, a[2], b[3], carry);

    let (r3, carry) = mac(r3, a[3], b[0], 0);
    let (r4, carry) = mac(r4, a[3], b[1], carry);
    let (r5, carry) = mac(r5, a[3], b[2], carry);
    let (r6, r7) = mac(r6, a[3], b[3], carry);

    mont_reduce([r0, r1, r2, r3, r4, r5, r6, r7], m, inv)
}

/// Montgomery reduction of a 512-bit value `t < m * 2^256`.
#[inline(always)]
pub(crate) const fn mont_reduce(t: [u64; 8], m: &[u64; 4], inv: u64) -> [u64; 4] {
    let [r0, r1, r2, r3, r4, r5, r6, r7] = t;

    let k = r0.wrapping_mul(inv);
    let (_, carry) = mac(r0, k, m[0], 0);
    let (r1, carry) = mac(r1, k, m[1], carry);
    let (r2, carry) = mac(r2, k, m[2], carry);
    let (r3, carry) = mac(r3, k, m[3], carry);
    let (r4, carry2) = adc(r4, 0, carry);

    let k = r1.wrapping_mul(inv);
    let (_, carry) = mac(r1, k, m[0], 0);
    let (r2, carry) = mac(r2, k, m[1], carry);
    let (r3, carry) = mac(r3, k, m[2], carry);
    let (r4, carry) = mac(r4, k, m[3], carry);
    let (r5, carry2) = adc(r5, carry2, carry);

    let k = r2.wrapping_mul(inv);
    let (_, carry) = mac(r2, k, m[0], 0);
    let (r3, carry) = mac(r3, k, m[1], carry);
    let (r4, carry) = mac(r4, k, m[2], carry);
    let (r5, carry) = mac(r5, k, m[3], carry);
    let (r6, carry2) = adc(r6, carry2, carry);

    let k = r3.wrapping_mul(inv);
    let (_, carry) = mac(r3, k, m[0], 0);
    let (r4, carry) = mac(r4, k, m[1], carry);
    let (r5, carry) = mac(r5, k, m[2], carry);
    let (r6, carry) = mac(r6, k, m[3], carry);
    let (r7, _) = adc(r7, carry2, carry);

    sub_mod(&[r4, r5, r6, r7], m, m)
}

/// Big-endian 32 bytes to little-endian limbs.
#[inline]
pub(crate) fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        limbs[3 - i] = u64::from_be_bytes(word);
    }
    limbs
}

/// Little-endian limbs to big-endian 32 bytes.
#[inline]
pub(crate) fn limbs_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, chunk) in bytes.chunks_exact_mut(8).enumerate() {
        chunk.copy_from_slice(&limbs[3 - i].to_be_bytes());
    }
    bytes
}
