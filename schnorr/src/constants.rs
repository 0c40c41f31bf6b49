//! Encoding widths for the `grumpkin-schnorr-sha256` profile.

use curve::GRUMPKIN;

/// Size of a serialized public verifying key in bytes.
///
/// A verifying key is encoded as its affine coordinates `x || y`, each a
/// canonical big-endian field element.
pub const PK_SIZE: usize = 2 * GRUMPKIN.field_bytes;

/// Size of a compressed verifying key: a parity prefix followed by `x`.
pub const COMPRESSED_PK_SIZE: usize = 1 + GRUMPKIN.field_bytes;

/// Size of a serialized secret signing key in bytes.
pub const SK_SIZE: usize = GRUMPKIN.scalar_bytes;

/// Width of the commitment `r`, the x-coordinate of the nonce point.
pub const COMMITMENT_SIZE: usize = GRUMPKIN.field_bytes;

/// Width of the response scalar `s`.
pub const RESPONSE_SIZE: usize = GRUMPKIN.scalar_bytes;

/// Size of a serialized signature in bytes.
///
/// A signature consists of:
/// - The commitment `r` (32 bytes)
/// - The response `s` (32 bytes)
///
/// Total: 64 bytes
pub const SIG_SIZE: usize = COMMITMENT_SIZE + RESPONSE_SIZE;

/// Output size of the message pre-hash and of the challenge hash.
pub const DIGEST_SIZE: usize = 32;
