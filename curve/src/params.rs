// Grumpkin: y^2 = x^3 - 17 over the BN254 scalar field.
// Group order is the BN254 base field modulus, so Grumpkin and BN254 form a cycle.
// Curve cofactor: 1

/// Immutable description of the curve and its encodings.
///
/// All values are big-endian. The arithmetic types carry the same constants
/// in Montgomery limb form; tests keep the two in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    /// Base field prime `p`.
    pub field_modulus: [u8; 32],
    /// Prime group order `n`.
    pub group_order: [u8; 32],
    /// The constant `b` in `y^2 = x^3 + b`.
    pub b: i64,
    pub cofactor: u64,
    pub generator_x: [u8; 32],
    pub generator_y: [u8; 32],
    /// Width of a canonical field element encoding.
    pub field_bytes: usize,
    /// Width of a canonical scalar encoding.
    pub scalar_bytes: usize,
}

pub const GRUMPKIN: CurveParams = CurveParams {
    name: "grumpkin",
    field_modulus: [
        0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
        0x5d, 0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00,
        0x00, 0x01,
    ],
    group_order: [
        0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58,
        0x5d, 0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c,
        0xfd, 0x47,
    ],
    b: -17,
    cofactor: 1,
    generator_x: [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x01,
    ],
    generator_y: [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0xcf, 0x13, 0x5e, 0x75, 0x06, 0xa4, 0x5d,
        0x63, 0x2d, 0x27, 0x0d, 0x45, 0xf1, 0x18, 0x12, 0x94, 0x83, 0x3f, 0xc4, 0x8d, 0x82, 0x3f,
        0x27, 0x2c,
    ],
    field_bytes: 32,
    scalar_bytes: 32,
};

impl CurveParams {
    /// Whether on-curve points also need an explicit subgroup check.
    #[inline]
    pub const fn needs_subgroup_check(&self) -> bool {
        self.cofactor != 1
    }
}
