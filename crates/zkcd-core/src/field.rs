//! # BN254 Field Moduli
//!
//! Both Groth16 and PLONK verifiers in this workspace operate over the BN254
//! (alt_bn128) curve. Group element coordinates live in the base field `q`;
//! public inputs and witness values live in the scalar field `r`.

use num_bigint::BigUint;

/// Little-endian `u32` digits of the BN254 base field modulus
/// `21888242871839275222246405745257275088696311157297823662689037894645226208583`.
const BASE_FIELD_DIGITS: [u32; 8] = [
    0xd87c_fd47, 0x3c20_8c16, 0x6871_ca8d, 0x9781_6a91,
    0x8181_585d, 0xb850_45b6, 0xe131_a029, 0x3064_4e72,
];

/// Little-endian `u32` digits of the BN254 scalar field modulus
/// `21888242871839275222246405745257275088548364400416034343698204186575808495617`.
const SCALAR_FIELD_DIGITS: [u32; 8] = [
    0xf000_0001, 0x43e1_f593, 0x79b9_7091, 0x2833_e848,
    0x8181_585d, 0xb850_45b6, 0xe131_a029, 0x3064_4e72,
];

/// Width in bytes of one field element on the wire.
pub const FIELD_ELEMENT_BYTES: usize = 32;

/// The BN254 base field modulus `q`.
pub fn base_field_modulus() -> BigUint {
    BigUint::from_slice(&BASE_FIELD_DIGITS)
}

/// The BN254 scalar field modulus `r`.
pub fn scalar_field_modulus() -> BigUint {
    BigUint::from_slice(&SCALAR_FIELD_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_field_matches_decimal() {
        assert_eq!(
            base_field_modulus().to_string(),
            "21888242871839275222246405745257275088696311157297823662689037894645226208583"
        );
    }

    #[test]
    fn scalar_field_matches_decimal() {
        assert_eq!(
            scalar_field_modulus().to_string(),
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        );
    }

    #[test]
    fn scalar_field_is_smaller() {
        assert!(scalar_field_modulus() < base_field_modulus());
        assert_eq!(base_field_modulus().to_bytes_be().len(), FIELD_ELEMENT_BYTES);
    }
}
