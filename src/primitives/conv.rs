//! Integer / byte-string conversions.
//!
//! Every external representation of a scalar or coordinate in this crate is
//! a fixed-width byte string: big-endian for Weierstrass curves, DER and
//! ECDSA, little-endian for EdDSA. These helpers centralize the padding and
//! truncation rules.

use num_bigint::BigUint;

/// Number of significant bits in `n` (zero for zero).
#[inline]
pub fn bit_length(n: &BigUint) -> usize {
    n.bits() as usize
}

/// Number of bytes needed to hold any value below `n`.
///
/// This is the width used to serialize scalars modulo a curve order and
/// coordinates modulo a field prime.
#[inline]
pub fn byte_length(n: &BigUint) -> usize {
    bit_length(n).div_ceil(8)
}

/// Serializes `n` as a big-endian string of exactly `len` bytes.
///
/// The value is left-padded with zeros. If `n` does not fit, only the
/// least significant `len` bytes are kept; callers pass values already
/// reduced below the modulus that determined `len`.
pub fn to_bytes_be_padded(n: &BigUint, len: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    let mut out = vec![0u8; len];

    if bytes.len() >= len {
        out.copy_from_slice(&bytes[bytes.len() - len..]);
    } else {
        out[len - bytes.len()..].copy_from_slice(&bytes);
    }

    out
}

/// Serializes `n` as a little-endian string of exactly `len` bytes.
pub fn to_bytes_le_padded(n: &BigUint, len: usize) -> Vec<u8> {
    let mut out = n.to_bytes_le();
    out.resize(len, 0);
    out.truncate(len);
    out
}

/// Parses a big-endian byte string of any length.
#[inline]
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Parses a little-endian byte string of any length.
#[inline]
pub fn from_bytes_le(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// FIPS 186 / RFC 6979 `bits2int`.
///
/// Interprets `data` as a big-endian integer and keeps only its leftmost
/// `qlen` bits.
pub fn bits_to_int(data: &[u8], qlen: usize) -> BigUint {
    let x = BigUint::from_bytes_be(data);
    let len = data.len() * 8;

    if len > qlen { x >> (len - qlen) } else { x }
}

/// RFC 6979 `bits2octets`: `bits2int` reduced once by `order`, serialized
/// to the byte length of `order`.
pub fn bits_to_octets(data: &[u8], order: &BigUint) -> Vec<u8> {
    let z1 = bits_to_int(data, bit_length(order));
    let z2 = if &z1 >= order { z1 - order } else { z1 };

    to_bytes_be_padded(&z2, byte_length(order))
}
