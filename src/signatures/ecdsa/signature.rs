//! ECDSA signature values and their encodings.

use num_bigint::BigUint;

use crate::der;
use crate::primitives::conv::{from_bytes_be, to_bytes_be_padded};
use crate::signatures::SignatureError;

/// An ECDSA signature `(r, s)`.
///
/// Components are stored as integers; range checks against the curve order
/// happen at verification time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    #[inline]
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Vec<u8> {
        der::encode_sequence(&[&der::encode_integer(&self.r), &der::encode_integer(&self.s)])
    }

    /// Parses a DER signature. Trailing bytes are rejected.
    pub fn from_der(data: &[u8]) -> Result<Self, SignatureError> {
        let (body, rest) = der::remove_sequence(data).map_err(SignatureError::MalformedEncoding)?;
        if !rest.is_empty() {
            return Err(SignatureError::MalformedEncoding(der::DerError::TrailingData(
                "DER signature",
            )));
        }

        let (r, rest) = der::remove_integer(body).map_err(SignatureError::MalformedEncoding)?;
        let (s, rest) = der::remove_integer(rest).map_err(SignatureError::MalformedEncoding)?;
        if !rest.is_empty() {
            return Err(SignatureError::MalformedEncoding(der::DerError::TrailingData(
                "signature integers",
            )));
        }

        Ok(Self { r, s })
    }

    /// `r ‖ s`, each big-endian over `baselen` bytes.
    pub fn to_raw(&self, baselen: usize) -> Vec<u8> {
        let mut out = to_bytes_be_padded(&self.r, baselen);
        out.extend_from_slice(&to_bytes_be_padded(&self.s, baselen));
        out
    }

    /// Parses `r ‖ s`; `data` must be exactly `2·baselen` bytes.
    pub fn from_raw(data: &[u8], baselen: usize) -> Result<Self, SignatureError> {
        if data.len() != 2 * baselen {
            return Err(SignatureError::InvalidLength {
                expected: 2 * baselen,
                found: data.len(),
            });
        }

        Ok(Self {
            r: from_bytes_be(&data[..baselen]),
            s: from_bytes_be(&data[baselen..]),
        })
    }

    /// `true` if `s <= n/2`.
    pub fn is_low_s(&self, order: &BigUint) -> bool {
        self.s <= (order >> 1u32)
    }

    /// Returns the equivalent signature with `s <= n/2`.
    pub fn normalize_s(&self, order: &BigUint) -> Self {
        if self.is_low_s(order) {
            return self.clone();
        }

        Self {
            r: self.r.clone(),
            s: order - &self.s,
        }
    }
}
