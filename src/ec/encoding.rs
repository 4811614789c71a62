//! Point serialization.
//!
//! Weierstrass points use the SEC 1 formats, with every coordinate
//! serialized big-endian over `L = byte_length(p)` bytes:
//!
//! | encoding       | layout                      | length   |
//! |----------------|-----------------------------|----------|
//! | `Raw`          | `x ‖ y`                     | `2L`     |
//! | `Uncompressed` | `04 ‖ x ‖ y`                | `2L + 1` |
//! | `Compressed`   | `02/03 ‖ x` (parity of `y`) | `L + 1`  |
//! | `Hybrid`       | `06/07 ‖ x ‖ y`             | `2L + 1` |
//!
//! The point at infinity encodes as the single byte `00` and is never
//! accepted by the decoder.
//!
//! Edwards points have one format (RFC 8032): `y` little-endian over
//! `(bits(p) + 8) / 8` bytes with the parity of `x` in the top bit of the
//! last byte.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;

use super::MalformedPointError;
use super::model::{CurveForm, CurveModel};
use super::point::Point;
use crate::primitives::conv::{byte_length, from_bytes_be, to_bytes_be_padded, to_bytes_le_padded};
use crate::primitives::square_root_mod_prime;

/// Weierstrass point formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointEncoding {
    Raw,
    Uncompressed,
    Compressed,
    Hybrid,
}

impl PointEncoding {
    pub const ALL: &'static [PointEncoding] = &[
        PointEncoding::Raw,
        PointEncoding::Uncompressed,
        PointEncoding::Compressed,
        PointEncoding::Hybrid,
    ];
}

/// Whether decoding verifies `order·P = ∞`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderCheck {
    /// Reject points outside the subgroup of the expected order.
    #[default]
    Required,
    /// Only check the curve equation.
    ///
    /// Points accepted this way may belong to a small subgroup; they must
    /// not be combined with secret scalars.
    SkipUnsafe,
}

/// Options for [`decode_point`].
#[derive(Clone, Copy, Debug)]
pub struct DecodeOptions {
    /// Accepted Weierstrass formats. Ignored for Edwards curves.
    pub encodings: &'static [PointEncoding],
    pub order_check: OrderCheck,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            encodings: PointEncoding::ALL,
            order_check: OrderCheck::Required,
        }
    }
}

/// Encoded length of an Edwards point over a field of prime `p`.
#[inline]
pub fn edwards_encoding_length(p: &BigUint) -> usize {
    (p.bits() as usize + 1).div_ceil(8)
}

impl Point {
    /// Serializes the point.
    ///
    /// `encoding` selects the Weierstrass format and is ignored on Edwards
    /// curves, which have a single format.
    pub fn to_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        let model = self.curve();

        if model.is_edwards() {
            return self.to_edwards_bytes();
        }

        let Some((x, y)) = self.to_affine() else {
            return vec![0x00];
        };

        let len = byte_length(model.p());
        let mut raw = to_bytes_be_padded(&x, len);
        let odd = y.bit(0);

        match encoding {
            PointEncoding::Compressed => {
                raw.insert(0, if odd { 0x03 } else { 0x02 });
                raw
            }
            _ => {
                raw.extend_from_slice(&to_bytes_be_padded(&y, len));
                match encoding {
                    PointEncoding::Uncompressed => raw.insert(0, 0x04),
                    PointEncoding::Hybrid => raw.insert(0, if odd { 0x07 } else { 0x06 }),
                    _ => {}
                }
                raw
            }
        }
    }

    fn to_edwards_bytes(&self) -> Vec<u8> {
        let len = edwards_encoding_length(self.curve().p());
        let (x, y) = self.to_affine().unwrap_or_else(|| (BigUint::zero(), BigUint::from(1u8)));

        let mut out = to_bytes_le_padded(&y, len);
        if x.bit(0) {
            out[len - 1] |= 0x80;
        }
        out
    }
}

/// Decodes a point on `curve`, validating it.
///
/// The point is always checked against the curve equation. When `order`
/// is given and `options.order_check` is [`OrderCheck::Required`], the
/// point must also satisfy `order·P = ∞`. The returned point records
/// `order`.
///
/// # Errors
/// [`MalformedPointError`] describing the first check that failed.
pub fn decode_point(
    curve: &Arc<CurveModel>,
    data: &[u8],
    order: Option<&BigUint>,
    options: &DecodeOptions,
) -> Result<Point, MalformedPointError> {
    let (x, y) = match curve.form() {
        CurveForm::ShortWeierstrass { .. } => decode_weierstrass(curve, data, options.encodings)?,
        CurveForm::TwistedEdwards { a, d } => decode_edwards(curve, a, d, data)?,
    };

    let point = Point::from_affine(Arc::clone(curve), x, y, order.cloned())?;

    if let (Some(n), OrderCheck::Required) = (order, options.order_check) {
        if !point.has_order(n) {
            return Err(MalformedPointError::WrongOrder);
        }
    }

    Ok(point)
}

fn decode_weierstrass(
    curve: &CurveModel,
    data: &[u8],
    allowed: &[PointEncoding],
) -> Result<(BigUint, BigUint), MalformedPointError> {
    let p = curve.p();
    let len = byte_length(p);

    if data == [0x00] {
        return Err(MalformedPointError::Infinity);
    }

    let (encoding, body) = if data.len() == 2 * len {
        (PointEncoding::Raw, data)
    } else if data.len() == 2 * len + 1 {
        match data[0] {
            0x04 => (PointEncoding::Uncompressed, &data[1..]),
            0x06 | 0x07 => (PointEncoding::Hybrid, &data[1..]),
            prefix => return Err(MalformedPointError::InvalidPrefix(prefix)),
        }
    } else if data.len() == len + 1 {
        match data[0] {
            0x02 | 0x03 => (PointEncoding::Compressed, &data[1..]),
            prefix => return Err(MalformedPointError::InvalidPrefix(prefix)),
        }
    } else {
        return Err(MalformedPointError::InvalidLength(data.len()));
    };

    if !allowed.contains(&encoding) {
        return Err(MalformedPointError::EncodingNotAllowed(encoding));
    }

    let x = from_bytes_be(&body[..len]);
    if &x >= p {
        return Err(MalformedPointError::CoordinateOutOfRange);
    }

    if encoding == PointEncoding::Compressed {
        let beta = square_root_mod_prime(&curve.weierstrass_rhs(&x), p)
            .map_err(|_| MalformedPointError::NotOnCurve)?;

        let want_odd = data[0] == 0x03;
        // y = 0 has a single encoding
        if beta.is_zero() && want_odd {
            return Err(MalformedPointError::InvalidPrefix(data[0]));
        }

        let y = if beta.bit(0) == want_odd {
            beta
        } else {
            curve.field().neg(&beta)
        };

        return Ok((x, y));
    }

    let y = from_bytes_be(&body[len..]);
    if &y >= p {
        return Err(MalformedPointError::CoordinateOutOfRange);
    }

    if encoding == PointEncoding::Hybrid && y.bit(0) != (data[0] == 0x07) {
        return Err(MalformedPointError::InconsistentHybrid);
    }

    Ok((x, y))
}

fn decode_edwards(
    curve: &CurveModel,
    a: &BigUint,
    d: &BigUint,
    data: &[u8],
) -> Result<(BigUint, BigUint), MalformedPointError> {
    let p = curve.p();
    let len = edwards_encoding_length(p);

    if data.len() != len {
        return Err(MalformedPointError::InvalidLength(data.len()));
    }

    let mut bytes = data.to_vec();
    let x_odd = bytes[len - 1] & 0x80 != 0;
    bytes[len - 1] &= 0x7f;

    let y = BigUint::from_bytes_le(&bytes);
    if &y >= p {
        return Err(MalformedPointError::CoordinateOutOfRange);
    }

    // x² = (y² − 1) / (d·y² − a)
    let f = curve.field();
    let yy = f.sqr(&y);
    let num = f.sub(&yy, &BigUint::from(1u8));
    let den = f.sub(&f.mul(d, &yy), a);
    let den_inv = f.inv(&den).map_err(|_| MalformedPointError::NotOnCurve)?;

    let x = square_root_mod_prime(&f.mul(&num, &den_inv), p)
        .map_err(|_| MalformedPointError::NotOnCurve)?;

    if x.is_zero() && x_odd {
        return Err(MalformedPointError::NotOnCurve);
    }

    let x = if x.bit(0) == x_odd { x } else { f.neg(&x) };
    Ok((x, y))
}
