//! Elliptic curve arithmetic.
//!
//! This module implements the group law of the two curve families used by
//! the crate:
//!
//! - short-Weierstrass curves `y² = x³ + a·x + b` (NIST, SEC, Brainpool),
//!   in Jacobian coordinates
//! - twisted Edwards curves `a·x² + y² = 1 + d·x²·y²` (Ed25519, Ed448), in
//!   extended coordinates
//!
//! The family is a tag on [`CurveModel`]; [`Point`] dispatches on it, so
//! callers manipulate a single point type regardless of the curve.
//!
//! All arithmetic is performed on arbitrary-precision integers reduced
//! modulo the field prime. Points obtained from external data must come
//! through [`decode_point`], which enforces the curve equation and, by
//! default, the subgroup order.

mod edwards;
pub mod encoding;
pub mod model;
pub mod point;
pub mod precompute;
mod weierstrass;

pub use encoding::{DecodeOptions, OrderCheck, PointEncoding, decode_point};
pub use model::{CurveForm, CurveModel};
pub use point::{BLINDING_BITS, Point};
pub use precompute::PrecomputedPoint;

use thiserror::Error;

/// Rejection reasons for externally supplied points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPointError {
    /// The input length matches no accepted format.
    #[error("invalid encoded point length: {0} bytes")]
    InvalidLength(usize),

    /// The leading byte is not a known format prefix.
    #[error("invalid point encoding prefix {0:#04x}")]
    InvalidPrefix(u8),

    /// The format was recognised but is not in the accepted list.
    #[error("point encoding {0:?} not allowed")]
    EncodingNotAllowed(PointEncoding),

    /// A coordinate is not reduced modulo the field prime.
    #[error("point coordinate out of range")]
    CoordinateOutOfRange,

    /// The coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The hybrid prefix disagrees with the parity of `y`.
    #[error("hybrid prefix inconsistent with y parity")]
    InconsistentHybrid,

    /// The point is not annihilated by the expected order.
    #[error("point does not have the expected order")]
    WrongOrder,

    /// The point at infinity cannot be decoded.
    #[error("point at infinity is not a valid encoded point")]
    Infinity,
}
