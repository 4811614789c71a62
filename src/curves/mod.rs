//! Named curves and curve-parameter encoding.
//!
//! This module holds the registry of supported curves and the
//! [`Curve`] type that ties a [`CurveModel`](crate::ec::CurveModel) to a
//! generator of known prime order.
//!
//! ## Registry
//!
//! The registry contains the short-Weierstrass curves from FIPS 186-4
//! (P-192 to P-521), SEC 2 (secp256k1, secp112r1/r2, secp128r1,
//! secp160r1) and RFC 5639 (Brainpool, `r1` and `t1` variants), plus the
//! twisted Edwards curves Ed25519 and Ed448 from RFC 8032.
//!
//! Entries are reachable by [`CurveId`], by OID through [`find_curve`],
//! or by name through [`curve_by_name`]. The table is constructed once on
//! first use and never mutated.
//!
//! ## Parameters
//!
//! [`Curve::to_der`] and [`Curve::from_der`] implement the `ECParameters`
//! structure in both its `namedCurve` and `specifiedCurve` forms, with
//! PEM wrappers using the `EC PARAMETERS` label.

mod constants;
pub mod curve;
pub mod params;
pub mod registry;

pub use curve::Curve;
pub use params::{PEM_LABEL, ParamEncoding};
pub use registry::{CurveId, curve_by_name, curves, find_curve};

use thiserror::Error;

use crate::der::Oid;

/// Curve lookup or parameter-encoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownCurveError {
    #[error("unknown curve with OID {0}")]
    Oid(Oid),

    #[error("unknown curve name {0:?}")]
    Name(String),

    #[error("curve {0} has no OID, named_curve encoding impossible")]
    NoOid(&'static str),

    #[error("twisted Edwards curves have no explicit parameter encoding")]
    ExplicitEdwards,

    #[error("explicit parameters require a compressed, uncompressed or hybrid base point")]
    UnsupportedPointEncoding,

    #[error("characteristic-two curves are not supported")]
    CharacteristicTwo,

    #[error("unknown field type {0}")]
    FieldType(Oid),
}
