//! Process-wide table of named curves.
//!
//! The table is built once, on first access, and is read-only afterwards.
//! Lookups are linear scans over 26 entries.

use std::sync::{Arc, LazyLock};

use num_bigint::BigUint;

use super::UnknownCurveError;
use super::constants::{CURVES, CurveParams, Family};
use super::curve::Curve;
use crate::der::Oid;
use crate::ec::{CurveModel, Point};

/// Identifiers of the registered curves.
///
/// The discriminant is the position of the curve in [`curves()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveId {
    Nist192p,
    Nist224p,
    Nist256p,
    Nist384p,
    Nist521p,
    Secp256k1,
    BrainpoolP160r1,
    BrainpoolP192r1,
    BrainpoolP224r1,
    BrainpoolP256r1,
    BrainpoolP320r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
    Secp112r1,
    Secp112r2,
    Secp128r1,
    Secp160r1,
    Ed25519,
    Ed448,
    BrainpoolP160t1,
    BrainpoolP192t1,
    BrainpoolP224t1,
    BrainpoolP256t1,
    BrainpoolP320t1,
    BrainpoolP384t1,
    BrainpoolP512t1,
}

impl CurveId {
    /// Every identifier, in registry order.
    pub const ALL: [CurveId; 26] = [
        CurveId::Nist192p,
        CurveId::Nist224p,
        CurveId::Nist256p,
        CurveId::Nist384p,
        CurveId::Nist521p,
        CurveId::Secp256k1,
        CurveId::BrainpoolP160r1,
        CurveId::BrainpoolP192r1,
        CurveId::BrainpoolP224r1,
        CurveId::BrainpoolP256r1,
        CurveId::BrainpoolP320r1,
        CurveId::BrainpoolP384r1,
        CurveId::BrainpoolP512r1,
        CurveId::Secp112r1,
        CurveId::Secp112r2,
        CurveId::Secp128r1,
        CurveId::Secp160r1,
        CurveId::Ed25519,
        CurveId::Ed448,
        CurveId::BrainpoolP160t1,
        CurveId::BrainpoolP192t1,
        CurveId::BrainpoolP224t1,
        CurveId::BrainpoolP256t1,
        CurveId::BrainpoolP320t1,
        CurveId::BrainpoolP384t1,
        CurveId::BrainpoolP512t1,
    ];

    /// The registry entry for this identifier.
    #[inline]
    pub fn curve(self) -> &'static Curve {
        &REGISTRY[self as usize]
    }
}

static REGISTRY: LazyLock<Vec<Curve>> = LazyLock::new(|| {
    let curves: Vec<Curve> = CURVES.iter().map(build).collect();
    tracing::debug!(count = curves.len(), "curve registry initialised");
    curves
});

fn hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("curve constants are valid hexadecimal")
}

fn build(params: &CurveParams) -> Curve {
    let p = hex(params.p);
    let cofactor = Some(BigUint::from(params.h));

    let model = match params.family {
        Family::Weierstrass => {
            CurveModel::short_weierstrass(p, hex(params.a), hex(params.b), cofactor)
        }
        Family::Edwards => CurveModel::twisted_edwards(p, hex(params.a), hex(params.b), cofactor),
    };

    let order = hex(params.n);
    let generator = Point::from_affine(Arc::new(model), hex(params.gx), hex(params.gy), None)
        .expect("registered generators lie on their curve");

    let oid = Oid::new(params.oid).expect("registered OIDs are well-formed");

    Curve::new(params.name, params.openssl_name, generator, order, Some(oid))
}

/// All registered curves, in [`CurveId`] order.
pub fn curves() -> &'static [Curve] {
    &REGISTRY
}

/// Looks up a curve by OID.
///
/// # Errors
/// [`UnknownCurveError::Oid`] if no registered curve has this OID.
pub fn find_curve(oid: &Oid) -> Result<&'static Curve, UnknownCurveError> {
    curves()
        .iter()
        .find(|c| c.oid() == Some(oid))
        .ok_or_else(|| UnknownCurveError::Oid(oid.clone()))
}

/// Looks up a curve by name or OpenSSL name. Matching is case-sensitive.
///
/// # Errors
/// [`UnknownCurveError::Name`] if no registered curve has this name.
pub fn curve_by_name(name: &str) -> Result<&'static Curve, UnknownCurveError> {
    curves()
        .iter()
        .find(|c| c.name() == name || c.openssl_name() == Some(name))
        .ok_or_else(|| UnknownCurveError::Name(name.to_owned()))
}
