//! Curve points and scalar multiplication.
//!
//! A [`Point`] couples projective coordinates with a shared reference to
//! its [`CurveModel`] and, optionally, the order of the subgroup it
//! generates. The coordinate system is chosen by the curve family:
//! Jacobian for short-Weierstrass curves, extended for twisted Edwards.
//!
//! Three multiplication strategies are provided:
//!
//! - [`Point::mul`]: left-to-right double-and-add, for public scalars
//! - [`Point::mul_add`]: Shamir's trick for `k1·P + k2·Q`
//! - [`Point::mul_secret`]: fixed-length Montgomery ladder with optional
//!   scalar blinding, for private scalars
//!
//! The ladder performs the same sequence of group operations whatever the
//! scalar bits are. The underlying big-integer arithmetic is not constant
//! time, so this narrows, but does not close, the timing side channel.

use std::ops::{Add, Mul, Neg};
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;

use super::MalformedPointError;
use super::edwards::Extended;
use super::model::{CurveForm, CurveModel};
use super::precompute::PrecomputedPoint;
use super::weierstrass::Jacobian;

/// Width, in bits, of the random multiple of the order added to a secret
/// scalar when blinding is requested.
pub const BLINDING_BITS: u64 = 64;

/// Projective coordinates in the family-specific system.
#[derive(Clone, Debug)]
pub(crate) enum Coords {
    Jacobian(Jacobian),
    Extended(Extended),
}

impl Coords {
    pub fn identity(model: &CurveModel) -> Self {
        match model.form() {
            CurveForm::ShortWeierstrass { .. } => Coords::Jacobian(Jacobian::infinity()),
            CurveForm::TwistedEdwards { .. } => Coords::Extended(Extended::identity()),
        }
    }

    pub fn from_affine(model: &CurveModel, x: BigUint, y: BigUint) -> Self {
        match model.form() {
            CurveForm::ShortWeierstrass { .. } => Coords::Jacobian(Jacobian::from_affine(x, y)),
            CurveForm::TwistedEdwards { .. } => {
                Coords::Extended(Extended::from_affine(x, y, model.field()))
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Coords::Jacobian(p) => p.is_infinity(),
            Coords::Extended(p) => p.is_identity(),
        }
    }

    pub fn to_affine(&self, model: &CurveModel) -> Option<(BigUint, BigUint)> {
        match self {
            Coords::Jacobian(p) => p.to_affine(model.field()),
            Coords::Extended(p) => p.to_affine(model.field()),
        }
    }

    /// Same point with `Z = 1`.
    pub fn normalize(&self, model: &CurveModel) -> Self {
        match self.to_affine(model) {
            Some((x, y)) => Self::from_affine(model, x, y),
            None => self.clone(),
        }
    }

    pub fn neg(&self, model: &CurveModel) -> Self {
        match self {
            Coords::Jacobian(p) => Coords::Jacobian(p.neg(model.field())),
            Coords::Extended(p) => Coords::Extended(p.neg(model.field())),
        }
    }

    pub fn double(&self, model: &CurveModel) -> Self {
        match (self, model.form()) {
            (Coords::Jacobian(p), CurveForm::ShortWeierstrass { a, .. }) => {
                Coords::Jacobian(p.double(model.field(), a))
            }
            (Coords::Extended(p), CurveForm::TwistedEdwards { a, d }) => {
                Coords::Extended(p.double(model.field(), a, d))
            }
            _ => unreachable!("coordinate system always follows the curve family"),
        }
    }

    pub fn add(&self, other: &Self, model: &CurveModel) -> Self {
        match (self, other, model.form()) {
            (Coords::Jacobian(p), Coords::Jacobian(q), CurveForm::ShortWeierstrass { a, .. }) => {
                Coords::Jacobian(p.add(q, model.field(), a))
            }
            (Coords::Extended(p), Coords::Extended(q), CurveForm::TwistedEdwards { a, d }) => {
                Coords::Extended(p.add(q, model.field(), a, d))
            }
            _ => unreachable!("coordinate system always follows the curve family"),
        }
    }

    pub fn eq(&self, other: &Self, model: &CurveModel) -> bool {
        match (self, other) {
            (Coords::Jacobian(p), Coords::Jacobian(q)) => p.eq(q, model.field()),
            (Coords::Extended(p), Coords::Extended(q)) => p.eq(q, model.field()),
            _ => false,
        }
    }
}

/// A point on an elliptic curve.
///
/// Every point built through the public constructors or decoders satisfies
/// the curve equation. Arithmetic between points requires them to lie on
/// the same curve.
#[derive(Clone, Debug)]
pub struct Point {
    curve: Arc<CurveModel>,
    coords: Coords,
    order: Option<BigUint>,
}

impl Point {
    /// The neutral element: the point at infinity on Weierstrass curves,
    /// `(0, 1)` on Edwards curves.
    pub fn infinity(curve: Arc<CurveModel>) -> Self {
        let coords = Coords::identity(&curve);
        Self {
            curve,
            coords,
            order: None,
        }
    }

    /// Builds a point from affine coordinates.
    ///
    /// `order`, when given, is the order of the subgroup generated by the
    /// point; scalars are reduced by it. It is recorded as-is: use
    /// [`Point::has_order`] or the decoders to verify it.
    ///
    /// # Errors
    /// [`MalformedPointError::NotOnCurve`] if `(x, y)` does not satisfy the
    /// curve equation or a coordinate is not reduced modulo `p`.
    pub fn from_affine(
        curve: Arc<CurveModel>,
        x: BigUint,
        y: BigUint,
        order: Option<BigUint>,
    ) -> Result<Self, MalformedPointError> {
        if !curve.contains_point(&x, &y) {
            return Err(MalformedPointError::NotOnCurve);
        }

        let coords = Coords::from_affine(&curve, x, y);
        Ok(Self {
            curve,
            coords,
            order,
        })
    }

    pub(crate) fn from_coords(
        curve: Arc<CurveModel>,
        coords: Coords,
        order: Option<BigUint>,
    ) -> Self {
        Self {
            curve,
            coords,
            order,
        }
    }

    #[inline]
    pub(crate) fn coords(&self) -> &Coords {
        &self.coords
    }

    #[inline]
    pub fn curve(&self) -> &Arc<CurveModel> {
        &self.curve
    }

    #[inline]
    pub fn order(&self) -> Option<&BigUint> {
        self.order.as_ref()
    }

    /// Returns a copy of this point tagged with `order`.
    pub fn with_order(mut self, order: Option<BigUint>) -> Self {
        self.order = order;
        self
    }

    /// `true` for the neutral element of the group.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.coords.is_identity()
    }

    /// Affine `(x, y)`, or `None` for the Weierstrass point at infinity.
    pub fn to_affine(&self) -> Option<(BigUint, BigUint)> {
        self.coords.to_affine(&self.curve)
    }

    pub fn x(&self) -> Option<BigUint> {
        self.to_affine().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<BigUint> {
        self.to_affine().map(|(_, y)| y)
    }

    /// Same point with its projective denominator cleared.
    pub fn normalize(&self) -> Self {
        self.derive(self.coords.normalize(&self.curve))
    }

    fn derive(&self, coords: Coords) -> Self {
        Self {
            curve: Arc::clone(&self.curve),
            coords,
            order: self.order.clone(),
        }
    }

    fn assert_same_curve(&self, other: &Point) {
        assert!(
            Arc::ptr_eq(&self.curve, &other.curve) || self.curve == other.curve,
            "points lie on different curves"
        );
    }

    /// Group addition.
    ///
    /// # Panics
    /// If `other` lies on a different curve.
    pub fn add(&self, other: &Point) -> Point {
        self.assert_same_curve(other);
        self.derive(self.coords.add(&other.coords, &self.curve))
    }

    pub fn double(&self) -> Point {
        self.derive(self.coords.double(&self.curve))
    }

    pub fn neg(&self) -> Point {
        self.derive(self.coords.neg(&self.curve))
    }

    fn reduce(&self, k: &BigUint) -> BigUint {
        match &self.order {
            Some(n) => k % n,
            None => k.clone(),
        }
    }

    /// `k·P` by left-to-right double-and-add.
    ///
    /// The scalar is reduced modulo the point's order when it is known.
    /// Running time depends on the scalar; use [`Point::mul_secret`] for
    /// private values.
    pub fn mul(&self, k: &BigUint) -> Point {
        let k = self.reduce(k);
        self.derive(self.double_and_add(&k))
    }

    /// `k·P` without reducing `k`, used to test a claimed order.
    pub(crate) fn mul_unreduced(&self, k: &BigUint) -> Point {
        self.derive(self.double_and_add(k))
    }

    fn double_and_add(&self, k: &BigUint) -> Coords {
        let model = &*self.curve;
        let mut acc = Coords::identity(model);

        if k.is_zero() || self.is_infinity() {
            return acc;
        }

        for i in (0..k.bits()).rev() {
            acc = acc.double(model);
            if k.bit(i) {
                acc = acc.add(&self.coords, model);
            }
        }

        acc
    }

    /// `k1·P + k2·Q` in a single double-and-add pass (Shamir's trick).
    ///
    /// Each scalar is reduced by the order of its own point.
    ///
    /// # Panics
    /// If `other` lies on a different curve.
    pub fn mul_add(&self, k1: &BigUint, other: &Point, k2: &BigUint) -> Point {
        self.assert_same_curve(other);

        let model = &*self.curve;
        let k1 = self.reduce(k1);
        let k2 = other.reduce(k2);

        let sum = self.coords.add(&other.coords, model);
        let mut acc = Coords::identity(model);

        for i in (0..k1.bits().max(k2.bits())).rev() {
            acc = acc.double(model);
            match (k1.bit(i), k2.bit(i)) {
                (true, true) => acc = acc.add(&sum, model),
                (true, false) => acc = acc.add(&self.coords, model),
                (false, true) => acc = acc.add(&other.coords, model),
                (false, false) => {}
            }
        }

        self.derive(acc)
    }

    /// `k·P` for a secret `k`.
    ///
    /// Runs a Montgomery ladder over a number of bits fixed by the order,
    /// independent of `k`. With `blinding = Some(m)` the ladder processes
    /// `k + m·n` instead, where `m` is taken modulo `2^BLINDING_BITS`;
    /// both scalars give the same result. Blinding needs a known order and
    /// is ignored otherwise.
    pub fn mul_secret(&self, k: &BigUint, blinding: Option<&BigUint>) -> Point {
        let (scalar, bits) = blinded_scalar(k, self.order.as_ref(), blinding);
        self.derive(self.ladder(&scalar, bits))
    }

    fn ladder(&self, k: &BigUint, bits: u64) -> Coords {
        let model = &*self.curve;
        let mut r0 = Coords::identity(model);
        let mut r1 = self.coords.clone();

        for i in (0..bits).rev() {
            let bit = k.bit(i);

            conditional_swap(&mut r0, &mut r1, bit);
            r1 = r0.add(&r1, model);
            r0 = r0.double(model);
            conditional_swap(&mut r0, &mut r1, bit);
        }

        r0
    }

    /// Checks `n·P = ∞` without reducing `n`.
    pub fn has_order(&self, n: &BigUint) -> bool {
        self.mul_unreduced(n).is_infinity()
    }

    /// Precomputes `2^i·P` for repeated multiplications by this point.
    pub fn precompute(&self) -> PrecomputedPoint {
        PrecomputedPoint::new(self)
    }
}

/// Reduces `k` and applies optional blinding.
///
/// Returns the scalar to process and the fixed number of bits to process
/// it over.
pub(crate) fn blinded_scalar(
    k: &BigUint,
    order: Option<&BigUint>,
    blinding: Option<&BigUint>,
) -> (BigUint, u64) {
    let Some(n) = order else {
        return (k.clone(), k.bits());
    };

    let k = k % n;
    match blinding {
        Some(m) => {
            let mask = (BigUint::from(1u8) << BLINDING_BITS) - 1u8;
            let m = m & mask;
            (k + m * n, n.bits() + BLINDING_BITS)
        }
        None => (k, n.bits()),
    }
}

#[inline]
fn conditional_swap(a: &mut Coords, b: &mut Coords, swap: bool) {
    if swap {
        std::mem::swap(a, b);
    }
}

impl PartialEq for Point {
    /// Affine equality on the same curve; the recorded order is ignored.
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.curve, &other.curve) || self.curve == other.curve)
            && self.coords.eq(&other.coords, &self.curve)
    }
}

impl Eq for Point {}

impl Add<&Point> for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::neg(self)
    }
}

impl Mul<&BigUint> for &Point {
    type Output = Point;

    fn mul(self, k: &BigUint) -> Point {
        Point::mul(self, k)
    }
}
