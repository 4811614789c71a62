//! Curve models and prime-field arithmetic.
//!
//! A [`CurveModel`] is the bare algebraic description of a curve: the
//! prime `p`, the family-specific coefficients and, when known, the
//! cofactor. It carries no generator and no order; those belong to the
//! named [`Curve`](crate::curves::Curve) built on top of it.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::primitives::{NumberTheoryError, inverse_mod};

/// Family of a curve together with its coefficients.
///
/// Coefficients are stored reduced modulo `p`, so `a = -3` is kept as
/// `p - 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurveForm {
    /// `y² = x³ + a·x + b`
    ShortWeierstrass { a: BigUint, b: BigUint },
    /// `a·x² + y² = 1 + d·x²·y²`
    TwistedEdwards { a: BigUint, d: BigUint },
}

/// An elliptic curve over the prime field `F_p`.
///
/// Two models are equal when they share the prime and the coefficients;
/// the cofactor is informational and does not take part in comparison.
#[derive(Clone, Debug)]
pub struct CurveModel {
    p: BigUint,
    form: CurveForm,
    cofactor: Option<BigUint>,
}

impl CurveModel {
    /// Short-Weierstrass curve `y² = x³ + a·x + b` over `F_p`.
    pub fn short_weierstrass(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        cofactor: Option<BigUint>,
    ) -> Self {
        let form = CurveForm::ShortWeierstrass {
            a: a % &p,
            b: b % &p,
        };

        Self { p, form, cofactor }
    }

    /// Twisted Edwards curve `a·x² + y² = 1 + d·x²·y²` over `F_p`.
    pub fn twisted_edwards(
        p: BigUint,
        a: BigUint,
        d: BigUint,
        cofactor: Option<BigUint>,
    ) -> Self {
        let form = CurveForm::TwistedEdwards {
            a: a % &p,
            d: d % &p,
        };

        Self { p, form, cofactor }
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    #[inline]
    pub fn form(&self) -> &CurveForm {
        &self.form
    }

    /// The `a` coefficient, shared by both families.
    pub fn a(&self) -> &BigUint {
        match &self.form {
            CurveForm::ShortWeierstrass { a, .. } | CurveForm::TwistedEdwards { a, .. } => a,
        }
    }

    #[inline]
    pub fn cofactor(&self) -> Option<&BigUint> {
        self.cofactor.as_ref()
    }

    #[inline]
    pub fn is_edwards(&self) -> bool {
        matches!(self.form, CurveForm::TwistedEdwards { .. })
    }

    /// Checks the curve equation for affine coordinates.
    ///
    /// Coordinates must already be reduced; values `>= p` are rejected.
    pub fn contains_point(&self, x: &BigUint, y: &BigUint) -> bool {
        if x >= &self.p || y >= &self.p {
            return false;
        }

        let f = self.field();
        match &self.form {
            CurveForm::ShortWeierstrass { .. } => f.sqr(y) == self.weierstrass_rhs(x),
            CurveForm::TwistedEdwards { a, d } => {
                let xx = f.sqr(x);
                let yy = f.sqr(y);

                let lhs = f.add(&f.mul(a, &xx), &yy);
                let rhs = f.add(&BigUint::from(1u8), &f.mul(d, &f.mul(&xx, &yy)));
                lhs == rhs
            }
        }
    }

    /// `x³ + a·x + b mod p`; zero for Edwards curves.
    pub(crate) fn weierstrass_rhs(&self, x: &BigUint) -> BigUint {
        let f = self.field();
        match &self.form {
            CurveForm::ShortWeierstrass { a, b } => {
                let x3 = f.mul(&f.sqr(x), x);
                f.add(&f.add(&x3, &f.mul(a, x)), b)
            }
            CurveForm::TwistedEdwards { .. } => BigUint::zero(),
        }
    }

    #[inline]
    pub(crate) fn field(&self) -> Fp<'_> {
        Fp(&self.p)
    }
}

impl PartialEq for CurveModel {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.form == other.form
    }
}

impl Eq for CurveModel {}

/// Arithmetic modulo a prime, on operands already reduced below it.
#[derive(Clone, Copy)]
pub(crate) struct Fp<'a>(&'a BigUint);

impl Fp<'_> {
    #[inline]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.0
    }

    #[inline]
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + self.0 - b) % self.0
    }

    #[inline]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.0
    }

    #[inline]
    pub fn sqr(&self, a: &BigUint) -> BigUint {
        (a * a) % self.0
    }

    #[inline]
    pub fn neg(&self, a: &BigUint) -> BigUint {
        (self.0 - a) % self.0
    }

    /// Multiplies by a small constant.
    #[inline]
    pub fn scale(&self, a: &BigUint, k: u32) -> BigUint {
        (a * k) % self.0
    }

    #[inline]
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, NumberTheoryError> {
        inverse_mod(a, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_wraps_around() {
        let p = BigUint::from(23u8);
        let f = Fp(&p);

        assert_eq!(f.sub(&BigUint::from(3u8), &BigUint::from(5u8)), BigUint::from(21u8));
        assert_eq!(f.neg(&BigUint::zero()), BigUint::zero());
        assert_eq!(f.scale(&BigUint::from(12u8), 8), BigUint::from(4u8));
    }

    #[test]
    fn cofactor_does_not_affect_equality() {
        let p = BigUint::from(23u8);
        let a = BigUint::from(1u8);
        let b = BigUint::from(1u8);

        let m1 = CurveModel::short_weierstrass(p.clone(), a.clone(), b.clone(), None);
        let m2 = CurveModel::short_weierstrass(p, a, b, Some(BigUint::from(4u8)));
        assert_eq!(m1, m2);
    }
}
