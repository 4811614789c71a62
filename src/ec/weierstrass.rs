//! Short-Weierstrass group law in Jacobian coordinates.
//!
//! A point `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`; the
//! point at infinity is any triple with `Z = 0`. Formulas are the
//! `dbl-2007-bl` and `add-2007-bl` entries of the Explicit-Formulas
//! Database, valid for arbitrary `a`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::model::Fp;

#[derive(Clone, Debug)]
pub(crate) struct Jacobian {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl Jacobian {
    pub fn infinity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    pub fn from_affine(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            z: BigUint::one(),
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Affine coordinates, `None` at infinity.
    pub fn to_affine(&self, f: Fp<'_>) -> Option<(BigUint, BigUint)> {
        if self.is_infinity() {
            return None;
        }

        if self.z.is_one() {
            return Some((self.x.clone(), self.y.clone()));
        }

        // z is non-zero and p is prime
        let zinv = f.inv(&self.z).ok()?;
        let zinv2 = f.sqr(&zinv);
        let zinv3 = f.mul(&zinv2, &zinv);

        Some((f.mul(&self.x, &zinv2), f.mul(&self.y, &zinv3)))
    }

    pub fn neg(&self, f: Fp<'_>) -> Self {
        Self {
            x: self.x.clone(),
            y: f.neg(&self.y),
            z: self.z.clone(),
        }
    }

    pub fn double(&self, f: Fp<'_>, a: &BigUint) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::infinity();
        }

        let xx = f.sqr(&self.x);
        let yy = f.sqr(&self.y);
        let yyyy = f.sqr(&yy);
        let zz = f.sqr(&self.z);

        // S = 2·((X + YY)² − XX − YYYY)
        let s = f.scale(&f.sub(&f.sub(&f.sqr(&f.add(&self.x, &yy)), &xx), &yyyy), 2);
        // M = 3·XX + a·ZZ²
        let m = f.add(&f.scale(&xx, 3), &f.mul(a, &f.sqr(&zz)));

        let x3 = f.sub(&f.sqr(&m), &f.scale(&s, 2));
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &x3)), &f.scale(&yyyy, 8));
        let z3 = f.sub(&f.sub(&f.sqr(&f.add(&self.y, &self.z)), &yy), &zz);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn add(&self, other: &Self, f: Fp<'_>, a: &BigUint) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        let z1z1 = f.sqr(&self.z);
        let z2z2 = f.sqr(&other.z);

        let u1 = f.mul(&self.x, &z2z2);
        let u2 = f.mul(&other.x, &z1z1);
        let s1 = f.mul(&f.mul(&self.y, &other.z), &z2z2);
        let s2 = f.mul(&f.mul(&other.y, &self.z), &z1z1);

        let h = f.sub(&u2, &u1);
        let r = f.scale(&f.sub(&s2, &s1), 2);

        if h.is_zero() {
            return if r.is_zero() {
                self.double(f, a)
            } else {
                Self::infinity()
            };
        }

        let i = f.sqr(&f.scale(&h, 2));
        let j = f.mul(&h, &i);
        let v = f.mul(&u1, &i);

        let x3 = f.sub(&f.sub(&f.sqr(&r), &j), &f.scale(&v, 2));
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&v, &x3)),
            &f.scale(&f.mul(&s1, &j), 2),
        );
        let z3 = f.mul(
            &f.sub(&f.sub(&f.sqr(&f.add(&self.z, &other.z)), &z1z1), &z2z2),
            &h,
        );

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Projective equality: `X1·Z2² = X2·Z1²` and `Y1·Z2³ = Y2·Z1³`.
    pub fn eq(&self, other: &Self, f: Fp<'_>) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        let z1z1 = f.sqr(&self.z);
        let z2z2 = f.sqr(&other.z);

        f.mul(&self.x, &z2z2) == f.mul(&other.x, &z1z1)
            && f.mul(&f.mul(&self.y, &other.z), &z2z2) == f.mul(&f.mul(&other.y, &self.z), &z1z1)
    }
}
