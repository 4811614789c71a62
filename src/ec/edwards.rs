//! Twisted Edwards group law in extended coordinates.
//!
//! `(X, Y, Z, T)` with `x = X/Z`, `y = Y/Z` and `T = X·Y/Z`. The neutral
//! element is `(0, 1, 1, 0)`. Addition uses the unified `add-2008-hwcd`
//! formula, which also covers doubling.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::model::Fp;

#[derive(Clone, Debug)]
pub(crate) struct Extended {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
    pub t: BigUint,
}

impl Extended {
    pub fn identity() -> Self {
        Self {
            x: BigUint::zero(),
            y: BigUint::one(),
            z: BigUint::one(),
            t: BigUint::zero(),
        }
    }

    pub fn from_affine(x: BigUint, y: BigUint, f: Fp<'_>) -> Self {
        let t = f.mul(&x, &y);
        Self {
            x,
            y,
            z: BigUint::one(),
            t,
        }
    }

    /// `x = 0` and `y = 1`.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    pub fn to_affine(&self, f: Fp<'_>) -> Option<(BigUint, BigUint)> {
        if self.z.is_one() {
            return Some((self.x.clone(), self.y.clone()));
        }

        let zinv = f.inv(&self.z).ok()?;
        Some((f.mul(&self.x, &zinv), f.mul(&self.y, &zinv)))
    }

    pub fn neg(&self, f: Fp<'_>) -> Self {
        Self {
            x: f.neg(&self.x),
            y: self.y.clone(),
            z: self.z.clone(),
            t: f.neg(&self.t),
        }
    }

    pub fn add(&self, other: &Self, f: Fp<'_>, a: &BigUint, d: &BigUint) -> Self {
        let aa = f.mul(&self.x, &other.x);
        let bb = f.mul(&self.y, &other.y);
        let cc = f.mul(&f.mul(&self.t, d), &other.t);
        let dd = f.mul(&self.z, &other.z);

        let e = f.sub(
            &f.sub(
                &f.mul(&f.add(&self.x, &self.y), &f.add(&other.x, &other.y)),
                &aa,
            ),
            &bb,
        );
        let ff = f.sub(&dd, &cc);
        let g = f.add(&dd, &cc);
        let h = f.sub(&bb, &f.mul(a, &aa));

        Self {
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h),
        }
    }

    #[inline]
    pub fn double(&self, f: Fp<'_>, a: &BigUint, d: &BigUint) -> Self {
        self.add(self, f, a, d)
    }

    /// `X1·Z2 = X2·Z1` and `Y1·Z2 = Y2·Z1`.
    pub fn eq(&self, other: &Self, f: Fp<'_>) -> bool {
        f.mul(&self.x, &other.z) == f.mul(&other.x, &self.z)
            && f.mul(&self.y, &other.z) == f.mul(&other.y, &self.z)
    }
}
