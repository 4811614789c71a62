//! Precomputed multiples of a fixed base point.

use num_bigint::BigUint;

use super::point::{BLINDING_BITS, Coords, Point, blinded_scalar};

/// A point together with the table `[P, 2·P, 4·P, …, 2^(w-1)·P]`.
///
/// Multiplying by the base then costs only additions. The table is wide
/// enough for blinded scalars (`w = bits(order) + BLINDING_BITS`), or for
/// any reduced coordinate-sized scalar when the order is unknown.
///
/// The value is immutable once built and can be shared freely between
/// threads.
#[derive(Clone, Debug)]
pub struct PrecomputedPoint {
    point: Point,
    table: Vec<Coords>,
}

impl PrecomputedPoint {
    pub(crate) fn new(point: &Point) -> Self {
        let model = point.curve();
        let width = match point.order() {
            Some(n) => n.bits() + BLINDING_BITS,
            None => model.p().bits() + 1,
        };

        let mut table = Vec::with_capacity(width as usize);
        let mut current = point.coords().normalize(model);

        for _ in 0..width {
            let next = current.double(model).normalize(model);
            table.push(current);
            current = next;
        }

        Self {
            point: point.clone(),
            table,
        }
    }

    /// The base point.
    #[inline]
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// `k·P`, variable time.
    ///
    /// Falls back to double-and-add if the scalar is wider than the table.
    pub fn mul(&self, k: &BigUint) -> Point {
        let k = match self.point.order() {
            Some(n) => k % n,
            None => k.clone(),
        };

        if k.bits() > self.table.len() as u64 {
            return self.point.mul(&k);
        }

        let model = self.point.curve();
        let mut acc = Coords::identity(model);

        for (i, entry) in self.table.iter().enumerate() {
            if k.bit(i as u64) {
                acc = acc.add(entry, model);
            }
        }

        Point::from_coords(model.clone(), acc, self.point.order().cloned())
    }

    /// `k·P` for a secret `k`, with optional blinding.
    ///
    /// Every table entry is added exactly once, either to the result or to
    /// a discarded accumulator, so the number of group operations does not
    /// depend on the scalar. Semantics of `blinding` match
    /// [`Point::mul_secret`].
    pub fn mul_secret(&self, k: &BigUint, blinding: Option<&BigUint>) -> Point {
        let (scalar, bits) = blinded_scalar(k, self.point.order(), blinding);

        if bits > self.table.len() as u64 {
            return self.point.mul_secret(k, blinding);
        }

        let model = self.point.curve();
        let mut acc = Coords::identity(model);
        let mut dummy = Coords::identity(model);

        for (i, entry) in self.table.iter().take(bits as usize).enumerate() {
            if scalar.bit(i as u64) {
                acc = acc.add(entry, model);
            } else {
                dummy = dummy.add(entry, model);
            }
        }

        Point::from_coords(model.clone(), acc, self.point.order().cloned())
    }
}
