//! Private scalars.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::curves::Curve;
use crate::ec::Point;
use crate::primitives::conv::{bit_length, byte_length, from_bytes_be, to_bytes_be_padded};
use crate::signatures::SignatureError;

/// A private scalar in `[1, n-1]` for some curve order `n`.
///
/// Stored as fixed-width big-endian bytes that are wiped on drop. The
/// scalar does not remember its curve; operations take the curve again
/// and check the range against its order.
///
/// Arithmetic runs on `BigUint` copies. The copies this crate holds are
/// wiped, but temporaries inside `num-bigint` operations are not.
#[derive(Clone)]
pub struct SecretScalar {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretScalar {
    /// Wraps an integer, checking `1 <= k < n`.
    pub fn new(curve: &Curve, k: &BigUint) -> Result<Self, SignatureError> {
        check_range(curve.order(), k)?;

        Ok(Self {
            bytes: Zeroizing::new(to_bytes_be_padded(k, curve.baselen())),
        })
    }

    /// Parses a big-endian scalar of exactly `baselen` bytes.
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != curve.baselen() {
            return Err(SignatureError::InvalidLength {
                expected: curve.baselen(),
                found: bytes.len(),
            });
        }

        Self::new(curve, &from_bytes_be(bytes))
    }

    /// Draws a uniform scalar in `[1, n-1]`.
    pub fn generate(curve: &Curve, rng: &mut dyn CryptoRngCore) -> Self {
        let k = Zeroizing::new(random_scalar(curve.order(), rng));

        Self {
            bytes: Zeroizing::new(to_bytes_be_padded(&k, curve.baselen())),
        }
    }

    /// Big-endian encoding, `baselen` bytes.
    #[inline]
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.bytes.clone()
    }

    pub(crate) fn value(&self) -> Zeroizing<BigUint> {
        Zeroizing::new(from_bytes_be(&self.bytes))
    }

    /// The public point `k·G`.
    pub fn public_point(&self, curve: &Curve) -> Point {
        curve.generator_table().mul_secret(&self.value(), None)
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(..)")
    }
}

pub(crate) fn check_range(order: &BigUint, k: &BigUint) -> Result<(), SignatureError> {
    if k.is_zero() || k >= order {
        return Err(SignatureError::InvalidSecret);
    }
    Ok(())
}

/// Uniform integer in `[1, n-1]` by rejection sampling.
pub(crate) fn random_scalar(order: &BigUint, rng: &mut dyn CryptoRngCore) -> BigUint {
    let bits = bit_length(order);
    let mut buf = Zeroizing::new(vec![0u8; byte_length(order)]);

    // top byte keeps only the bits that the order uses
    let excess = buf.len() * 8 - bits;
    let mask = 0xffu8 >> excess;

    loop {
        rng.fill_bytes(&mut buf);
        buf[0] &= mask;

        let k = from_bytes_be(&buf);
        if !k.is_zero() && &k < order {
            return k;
        }
    }
}

#[cfg(test)]
mod tests {
    use zeroize::Zeroize;

    use super::*;
    use crate::curves::CurveId;

    #[test]
    fn value_copy_can_be_wiped() {
        let curve = CurveId::Nist256p.curve();
        let secret = SecretScalar::new(curve, &BigUint::from(5u8)).unwrap();

        let mut value = secret.value();
        assert_eq!(*value, BigUint::from(5u8));

        value.zeroize();
        assert!(value.is_zero());
        assert_eq!(*secret.value(), BigUint::from(5u8));
    }
}
