//! EdDSA key pairs, signing and verification (RFC 8032 §5.1, §5.2).

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use zeroize::Zeroizing;

use super::hash::EdDsaHash;
use crate::curves::Curve;
use crate::ec::{DecodeOptions, MalformedPointError, Point, PointEncoding, decode_point};
use crate::error::Result;
use crate::primitives::conv::{bit_length, from_bytes_le, to_bytes_le_padded};
use crate::signatures::SignatureError;

fn require_edwards(curve: &Curve) -> Result<(), SignatureError> {
    if !curve.is_edwards() {
        return Err(SignatureError::UnsupportedCurve(
            "EdDSA requires a twisted Edwards curve",
        ));
    }
    Ok(())
}

fn check_length(data: &[u8], expected: usize) -> Result<(), SignatureError> {
    if data.len() != expected {
        return Err(SignatureError::InvalidLength {
            expected,
            found: data.len(),
        });
    }
    Ok(())
}

fn check_hash_output(digest: &[u8], curve: &Curve) -> Result<(), SignatureError> {
    if digest.len() != 2 * curve.baselen() {
        return Err(SignatureError::UnsupportedCurve(
            "hash output length does not match the curve",
        ));
    }
    Ok(())
}

/// Clears the cofactor bits, sets the bit just below the field size and
/// clears everything above it.
fn clamp(buf: &mut [u8], curve: &Curve) -> Result<(), SignatureError> {
    let h = curve.cofactor().cloned().unwrap_or_else(BigUint::one);
    if h.count_ones() != 1 {
        return Err(SignatureError::UnsupportedCurve(
            "EdDSA clamping needs a power-of-two cofactor",
        ));
    }

    let cofactor_bits = h.trailing_zeros().unwrap_or(0);
    buf[0] &= !((1u8 << cofactor_bits) - 1);

    let last = buf.len() - 1;
    let l = bit_length(curve.model().p());
    if l % 8 == 0 {
        buf[last] = 0;
        buf[last - 1] |= 0x80;
    } else {
        let top = (l % 8) as u32;
        buf[last] = (buf[last] & ((1u8 << top) - 1)) | (1u8 << (top - 1));
    }

    Ok(())
}

/// An EdDSA public key: a validated point and its encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<'a> {
    curve: &'a Curve,
    point: Point,
    encoded: Vec<u8>,
}

impl<'a> PublicKey<'a> {
    /// Decodes an encoded public key.
    ///
    /// The point must lie on the curve and in the subgroup of the
    /// generator, and must not be the neutral element.
    pub fn from_bytes(curve: &'a Curve, bytes: &[u8]) -> Result<Self> {
        require_edwards(curve)?;
        check_length(bytes, curve.verifying_key_length())?;

        let point = curve.decode_point(bytes, &DecodeOptions::default())?;
        if point.is_infinity() {
            return Err(MalformedPointError::Infinity.into());
        }

        Ok(Self {
            curve,
            point,
            encoded: bytes.to_vec(),
        })
    }

    fn from_point(curve: &'a Curve, point: Point) -> Self {
        let encoded = point.to_bytes(PointEncoding::Compressed);
        Self {
            curve,
            point,
            encoded,
        }
    }

    #[inline]
    pub fn curve(&self) -> &'a Curve {
        self.curve
    }

    #[inline]
    pub fn point(&self) -> &Point {
        &self.point
    }

    #[inline]
    pub fn to_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Verifies `signature = R ‖ S` over `data`.
    ///
    /// Accepts iff `[h·S]G = [h](R + [k]A)`, `k = H(R ‖ A ‖ data) mod n`.
    ///
    /// # Errors
    /// - [`SignatureError::InvalidLength`] if the signature is not
    ///   `signature_length` bytes
    /// - [`SignatureError::OutOfRange`] if `S >= n`
    /// - [`SignatureError::BadSignature`] if `R` does not decode or the
    ///   equation does not hold
    pub fn verify(&self, data: &[u8], signature: &[u8], hash: &dyn EdDsaHash) -> Result<()> {
        let curve = self.curve;
        let baselen = curve.baselen();
        check_length(signature, curve.signature_length())?;

        let (r_bytes, s_bytes) = signature.split_at(baselen);

        let r = match decode_point(curve.model(), r_bytes, None, &DecodeOptions::default()) {
            Ok(point) => point,
            Err(err) => {
                tracing::debug!(curve = curve.name(), %err, "EdDSA signature carries an invalid R");
                return Err(SignatureError::BadSignature.into());
            }
        };

        let n = curve.order();
        let s = from_bytes_le(s_bytes);
        if &s >= n {
            return Err(SignatureError::OutOfRange.into());
        }

        let digest = hash.hash(&[r_bytes, self.encoded.as_slice(), data]);
        check_hash_output(&digest, curve)?;
        let k = from_bytes_le(&digest) % n;

        let h = curve.cofactor().cloned().unwrap_or_else(BigUint::one);

        let left = curve.generator().mul(&(&h * &s));
        let right = r.add(&self.point.mul(&k)).mul_unreduced(&h);

        if left == right {
            Ok(())
        } else {
            tracing::debug!(curve = curve.name(), "EdDSA verification failed");
            Err(SignatureError::BadSignature.into())
        }
    }
}

/// An EdDSA private key derived from a seed.
pub struct PrivateKey<'a> {
    curve: &'a Curve,
    seed: Zeroizing<Vec<u8>>,
    scalar: Zeroizing<Vec<u8>>,
    prefix: Zeroizing<Vec<u8>>,
    public: PublicKey<'a>,
}

impl<'a> PrivateKey<'a> {
    /// Expands a `baselen`-byte seed.
    ///
    /// ```text
    /// d      = H(seed)
    /// a      = clamp(d[..baselen]) as little-endian integer
    /// prefix = d[baselen..]
    /// A      = [a]G
    /// ```
    pub fn from_seed(curve: &'a Curve, seed: &[u8], hash: &dyn EdDsaHash) -> Result<Self> {
        require_edwards(curve)?;
        check_length(seed, curve.baselen())?;

        let baselen = curve.baselen();
        let mut digest = Zeroizing::new(hash.expand_seed(seed));
        check_hash_output(&digest, curve)?;

        clamp(&mut digest[..baselen], curve)?;
        let scalar = Zeroizing::new(digest[..baselen].to_vec());
        let prefix = Zeroizing::new(digest[baselen..].to_vec());

        let a = from_bytes_le(&scalar);
        let point = curve.generator_table().mul_secret(&a, None);

        Ok(Self {
            curve,
            seed: Zeroizing::new(seed.to_vec()),
            scalar,
            prefix,
            public: PublicKey::from_point(curve, point),
        })
    }

    #[inline]
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    #[inline]
    pub fn public_key(&self) -> &PublicKey<'a> {
        &self.public
    }

    /// Signs `data`, returning `R ‖ S`.
    ///
    /// ```text
    /// r = H(prefix ‖ data) mod n
    /// R = [r]G
    /// k = H(R ‖ A ‖ data) mod n
    /// S = (r + k·a) mod n
    /// ```
    pub fn sign(&self, data: &[u8], hash: &dyn EdDsaHash) -> Result<Vec<u8>> {
        let curve = self.curve;
        let n = curve.order();
        let baselen = curve.baselen();

        let nonce_digest = Zeroizing::new(hash.hash(&[self.prefix.as_slice(), data]));
        check_hash_output(&nonce_digest, curve)?;
        let r = from_bytes_le(&nonce_digest) % n;

        let big_r = curve
            .generator_table()
            .mul_secret(&r, None)
            .to_bytes(PointEncoding::Compressed);

        let digest = hash.hash(&[big_r.as_slice(), self.public.encoded.as_slice(), data]);
        check_hash_output(&digest, curve)?;
        let k = from_bytes_le(&digest) % n;

        let a = from_bytes_le(&self.scalar);
        let s = (r + k * a) % n;

        let mut signature = big_r;
        signature.extend_from_slice(&to_bytes_le_padded(&s, baselen));
        Ok(signature)
    }
}

impl fmt::Debug for PrivateKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &self.curve.name())
            .field("public", &self.public.encoded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveId;

    #[test]
    fn clamp_ed25519() {
        let curve = CurveId::Ed25519.curve();
        let mut buf = vec![0xffu8; 32];
        clamp(&mut buf, curve).unwrap();

        assert_eq!(buf[0], 0xf8);
        assert_eq!(buf[31], 0x7f);
    }

    #[test]
    fn clamp_ed448() {
        let curve = CurveId::Ed448.curve();
        let mut buf = vec![0xffu8; 57];
        clamp(&mut buf, curve).unwrap();

        assert_eq!(buf[0], 0xfc);
        assert_eq!(buf[55], 0xff);
        assert_eq!(buf[56], 0x00);

        let mut buf = vec![0x00u8; 57];
        clamp(&mut buf, curve).unwrap();
        assert_eq!(buf[55], 0x80);
    }

    #[test]
    fn ecdsa_curves_are_rejected() {
        let curve = CurveId::Nist256p.curve();
        let seed = vec![0u8; curve.baselen()];
        let hash = crate::signatures::eddsa::Sha512Hash::new();
        assert!(PrivateKey::from_seed(curve, &seed, &hash).is_err());
    }
}
