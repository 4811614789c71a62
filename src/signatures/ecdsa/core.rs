//! ECDSA signing and verification over message digests.

use std::fmt;

use digest::Digest;
use digest::core_api::BlockSizeUser;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::keys::{SecretScalar, check_range, random_scalar};
use super::rfc6979::{HmacDigest, Rfc6979, Rfc6979Hmac};
use super::signature::Signature;
use crate::curves::Curve;
use crate::ec::{MalformedPointError, Point};
use crate::error::Result;
use crate::primitives::conv::{bit_length, bits_to_int, to_bytes_be_padded};
use crate::primitives::inverse_mod;
use crate::signatures::SignatureError;

/// Upper bound on nonce candidates tried for one signature.
///
/// A candidate is rejected only when `r = 0` or `s = 0`, which happens
/// with probability about `2/n`.
const MAX_NONCE_ATTEMPTS: usize = 64;

/// Additional data separating the deterministic blinding stream from the
/// nonce stream.
const BLINDING_DOMAIN: &[u8] = b"ecdsa scalar blinding";

/// Source of the per-signature nonce `k`.
pub enum NonceMode<'a> {
    /// RFC 6979 derivation with the given HMAC.
    Deterministic(Box<dyn Rfc6979Hmac>),
    /// Uniform draw from a cryptographically secure generator.
    Random(&'a mut dyn CryptoRngCore),
}

impl NonceMode<'static> {
    /// RFC 6979 with HMAC over the digest `D`.
    pub fn deterministic<D>() -> Self
    where
        D: Digest + BlockSizeUser + Clone + 'static,
    {
        NonceMode::Deterministic(Box::new(HmacDigest::<D>::new()))
    }
}

impl<'a> NonceMode<'a> {
    pub fn random(rng: &'a mut dyn CryptoRngCore) -> Self {
        NonceMode::Random(rng)
    }
}

impl fmt::Debug for NonceMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonceMode::Deterministic(_) => f.write_str("Deterministic"),
            NonceMode::Random(_) => f.write_str("Random"),
        }
    }
}

/// Signing options.
#[derive(Clone, Debug)]
pub struct SignOptions {
    /// Normalise `s` to `s <= n/2`.
    pub low_s: bool,
    /// Blind the nonce multiplication with a random multiple of the order.
    pub blinding: bool,
    /// RFC 6979 §3.6 additional data. Ignored for random nonces.
    pub extra_entropy: Option<Vec<u8>>,
    /// Accept digests longer than the order, keeping their leftmost bits.
    /// When `false`, digests longer than `baselen` are rejected.
    pub allow_truncate: bool,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            low_s: false,
            blinding: true,
            extra_entropy: None,
            allow_truncate: true,
        }
    }
}

/// Per-signature nonce stream, paired with an optional blinding factor.
enum NonceSource<'h, 'r> {
    Deterministic {
        stream: Rfc6979<'h>,
        blinding: Option<Rfc6979<'h>>,
    },
    Random {
        rng: &'r mut dyn CryptoRngCore,
        blinding: bool,
    },
}

/// A nonce `k` and its optional blinding multiplier, wiped on drop.
type Nonce = (Zeroizing<BigUint>, Option<Zeroizing<BigUint>>);

impl NonceSource<'_, '_> {
    fn next(&mut self, order: &BigUint) -> Nonce {
        match self {
            NonceSource::Deterministic { stream, blinding } => {
                let k = Zeroizing::new(stream.next_k());
                let m = blinding.as_mut().map(|b| Zeroizing::new(b.next_k()));
                (k, m)
            }
            NonceSource::Random { rng, blinding } => {
                let k = Zeroizing::new(random_scalar(order, &mut **rng));
                let m = blinding.then(|| Zeroizing::new(BigUint::from(rng.next_u64())));
                (k, m)
            }
        }
    }
}

fn require_weierstrass(curve: &Curve) -> Result<(), SignatureError> {
    if curve.is_edwards() {
        return Err(SignatureError::UnsupportedCurve(
            "ECDSA requires a short-Weierstrass curve",
        ));
    }
    Ok(())
}

/// `bits2int(digest)` over the bit length of `n`.
fn digest_to_int(
    curve: &Curve,
    digest: &[u8],
    allow_truncate: bool,
) -> Result<BigUint, SignatureError> {
    if !allow_truncate && digest.len() > curve.baselen() {
        return Err(SignatureError::DigestTooLong {
            max: curve.baselen(),
            found: digest.len(),
        });
    }

    Ok(bits_to_int(digest, bit_length(curve.order())))
}

/// Signs a message digest.
///
/// ```text
/// e = bits2int(digest)
/// repeat:
///     k  = next nonce
///     r  = (k·G).x mod n
///     s  = k⁻¹·(e + r·d) mod n
/// until r ≠ 0 and s ≠ 0
/// ```
///
/// With [`NonceMode::Deterministic`] the result depends only on the key,
/// the digest and `options`.
///
/// # Errors
/// - [`SignatureError::UnsupportedCurve`] on Edwards curves
/// - [`SignatureError::InvalidSecret`] if the scalar is not below the order
/// - [`SignatureError::DigestTooLong`] if truncation is disabled and the
///   digest exceeds `baselen`
pub fn sign_digest(
    curve: &Curve,
    secret: &SecretScalar,
    digest: &[u8],
    nonce: NonceMode<'_>,
    options: &SignOptions,
) -> Result<Signature> {
    require_weierstrass(curve)?;

    let n = curve.order();
    let d = secret.value();
    check_range(n, &d)?;

    let e = digest_to_int(curve, digest, options.allow_truncate)?;
    let extra = options.extra_entropy.as_deref().unwrap_or_default();

    let hmac: Box<dyn Rfc6979Hmac>;
    let mut source = match nonce {
        NonceMode::Deterministic(h) => {
            hmac = h;
            NonceSource::Deterministic {
                stream: Rfc6979::new(&*hmac, n, &d, digest, extra),
                blinding: options
                    .blinding
                    .then(|| Rfc6979::new(&*hmac, n, &d, digest, BLINDING_DOMAIN)),
            }
        }
        NonceMode::Random(rng) => NonceSource::Random {
            rng,
            blinding: options.blinding,
        },
    };

    let table = curve.generator_table();

    for attempt in 0..MAX_NONCE_ATTEMPTS {
        let (k, blind) = source.next(n);

        let r = match table.mul_secret(&k, blind.as_deref()).x() {
            Some(x) => x % n,
            None => BigUint::zero(),
        };
        if r.is_zero() {
            tracing::trace!(attempt, "nonce produced r = 0, drawing another");
            continue;
        }

        let k_inv = Zeroizing::new(inverse_mod(&k, n)?);
        let s = (&*k_inv * ((&e + &r * &*d) % n)) % n;
        if s.is_zero() {
            tracing::trace!(attempt, "nonce produced s = 0, drawing another");
            continue;
        }

        let signature = Signature::new(r, s);
        return Ok(if options.low_s {
            signature.normalize_s(n)
        } else {
            signature
        });
    }

    Err(SignatureError::RetriesExhausted.into())
}

/// Verifies a signature over a message digest.
///
/// ```text
/// w  = s⁻¹ mod n
/// u1 = e·w mod n,  u2 = r·w mod n
/// R  = u1·G + u2·Q
/// accept iff R ≠ ∞ and R.x mod n = r
/// ```
///
/// Digests longer than the order are truncated.
///
/// # Errors
/// - [`SignatureError::OutOfRange`] unless `1 <= r, s < n`
/// - [`SignatureError::CurveMismatch`] if `public` lies on another curve
/// - [`MalformedPointError::Infinity`] if `public` is the point at infinity
/// - [`SignatureError::BadSignature`] if the equation does not hold
pub fn verify_digest(
    curve: &Curve,
    public: &Point,
    digest: &[u8],
    signature: &Signature,
) -> Result<()> {
    require_weierstrass(curve)?;

    if **public.curve() != **curve.model() {
        return Err(SignatureError::CurveMismatch.into());
    }
    if public.is_infinity() {
        return Err(MalformedPointError::Infinity.into());
    }

    let n = curve.order();
    let (r, s) = (signature.r(), signature.s());

    if r.is_zero() || s.is_zero() || r >= n || s >= n {
        return Err(SignatureError::OutOfRange.into());
    }

    let e = digest_to_int(curve, digest, true)?;

    let w = inverse_mod(s, n)?;
    let u1 = (&e * &w) % n;
    let u2 = (r * &w) % n;

    let point = curve.generator().mul_add(&u1, public, &u2);
    let Some(x) = point.x() else {
        tracing::debug!(curve = curve.name(), "ECDSA verification reached infinity");
        return Err(SignatureError::BadSignature.into());
    };

    let len = curve.baselen();
    let v = to_bytes_be_padded(&(x % n), len);
    let r = to_bytes_be_padded(r, len);

    if bool::from(v.as_slice().ct_eq(r.as_slice())) {
        Ok(())
    } else {
        tracing::debug!(curve = curve.name(), "ECDSA verification failed");
        Err(SignatureError::BadSignature.into())
    }
}
