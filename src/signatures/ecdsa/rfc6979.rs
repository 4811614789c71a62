//! Deterministic nonce generation (RFC 6979 §3.2).
//!
//! The generator is an HMAC-DRBG keyed by the private scalar and the
//! message digest:
//!
//! ```text
//! V = 0x01 0x01 … 0x01          (hlen bytes)
//! K = 0x00 0x00 … 0x00          (hlen bytes)
//! K = HMAC_K(V ‖ 0x00 ‖ int2octets(x) ‖ bits2octets(h) ‖ k')
//! V = HMAC_K(V)
//! K = HMAC_K(V ‖ 0x01 ‖ int2octets(x) ‖ bits2octets(h) ‖ k')
//! V = HMAC_K(V)
//! ```
//!
//! Candidates are then drawn from `V` until one falls in `[1, q-1]`. Each
//! further call to [`Rfc6979::next_k`] yields the next candidate, which is
//! what the signer uses when `r` or `s` turns out to be zero.
//!
//! `k'` is the optional additional data of §3.6; with it empty the output
//! matches the RFC test vectors.

use std::marker::PhantomData;

use digest::Digest;
use digest::core_api::BlockSizeUser;
use hmac::{Mac, SimpleHmac};
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::primitives::conv::{
    bit_length, bits_to_int, bits_to_octets, byte_length, to_bytes_be_padded,
};

/// HMAC capability used by the deterministic nonce generator.
///
/// Implemented by [`HmacDigest`] for any block-based digest; callers only
/// need a custom implementation to plug in an HMAC from elsewhere.
pub trait Rfc6979Hmac: Send + Sync {
    /// Output length of the MAC, in bytes.
    fn output_size(&self) -> usize;

    /// `HMAC(key, parts[0] ‖ parts[1] ‖ …)`.
    fn mac(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8>;
}

/// [`Rfc6979Hmac`] over the digest `D`, e.g. `HmacDigest::<Sha256>::new()`.
pub struct HmacDigest<D>(PhantomData<fn() -> D>);

impl<D> HmacDigest<D> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D> Default for HmacDigest<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Rfc6979Hmac for HmacDigest<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn mac(&self, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
        let mut mac = match <SimpleHmac<D> as Mac>::new_from_slice(key) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC accepts keys of any length"),
        };

        for part in parts {
            mac.update(part);
        }

        mac.finalize().into_bytes().to_vec()
    }
}

/// RFC 6979 candidate stream for one `(x, h)` pair.
pub struct Rfc6979<'h> {
    hmac: &'h dyn Rfc6979Hmac,
    order: BigUint,
    qlen: usize,
    rolen: usize,
    k: Zeroizing<Vec<u8>>,
    v: Zeroizing<Vec<u8>>,
    started: bool,
}

impl<'h> Rfc6979<'h> {
    /// Seeds the generator.
    ///
    /// `secret` is the private scalar, `digest` the message hash (any
    /// length; it goes through `bits2octets`) and `extra_entropy` the
    /// optional `k'`.
    pub fn new(
        hmac: &'h dyn Rfc6979Hmac,
        order: &BigUint,
        secret: &BigUint,
        digest: &[u8],
        extra_entropy: &[u8],
    ) -> Self {
        let hlen = hmac.output_size();
        let qlen = bit_length(order);
        let rolen = byte_length(order);

        let x = Zeroizing::new(to_bytes_be_padded(secret, rolen));
        let h = bits_to_octets(digest, order);

        let mut v = Zeroizing::new(vec![0x01u8; hlen]);
        let mut k = Zeroizing::new(vec![0x00u8; hlen]);

        *k = hmac.mac(
            &k,
            &[v.as_slice(), &[0x00u8][..], x.as_slice(), h.as_slice(), extra_entropy],
        );
        *v = hmac.mac(&k, &[v.as_slice()]);
        *k = hmac.mac(
            &k,
            &[v.as_slice(), &[0x01u8][..], x.as_slice(), h.as_slice(), extra_entropy],
        );
        *v = hmac.mac(&k, &[v.as_slice()]);

        Self {
            hmac,
            order: order.clone(),
            qlen,
            rolen,
            k,
            v,
            started: false,
        }
    }

    /// Next nonce candidate in `[1, q-1]`.
    pub fn next_k(&mut self) -> BigUint {
        if self.started {
            self.reseed();
        }
        self.started = true;

        loop {
            let mut t = Zeroizing::new(Vec::with_capacity(self.rolen));
            while t.len() < self.rolen {
                *self.v = self.hmac.mac(&self.k, &[self.v.as_slice()]);
                t.extend_from_slice(&self.v);
            }

            let candidate = bits_to_int(&t, self.qlen);
            if !candidate.is_zero() && candidate < self.order {
                return candidate;
            }

            self.reseed();
        }
    }

    fn reseed(&mut self) {
        *self.k = self.hmac.mac(&self.k, &[self.v.as_slice(), &[0x00u8][..]]);
        *self.v = self.hmac.mac(&self.k, &[self.v.as_slice()]);
    }
}

/// First RFC 6979 nonce for `(secret, digest)`.
pub fn generate_k(
    hmac: &dyn Rfc6979Hmac,
    order: &BigUint,
    secret: &BigUint,
    digest: &[u8],
    extra_entropy: &[u8],
) -> BigUint {
    Rfc6979::new(hmac, order, secret, digest, extra_entropy).next_k()
}
