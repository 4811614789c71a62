//! Hash functions of the pure EdDSA variants.

use std::marker::PhantomData;

use digest::Digest;
use sha2::Sha512;
use sha3::Shake256;
use sha3::digest::{ExtendableOutput, Update, XofReader};

/// Hash capability of an EdDSA instance.
///
/// Both methods must return `2·baselen` bytes for the curve in use.
pub trait EdDsaHash: Send + Sync {
    /// Expands a private seed into the scalar and prefix halves.
    fn expand_seed(&self, seed: &[u8]) -> Vec<u8>;

    /// Hashes the concatenation of `parts`, with any domain separation the
    /// variant requires.
    fn hash(&self, parts: &[&[u8]]) -> Vec<u8>;
}

/// Fixed-output digest without domain separation, as Ed25519 uses.
pub struct DigestHash<D>(PhantomData<fn() -> D>);

impl<D> DigestHash<D> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D> Default for DigestHash<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> EdDsaHash for DigestHash<D> {
    fn expand_seed(&self, seed: &[u8]) -> Vec<u8> {
        D::digest(seed).to_vec()
    }

    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = D::new();
        for part in parts {
            Digest::update(&mut hasher, part);
        }
        hasher.finalize().to_vec()
    }
}

/// SHA-512, the Ed25519 hash.
pub type Sha512Hash = DigestHash<Sha512>;

/// Ed448 domain prefix `dom4(0, "")`.
const DOM4_ED448: &[u8] = b"SigEd448\x00\x00";

/// SHAKE256 with 114 bytes of output, the Ed448 hash.
///
/// Signing and verification hashes carry the `dom4` prefix of pure
/// Ed448; seed expansion does not.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shake256Hash;

impl Shake256Hash {
    pub const OUTPUT_LEN: usize = 114;

    fn squeeze(parts: &[&[u8]]) -> Vec<u8> {
        let mut shake = Shake256::default();
        for part in parts {
            shake.update(part);
        }

        let mut out = vec![0u8; Self::OUTPUT_LEN];
        shake.finalize_xof().read(&mut out);
        out
    }
}

impl EdDsaHash for Shake256Hash {
    fn expand_seed(&self, seed: &[u8]) -> Vec<u8> {
        Self::squeeze(&[seed])
    }

    fn hash(&self, parts: &[&[u8]]) -> Vec<u8> {
        let mut prefixed = Vec::with_capacity(parts.len() + 1);
        prefixed.push(DOM4_ED448);
        prefixed.extend_from_slice(parts);
        Self::squeeze(&prefixed)
    }
}
