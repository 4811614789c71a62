//! Pure EdDSA (RFC 8032) on the twisted Edwards curves of the registry.
//!
//! Keys and signatures are fixed-width byte strings. The private key is
//! a `baselen`-byte seed that is expanded with the instance hash into a
//! clamped scalar and a nonce prefix; signing is deterministic.
//!
//! | curve   | hash                | seed | public key | signature |
//! |---------|---------------------|------|------------|-----------|
//! | Ed25519 | SHA-512             | 32   | 32         | 64        |
//! | Ed448   | SHAKE256, 114 bytes | 57   | 57         | 114       |
//!
//! Verification multiplies both sides by the cofactor, so small-order
//! components in `R` or `A` do not change the outcome.

pub mod hash;
pub mod keys;

pub use hash::{DigestHash, EdDsaHash, Sha512Hash, Shake256Hash};
pub use keys::{PrivateKey, PublicKey};
