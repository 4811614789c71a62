//! Digital signature algorithms.
//!
//! ## ECDSA
//!
//! The `ecdsa` module signs and verifies message digests on any
//! short-Weierstrass curve of the registry (or an ad-hoc curve decoded
//! from explicit parameters). Nonces are either derived deterministically
//! following RFC 6979, with a caller-chosen HMAC digest, or drawn from a
//! caller-supplied cryptographically secure generator.
//!
//! The engine operates on digests only: hashing the message is the
//! caller's job, and any digest length is accepted (it is truncated to the
//! bit length of the order as in FIPS 186-4, unless truncation is
//! disabled).
//!
//! ## EdDSA
//!
//! The `eddsa` module implements the pure EdDSA variants of RFC 8032 on
//! the twisted Edwards curves of the registry: Ed25519 with SHA-512 and
//! Ed448 with SHAKE256. Signing is fully deterministic; verification uses
//! the cofactored equation.
//!
//! Both schemes report failures as [`SignatureError`] and never collapse a
//! failed verification into a boolean.

pub mod ecdsa;
pub mod eddsa;

use thiserror::Error;

use crate::der::DerError;

/// Signing and verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature is well-formed but does not verify.
    #[error("signature verification failed")]
    BadSignature,

    /// A signature component lies outside `[1, n-1]`.
    #[error("signature component out of range")]
    OutOfRange,

    /// A fixed-width encoding has the wrong length.
    #[error("invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// The DER signature structure is invalid.
    #[error("malformed DER signature: {0}")]
    MalformedEncoding(#[source] DerError),

    /// The digest is longer than the curve allows and truncation is off.
    #[error("digest of {found} bytes exceeds the {max}-byte limit of the curve")]
    DigestTooLong { max: usize, found: usize },

    /// The private scalar is zero or not below the curve order.
    #[error("invalid private key")]
    InvalidSecret,

    /// The curve family does not support the requested scheme.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),

    /// The key lies on a different curve than the one requested.
    #[error("key does not belong to the curve")]
    CurveMismatch,

    /// Every nonce candidate produced `r = 0` or `s = 0`.
    #[error("nonce generation exhausted its attempts")]
    RetriesExhausted,
}
