//! Elliptic-curve arithmetic and signatures for Nebula
//!
//! This crate implements elliptic-curve cryptography from the integer
//! level up: modular arithmetic, point arithmetic on short-Weierstrass and
//! twisted Edwards curves, ECDSA and EdDSA, and the subset of ASN.1 DER
//! needed to exchange curve parameters and signatures with other software.
//!
//! The focus is on **clarity, predictability, and auditability**. Every
//! check an external input goes through is explicit, and every failure is
//! reported as a typed error rather than a boolean.
//!
//! # Module overview
//!
//! - `primitives`
//!   Arbitrary-precision number theory: modular inverse, modular square
//!   root, Jacobi symbol, primality testing, and integer/byte conversions.
//!
//! - `der`
//!   Minimal DER codec (INTEGER, OCTET STRING, BIT STRING, SEQUENCE,
//!   OBJECT IDENTIFIER, context-specific tags) and PEM armour.
//!
//! - `ec`
//!   Curve models and the group law.
//!
//!   Weierstrass points are kept in Jacobian coordinates and Edwards
//!   points in extended coordinates, so that no inversion happens until a
//!   point is converted back to affine form. Scalar multiplication comes
//!   in a variable-time flavour for public scalars (including Shamir's
//!   trick for `u1·G + u2·Q`) and a fixed-sequence flavour with optional
//!   blinding for secret scalars. Point decoding always checks the curve
//!   equation and, unless explicitly waived, the subgroup order.
//!
//! - `curves`
//!   The registry of named curves (NIST, SEC, Brainpool, Ed25519, Ed448)
//!   and `ECParameters` (de)serialization in named and explicit form.
//!
//! - `signatures`
//!   ECDSA with RFC 6979 deterministic or random nonces, and pure EdDSA
//!   as in RFC 8032. Hash functions are supplied by the caller.
//!
//! - `error`
//!   The crate-level [`Error`] aggregating the per-module error types.
//!
//! # Side channels
//!
//! Secret scalars go through a Montgomery ladder or an add-always table
//! walk whose sequence of group operations depends only on the curve, and
//! ECDSA nonces are blinded with a random multiple of the order. The
//! underlying big-integer arithmetic is **not** constant time; this crate
//! is not hardened against an attacker with fine-grained timing access.
//!
//! # Logging
//!
//! Diagnostic events are emitted through `tracing` at `debug` and `trace`
//! level. No subscriber is installed and no secret value is ever logged.

pub mod curves;
pub mod der;
pub mod ec;
pub mod error;
pub mod primitives;
pub mod signatures;

pub use error::{Error, Result};
