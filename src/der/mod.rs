//! Minimal ASN.1 DER codec.
//!
//! This module implements the subset of DER needed to exchange elliptic
//! curve structures with other software: `INTEGER` (non-negative only),
//! `OCTET STRING`, `BIT STRING`, `SEQUENCE`, `OBJECT IDENTIFIER` and
//! context-specific constructed tags, plus PEM armour.
//!
//! It is not a general ASN.1 library. Decoding is strict: every `remove_*`
//! function consumes exactly one well-formed TLV from the front of a buffer
//! and returns the decoded value together with the remaining bytes, and
//! rejects truncated input, wrong tags and any non-minimal encoding.
//!
//! Submodules:
//! - `tlv`: TLV encoders and decoders
//! - `oid`: the [`Oid`] value type
//! - `pem`: PEM wrapping and unwrapping

pub mod oid;
pub mod pem;
pub mod tlv;

pub use oid::Oid;
pub use pem::{from_pem, to_pem};
pub use tlv::*;

use thiserror::Error;

/// Errors raised while decoding DER or PEM input.
///
/// All variants describe structurally invalid input; none of them are
/// recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerError {
    /// The buffer ended before the announced element did.
    #[error("truncated DER input: {0}")]
    Truncated(&'static str),

    /// The element starts with an unexpected tag.
    #[error("unexpected DER tag: expected {expected:#04x}, found {found:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },

    /// A length, integer or OID arc is not encoded in its shortest form.
    #[error("non-minimal DER encoding: {0}")]
    NonMinimal(&'static str),

    /// Bytes remain where the structure should have ended.
    #[error("unexpected data after {0}")]
    TrailingData(&'static str),

    /// Any other structural violation.
    #[error("malformed DER: {0}")]
    Malformed(&'static str),

    /// The PEM armour is missing or carries the wrong label.
    #[error("malformed PEM: {0}")]
    Pem(&'static str),

    /// The PEM body is not valid base64.
    #[error("invalid base64 in PEM body")]
    Base64,
}
