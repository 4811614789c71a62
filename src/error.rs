//! Crate-level error type.
//!
//! Each component reports its own error enum; [`Error`] wraps them for
//! operations that cross component boundaries.

use thiserror::Error;

use crate::curves::UnknownCurveError;
use crate::der::DerError;
use crate::ec::MalformedPointError;
use crate::primitives::NumberTheoryError;
use crate::signatures::SignatureError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    NumberTheory(#[from] NumberTheoryError),

    #[error(transparent)]
    Der(#[from] DerError),

    #[error(transparent)]
    MalformedPoint(#[from] MalformedPointError),

    #[error(transparent)]
    UnknownCurve(#[from] UnknownCurveError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
