//! Crate-wide error type.
//!
//! Module-local errors ([`DerError`], [`KeyError`], [`SinError`],
//! [`CurveError`]) carry the detail; [`Error`] folds them into the three
//! outcomes callers actually act on: the input was bad, the point was bad,
//! or the random source let us down.

use thiserror::Error;

use crate::crypto::curve::CurveError;
use crate::crypto::der::DerError;
use crate::crypto::keys::KeyError;
use crate::identity::sin::SinError;

/// Errors returned by signing, key handling, and identity generation.
///
/// Verification never returns one of these; it answers `false` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad hex, bad DER, wrong-length key, out-of-range scalar.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Public key bytes that do not decode to a curve point.
    #[error("invalid curve point")]
    InvalidPoint,

    /// The random source failed. Never retried with anything weaker.
    #[error("entropy source failure: {0}")]
    EntropyFailure(String),

    /// Every nonce drawn was out of range or produced a zero R or S.
    #[error("no usable nonce after {attempts} attempts")]
    NonceExhausted { attempts: usize },

    /// A caller-supplied nonce was zero, out of range, or degenerate.
    #[error("nonce is not usable for this signature")]
    InvalidNonce,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<DerError> for Error {
    fn from(err: DerError) -> Self {
        Error::MalformedInput(err.to_string())
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidPublicKey => Error::InvalidPoint,
            other => Error::MalformedInput(other.to_string()),
        }
    }
}

impl From<SinError> for Error {
    fn from(err: SinError) -> Self {
        Error::MalformedInput(err.to_string())
    }
}

impl From<CurveError> for Error {
    fn from(_: CurveError) -> Self {
        Error::InvalidPoint
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::MalformedInput(format!("invalid hex: {}", err))
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Self {
        Error::EntropyFailure(err.to_string())
    }
}
