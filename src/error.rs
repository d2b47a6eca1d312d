//! The error surface for the whole crate.
use crate::interval::IntervalVector;
use core::fmt;

/// Every way a `tm-flowpipe` operation can fail.
///
/// This is the only channel through which the core reports failure: no
/// panics, no process exits, no silently-truncated results. The widening
/// loop of the contractive search is part of the algorithm, not error
/// recovery, so its exhaustion is the one variant that carries a payload
/// useful for diagnosing *why* no contractive remainder was found.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A length mismatch, a time horizon that doesn't start at zero or is
    /// negative, or a non-positive step size / negative step epsilon.
    InvalidInput(String),
    /// A truncation order below zero was passed to `truncate`.
    NegativeOrder,
    /// `widen_scale` was not strictly greater than one.
    BadScale,
    /// `max_tries` was zero.
    BadTries,
    /// The contractive search widened the candidate remainder `max_tries`
    /// times without finding a subset relationship.
    ContractivenessFailure {
        /// The last candidate remainder actually tested (already divided
        /// back by `widen_scale` so it matches the last subset test
        /// performed, not the redundant widening applied afterward).
        last_candidate: IntervalVector,
        /// The Picard image computed against `last_candidate`.
        last_image: IntervalVector,
    },
    /// An interval division whose divisor interval contains zero.
    DivisionByZeroContainingInterval,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::NegativeOrder => write!(f, "truncation order must be >= 0"),
            Error::BadScale => write!(f, "widen_scale must be > 1"),
            Error::BadTries => write!(f, "max_tries must be >= 1"),
            Error::ContractivenessFailure {
                last_candidate,
                last_image,
            } => write!(
                f,
                "no contractive remainder found: last candidate I0 = {last_candidate}, \
                 last image I1 = {last_image}; is I1 a subset of I0 in every component?"
            ),
            Error::DivisionByZeroContainingInterval => {
                write!(f, "division by an interval containing zero")
            }
        }
    }
}

impl std::error::Error for Error {}
