//! Error type for the one checked contract violation at the API boundary.
//!
//! Everything inside the on-line/batch core reports failure through the
//! `(value, valid)` pair `spec.md` §7 mandates, never through `Result` or a
//! panic. The single exception is converting an untyped byte into an
//! [`AggFnc`](crate::fnc::AggFnc) — that conversion can fail, and failing it
//! loudly here is what lets the rest of the crate treat `AggFnc` as always
//! valid.

use thiserror::Error;

/// Contract violations detectable at the crate boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AggError {
    /// A byte outside the `1..=13` range was presented as an aggregate
    /// function identifier.
    #[error("unknown aggregate function identifier: {0}")]
    UnknownFnc(u8),
}
