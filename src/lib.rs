//! Numerically careful streaming and batch statistical aggregates.
//!
//! Thirteen aggregate functions ([`AggFnc`]), each reachable two ways:
//! on-line, one sample at a time through [`AggState::put`]/[`AggState::get`]
//! in constant memory, or in batch over a complete slice through
//! [`run`]/[`run_copy`]. Both paths are built to agree with each other to
//! within floating-point rounding — see `tests/equivalence.rs`.
//!
//! The on-line moment and quantile engines are ports of the recurrences in
//! Pébay/Terriberry's streaming-moments formulation and the Jain & Chlamtac
//! P² algorithm; both favor a few extra floating-point operations per sample
//! over the catastrophic cancellation a naive two-pass-in-one-pass
//! implementation would accumulate over a long stream.

pub mod batch;
pub mod error;
pub mod float;
pub mod fnc;
pub mod online;
pub mod state;

pub use batch::{run, run_copy};
pub use error::AggError;
pub use float::AggFloat;
pub use fnc::AggFnc;
pub use state::AggState;
