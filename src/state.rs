//! The aggregate state record (`spec.md` §3.1).
//!
//! A single value-typed record holds everything every one of the thirteen
//! aggregate functions needs: the function selector, its parameter, five
//! integer counters and ten floating-point state slots. Meaning of
//! `cnt[1..4]`/`val[0..9]` is function-dependent — see the per-family
//! comments in [`crate::online`] and [`crate::batch`] for exactly which
//! slots mean what.
//!
//! No heap allocation happens anywhere in this type's lifecycle (`spec.md`
//! §5, §9): it is `Copy`-sized state, moved and mutated in place.

use crate::fnc::AggFnc;
use crate::float::AggFloat;

/// On-line aggregate state for one of the thirteen [`AggFnc`] variants.
///
/// Created with [`AggState::new`], fed samples with [`AggState::put`],
/// observed with [`AggState::get`]. `fnc` is immutable for the lifetime of
/// the value; the only way to change which function is computed is to
/// construct a new `AggState`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggState<T: AggFloat> {
    pub(crate) fnc: AggFnc,
    pub(crate) par: T,
    /// `cnt[0]` is the total sample count; `cnt[1..4]` are the P² marker
    /// positions (meaningful only while `fnc` is `Qnt`/`Med`).
    pub(crate) cnt: [u64; 5],
    /// Function-dependent state; see `spec.md` §3.1.
    pub(crate) val: [T; 10],
}

impl<T: AggFloat> AggState<T> {
    /// Initializes state for `fnc` with parameter `par` (`spec.md` §4.1).
    ///
    /// `par` is read only by `Qnt`; for `Med` it is forced to `0.5`
    /// regardless of the value supplied here. `Min`/`Max` seed their
    /// running extremum to `+FLOAT_MAX`/`-FLOAT_MAX` so the first `put`
    /// always wins the comparison.
    pub fn new(fnc: AggFnc, par: T) -> Self {
        let mut state = AggState {
            fnc,
            par,
            cnt: [0; 5],
            val: [T::ZERO; 10],
        };

        match fnc {
            AggFnc::Min => state.val[0] = T::FLOAT_MAX,
            AggFnc::Max => state.val[0] = -T::FLOAT_MAX,
            AggFnc::Med => state.par = T::HALF,
            _ => {}
        }

        state
    }

    /// Reinitializes `self` as if freshly constructed with its own `fnc`
    /// and `par` (`spec.md` §6.2) — equivalent to, but cheaper than,
    /// `*self = AggState::new(self.fnc(), self.par())`.
    pub fn reset(&mut self) {
        *self = AggState::new(self.fnc, self.par);
    }

    /// The aggregate function this state computes.
    pub fn fnc(&self) -> AggFnc {
        self.fnc
    }

    /// The stored parameter (meaningful for `Qnt`/`Med` only).
    pub fn par(&self) -> T {
        self.par
    }

    /// Total number of samples consumed so far.
    pub fn count(&self) -> u64 {
        self.cnt[0]
    }
}
