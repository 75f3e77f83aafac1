//! The closed set of aggregate function identifiers.
//!
//! `spec.md` §6.1 fixes the numeric encoding (`FST=1 .. MED=13`) as part of
//! the stable interface; `#[repr(u8)]` preserves that encoding exactly, so a
//! `transmute` or wire value produced against the spec's table round-trips
//! through [`AggFnc::try_from`].

use crate::error::AggError;

/// Which aggregate a given [`crate::state::AggState`] computes.
///
/// The set is closed and small (`spec.md` §9: "Variant dispatch without
/// inheritance"); every consumer of this enum dispatches on it with an
/// exhaustive `match`, never an open trait object.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggFnc {
    /// First observed value.
    Fst = 1,
    /// Last observed value.
    Lst = 2,
    /// Number of observed values.
    Cnt = 3,
    /// Running sum.
    Sum = 4,
    /// Running minimum.
    Min = 5,
    /// Running maximum.
    Max = 6,
    /// Arithmetic mean.
    Avg = 7,
    /// Sample variance (Bessel-corrected).
    Var = 8,
    /// Sample standard deviation.
    Dev = 9,
    /// Skewness.
    Skw = 10,
    /// Excess kurtosis.
    Krt = 11,
    /// p-quantile, P² estimator.
    Qnt = 12,
    /// Median — quantile fixed at p = 0.5.
    Med = 13,
}

impl AggFnc {
    /// True for the central-moment family sharing the Welford/Terriberry
    /// engine (`spec.md` §4.4).
    pub(crate) fn is_moment(self) -> bool {
        matches!(
            self,
            AggFnc::Avg | AggFnc::Var | AggFnc::Dev | AggFnc::Skw | AggFnc::Krt
        )
    }

    /// True for the P²-based quantile family (`spec.md` §4.6).
    pub(crate) fn is_quantile(self) -> bool {
        matches!(self, AggFnc::Qnt | AggFnc::Med)
    }
}

impl TryFrom<u8> for AggFnc {
    type Error = AggError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AggFnc::Fst),
            2 => Ok(AggFnc::Lst),
            3 => Ok(AggFnc::Cnt),
            4 => Ok(AggFnc::Sum),
            5 => Ok(AggFnc::Min),
            6 => Ok(AggFnc::Max),
            7 => Ok(AggFnc::Avg),
            8 => Ok(AggFnc::Var),
            9 => Ok(AggFnc::Dev),
            10 => Ok(AggFnc::Skw),
            11 => Ok(AggFnc::Krt),
            12 => Ok(AggFnc::Qnt),
            13 => Ok(AggFnc::Med),
            other => Err(AggError::UnknownFnc(other)),
        }
    }
}

impl From<AggFnc> for u8 {
    fn from(fnc: AggFnc) -> Self {
        fnc as u8
    }
}
