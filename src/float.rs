//! Numeric capability abstraction.
//!
//! `spec.md` selects the floating-point width at build time through a C
//! preprocessor macro (`AGGSTAT_FLT_BIT`); Rust has no preprocessor, so the
//! equivalent here is a type parameter bounded by [`AggFloat`]. The trait
//! exposes exactly the operations the aggregate state needs: `sqrt`, `powf`,
//! `abs`, `min`, `max`, `copysign`, `modf` (as `trunc`/`fract`), and the
//! handful of typed literals the moment/quantile engines reuse often enough
//! to want named constants for.
//!
//! 80- and 128-bit widths are optional extensions in the original C (and
//! require non-standard compiler support there too); this crate implements
//! the trait for `f32` and `f64` only. A downstream crate could add a wider
//! impl without modifying this one.

use num_traits::Float;

/// The numeric capability set required by the aggregate engines.
pub trait AggFloat: Float + Copy + std::fmt::Debug + Send + Sync + 'static {
    /// The additive identity.
    const ZERO: Self;
    /// One half.
    const HALF: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// 1.5, used by the skewness finalizer's `M2.powf(1.5)`.
    const ONE_POINT_FIVE: Self;
    const TWO: Self;
    const THREE: Self;
    const FOUR: Self;
    const FIVE: Self;
    const SIX: Self;

    /// Largest finite value, used to seed the MIN/MAX extremum slot.
    const FLOAT_MAX: Self;

    /// Split into integral and fractional parts, matching C's `modf`:
    /// returns `(integral, fractional)` with both sharing the sign of `self`.
    fn modf(self) -> (Self, Self) {
        let integral = self.trunc();
        (integral, self - integral)
    }

    /// Returns a value with the magnitude of `self` and the sign of `sign`,
    /// matching C's `copysign`.
    fn agg_copysign(self, sign: Self) -> Self {
        if sign.is_sign_negative() {
            -self.abs()
        } else {
            self.abs()
        }
    }

    /// Total ordering over all representable values, including NaN.
    ///
    /// The P² marker sort (`spec.md` §4.6) must never trap on a NaN sample
    /// the way `partial_cmp().unwrap()` would; the original C's `qnt_cmp`
    /// (`(x>y)-(x<y)`) degrades to an unspecified but non-crashing order
    /// instead, which `f32`/`f64`'s inherent `total_cmp` reproduces exactly.
    fn agg_total_cmp(&self, other: &Self) -> std::cmp::Ordering;
}

impl AggFloat for f32 {
    const ZERO: Self = 0.0;
    const HALF: Self = 0.5;
    const ONE: Self = 1.0;
    const ONE_POINT_FIVE: Self = 1.5;
    const TWO: Self = 2.0;
    const THREE: Self = 3.0;
    const FOUR: Self = 4.0;
    const FIVE: Self = 5.0;
    const SIX: Self = 6.0;
    const FLOAT_MAX: Self = f32::MAX;

    fn agg_total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        f32::total_cmp(self, other)
    }
}

impl AggFloat for f64 {
    const ZERO: Self = 0.0;
    const HALF: Self = 0.5;
    const ONE: Self = 1.0;
    const ONE_POINT_FIVE: Self = 1.5;
    const TWO: Self = 2.0;
    const THREE: Self = 3.0;
    const FOUR: Self = 4.0;
    const FIVE: Self = 5.0;
    const SIX: Self = 6.0;
    const FLOAT_MAX: Self = f64::MAX;

    fn agg_total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        f64::total_cmp(self, other)
    }
}
