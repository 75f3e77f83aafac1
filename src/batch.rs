//! The off-line (batch) aggregate engine (`spec.md` §4.2).
//!
//! Each function recomputes its result from a complete slice rather than
//! folding samples one at a time. `Qnt`/`Med` need the slice sorted; the two
//! entry points differ only in whether they are allowed to do that sort in
//! place ([`run`]) or must leave the caller's slice untouched ([`run_copy`],
//! which clones into a scratch `Vec` first — the one heap allocation in this
//! crate, confined to the batch path per `spec.md` §5).

use crate::float::AggFloat;
use crate::fnc::AggFnc;
use num_traits::ToPrimitive;

/// Computes `fnc` over `arr`, sorting it in place if `fnc` needs order
/// statistics. `par` is the quantile parameter (ignored by every function
/// except `Qnt`; `Med` always behaves as `par = 0.5`).
pub fn run<T: AggFloat>(arr: &mut [T], fnc: AggFnc, par: T) -> (T, bool) {
    match fnc {
        AggFnc::Fst => first(arr),
        AggFnc::Lst => last(arr),
        AggFnc::Cnt => count(arr),
        AggFnc::Sum => sum(arr),
        AggFnc::Min => min(arr),
        AggFnc::Max => max(arr),
        AggFnc::Avg => avg(arr),
        AggFnc::Var => var(arr),
        AggFnc::Dev => dev(arr),
        AggFnc::Skw => skw(arr),
        AggFnc::Krt => krt(arr),
        AggFnc::Qnt => quantile(arr, par),
        AggFnc::Med => quantile(arr, T::HALF),
    }
}

/// Equivalent to [`run`] but never mutates `arr` — order statistics are
/// computed against an internal copy instead.
pub fn run_copy<T: AggFloat>(arr: &[T], fnc: AggFnc, par: T) -> (T, bool) {
    let mut scratch = arr.to_vec();
    run(&mut scratch, fnc, par)
}

fn first<T: AggFloat>(arr: &[T]) -> (T, bool) {
    match arr.first() {
        Some(&v) => (v, true),
        None => (T::ZERO, false),
    }
}

fn last<T: AggFloat>(arr: &[T]) -> (T, bool) {
    match arr.last() {
        Some(&v) => (v, true),
        None => (T::ZERO, false),
    }
}

fn count<T: AggFloat>(arr: &[T]) -> (T, bool) {
    (T::from(arr.len()).unwrap_or(T::ZERO), true)
}

fn sum<T: AggFloat>(arr: &[T]) -> (T, bool) {
    if arr.is_empty() {
        return (T::ZERO, false);
    }
    (arr.iter().fold(T::ZERO, |acc, &x| acc + x), true)
}

fn min<T: AggFloat>(arr: &[T]) -> (T, bool) {
    match arr.iter().copied().fold(None, |acc: Option<T>, x| match acc {
        Some(m) => Some(m.min(x)),
        None => Some(x),
    }) {
        Some(m) => (m, true),
        None => (T::ZERO, false),
    }
}

fn max<T: AggFloat>(arr: &[T]) -> (T, bool) {
    match arr.iter().copied().fold(None, |acc: Option<T>, x| match acc {
        Some(m) => Some(m.max(x)),
        None => Some(x),
    }) {
        Some(m) => (m, true),
        None => (T::ZERO, false),
    }
}

fn avg<T: AggFloat>(arr: &[T]) -> (T, bool) {
    if arr.is_empty() {
        return (T::ZERO, false);
    }
    let n = T::from(arr.len()).unwrap_or(T::ZERO);
    let (sum, _) = sum(arr);
    (sum / n, true)
}

/// Two-pass sample variance (Bessel-corrected), matching `run_var`'s
/// mean-then-sum-of-squared-deviations approach rather than the on-line
/// engine's single-pass recurrence — simpler and just as accurate when the
/// whole array is already in hand.
fn var<T: AggFloat>(arr: &[T]) -> (T, bool) {
    if arr.len() < 2 {
        return (T::ZERO, false);
    }
    let n = T::from(arr.len()).unwrap_or(T::ZERO);
    let (mean, _) = avg(arr);
    let ss = arr
        .iter()
        .fold(T::ZERO, |acc, &x| acc + (x - mean) * (x - mean));
    (ss / (n - T::ONE), true)
}

fn dev<T: AggFloat>(arr: &[T]) -> (T, bool) {
    let (variance, valid) = var(arr);
    (variance.sqrt(), valid)
}

fn skw<T: AggFloat>(arr: &[T]) -> (T, bool) {
    if arr.len() < 2 {
        return (T::ZERO, false);
    }
    let n = T::from(arr.len()).unwrap_or(T::ZERO);
    let (mean, _) = avg(arr);
    let m2 = arr
        .iter()
        .fold(T::ZERO, |acc, &x| acc + (x - mean) * (x - mean))
        / n;
    let m3 = arr
        .iter()
        .fold(T::ZERO, |acc, &x| acc + (x - mean) * (x - mean) * (x - mean))
        / n;
    (m3 / m2.powf(T::ONE_POINT_FIVE), true)
}

fn krt<T: AggFloat>(arr: &[T]) -> (T, bool) {
    if arr.len() < 2 {
        return (T::ZERO, false);
    }
    let n = T::from(arr.len()).unwrap_or(T::ZERO);
    let (mean, _) = avg(arr);
    let m2 = arr
        .iter()
        .fold(T::ZERO, |acc, &x| acc + (x - mean) * (x - mean))
        / n;
    let m4 = arr.iter().fold(T::ZERO, |acc, &x| {
        let d = x - mean;
        acc + d * d * d * d
    }) / n;
    (m4 / (m2 * m2) - T::THREE, true)
}

/// Order-`par` quantile by linear interpolation between order statistics.
///
/// `spec.md`'s Open Question on the parameter check is resolved here: the
/// literal C validation (`0.0 > par && par > 1.0`) can never be true and so
/// never rejects anything; this sorts that out to the evidently intended
/// `par < 0.0 || par > 1.0`.
fn quantile<T: AggFloat>(arr: &mut [T], par: T) -> (T, bool) {
    if arr.is_empty() || par < T::ZERO || par > T::ONE {
        return (T::ZERO, false);
    }
    arr.sort_by(T::agg_total_cmp);
    if arr.len() == 1 {
        return (arr[0], true);
    }

    let n = T::from(arr.len() - 1).unwrap_or(T::ZERO);
    let scaled = n * par;
    let (integral, fractional) = scaled.modf();
    let lo = integral.to_usize().unwrap_or(0).min(arr.len() - 1);
    let hi = (lo + 1).min(arr.len() - 1);
    let value = arr[lo] + fractional * (arr[hi] - arr[lo]);
    (value, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_array_is_invalid_for_every_function() {
        let mut empty: [f64; 0] = [];
        for fnc in [
            AggFnc::Fst,
            AggFnc::Lst,
            AggFnc::Sum,
            AggFnc::Min,
            AggFnc::Max,
            AggFnc::Avg,
            AggFnc::Var,
            AggFnc::Dev,
            AggFnc::Skw,
            AggFnc::Krt,
            AggFnc::Qnt,
            AggFnc::Med,
        ] {
            assert_eq!(run(&mut empty, fnc, 0.5).1, false, "{fnc:?}");
        }
        assert_eq!(run(&mut empty, AggFnc::Cnt, 0.0), (0.0, true));
    }

    #[test]
    fn fst_lst_min_max_sum_cnt() {
        let mut data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        assert_eq!(run(&mut data.clone(), AggFnc::Fst, 0.0), (3.0, true));
        assert_eq!(run(&mut data.clone(), AggFnc::Lst, 0.0), (9.0, true));
        assert_eq!(run(&mut data.clone(), AggFnc::Min, 0.0), (1.0, true));
        assert_eq!(run(&mut data.clone(), AggFnc::Max, 0.0), (9.0, true));
        assert_eq!(run(&mut data.clone(), AggFnc::Sum, 0.0), (23.0, true));
        assert_eq!(run(&mut data, AggFnc::Cnt, 0.0), (6.0, true));
    }

    #[test]
    fn avg_and_var_match_textbook_values() {
        let mut data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, _) = run(&mut data.clone(), AggFnc::Avg, 0.0);
        let (variance, _) = run(&mut data, AggFnc::Var, 0.0);
        assert_relative_eq!(mean, 5.0, epsilon = 1e-9);
        assert_relative_eq!(variance, 32.0 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn var_dev_skw_krt_invalid_below_two_samples() {
        for fnc in [AggFnc::Var, AggFnc::Dev, AggFnc::Skw, AggFnc::Krt] {
            let mut data = [1.0];
            assert_eq!(run(&mut data, fnc, 0.0).1, false, "{fnc:?}");
        }
    }

    #[test]
    fn median_of_sorted_odd_length_array() {
        let mut data = [5.0, 3.0, 1.0, 4.0, 2.0];
        assert_eq!(run(&mut data, AggFnc::Med, 0.0), (3.0, true));
    }

    #[test]
    fn median_of_even_length_array_interpolates() {
        let mut data = [1.0, 2.0, 3.0, 4.0];
        let (median, valid) = run(&mut data, AggFnc::Med, 0.0);
        assert!(valid);
        assert_relative_eq!(median, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn quantile_rejects_out_of_range_parameter() {
        let mut data = [1.0, 2.0, 3.0];
        assert_eq!(run(&mut data.clone(), AggFnc::Qnt, -0.1).1, false);
        assert_eq!(run(&mut data, AggFnc::Qnt, 1.1).1, false);
    }

    #[test]
    fn quantile_sort_does_not_panic_on_nan_sample() {
        let mut data = [5.0, 1.0, f64::NAN, 2.0, 3.0];
        let _ = run(&mut data, AggFnc::Qnt, 0.5);
    }

    #[test]
    fn quantile_boundary_parameters_hit_extremes() {
        let mut data = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(run(&mut data.clone(), AggFnc::Qnt, 0.0), (10.0, true));
        assert_eq!(run(&mut data, AggFnc::Qnt, 1.0), (40.0, true));
    }

    #[test]
    fn run_copy_does_not_mutate_the_caller_slice() {
        let data = [5.0, 3.0, 1.0, 4.0, 2.0];
        let original = data;
        let (median, valid) = run_copy(&data, AggFnc::Med, 0.0);
        assert!(valid);
        assert_relative_eq!(median, 3.0, epsilon = 1e-12);
        assert_eq!(data, original);
    }

    #[test]
    fn run_and_run_copy_agree() {
        let data = [7.0, 2.0, 9.0, 4.0, 4.0, 1.0, 8.0];
        let (from_copy, _) = run_copy(&data, AggFnc::Avg, 0.0);
        let (from_run, _) = run(&mut data.clone(), AggFnc::Avg, 0.0);
        assert_relative_eq!(from_copy, from_run, epsilon = 1e-12);
    }
}
