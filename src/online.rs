//! The on-line (streaming) update engine (`spec.md` §4.3, §4.4, §4.6).
//!
//! Every [`AggState::put`] call dispatches on `fnc` with an exhaustive
//! `match`, then unconditionally advances `cnt[0]` — mirroring
//! `aggstat_put`'s `put_fnc[ag->ag_fnc](); ag->ag_cnt[0]++;` in the C source
//! this crate is grounded on. The one place that post-increment matters is
//! the P² quantile family, which deliberately walks `cnt[0]` back down by one
//! every steady-state sample so the generic increment nets to zero; `cnt[0]`
//! is not a meaningful sample count for `Qnt`/`Med`, only `cnt[4]` is.

use crate::float::AggFloat;
use crate::fnc::AggFnc;
use crate::state::AggState;

impl<T: AggFloat> AggState<T> {
    /// Folds one sample into the running state.
    pub fn put(&mut self, x: T) {
        match self.fnc {
            AggFnc::Fst => {
                if self.cnt[0] == 0 {
                    self.val[0] = x;
                }
            }
            AggFnc::Lst => self.val[0] = x,
            AggFnc::Cnt => {}
            AggFnc::Sum => self.val[0] = self.val[0] + x,
            AggFnc::Min => self.val[0] = self.val[0].min(x),
            AggFnc::Max => self.val[0] = self.val[0].max(x),
            AggFnc::Avg => self.put_avg(x),
            AggFnc::Var | AggFnc::Dev => self.put_var(x),
            AggFnc::Skw => self.put_skw(x),
            AggFnc::Krt => self.put_krt(x),
            AggFnc::Qnt | AggFnc::Med => self.put_qnt(x),
        }
        self.cnt[0] = self.cnt[0].wrapping_add(1);
    }

    /// Reads the current estimate. The `bool` is `false` until enough
    /// samples have been seen for the value to be meaningful (`spec.md`
    /// §4.5) — the caller should not treat the paired value as defined when
    /// it is `false`.
    pub fn get(&self) -> (T, bool) {
        match self.fnc {
            AggFnc::Fst | AggFnc::Lst | AggFnc::Min | AggFnc::Max | AggFnc::Sum | AggFnc::Avg => {
                if self.cnt[0] >= 1 {
                    (self.val[0], true)
                } else {
                    (T::ZERO, false)
                }
            }
            AggFnc::Cnt => (T::from(self.cnt[0]).unwrap_or(T::ZERO), true),
            AggFnc::Var => self.get_var(),
            AggFnc::Dev => {
                let (variance, valid) = self.get_var();
                (variance.sqrt(), valid)
            }
            AggFnc::Skw => self.get_skw(),
            AggFnc::Krt => self.get_krt(),
            AggFnc::Qnt | AggFnc::Med => {
                if self.cnt[4] >= 5 {
                    (self.val[2], true)
                } else {
                    (T::ZERO, false)
                }
            }
        }
    }

    // --- central moments (spec.md §4.4) -----------------------------------
    //
    // `x = sample - M1(old)`, `y = x / (n+1)`, `t = x * y * n` are the shared
    // temporaries every moment update is expressed in terms of. They are
    // computed once from the *old* mean and sample count, before any of
    // `val[0..4]` change, so the order the updates are later applied in is
    // free to run the higher moments before `M2`/`M1` without additional
    // bookkeeping: those updates only ever read moments that have not yet
    // been touched this call.

    fn moment_temps(&self, x: T) -> (T, T) {
        let n = T::from(self.cnt[0]).unwrap_or(T::ZERO);
        let delta = x - self.val[0];
        let y = delta / (n + T::ONE);
        let t = delta * y * n;
        (y, t)
    }

    fn update_m1(&mut self, y: T) {
        self.val[0] = self.val[0] + y;
    }

    fn update_m2(&mut self, t: T) {
        self.val[1] = self.val[1] + t;
    }

    fn update_m3(&mut self, t: T, y: T) {
        let n = T::from(self.cnt[0]).unwrap_or(T::ZERO);
        self.val[2] = self.val[2] + t * y * (n - T::ONE) - T::THREE * y * self.val[1];
    }

    fn update_m4(&mut self, t: T, y: T) {
        let n1 = T::from(self.cnt[0]).unwrap_or(T::ZERO) + T::ONE;
        self.val[3] = self.val[3]
            + t * y * y * (n1 * n1 - T::THREE * n1 + T::THREE)
            + T::SIX * y * y * self.val[1]
            - T::FOUR * y * self.val[2];
    }

    fn put_avg(&mut self, x: T) {
        let (y, _) = self.moment_temps(x);
        self.update_m1(y);
    }

    fn put_var(&mut self, x: T) {
        let (y, t) = self.moment_temps(x);
        self.update_m1(y);
        self.update_m2(t);
    }

    fn put_skw(&mut self, x: T) {
        let (y, t) = self.moment_temps(x);
        self.update_m1(y);
        self.update_m3(t, y);
        self.update_m2(t);
    }

    fn put_krt(&mut self, x: T) {
        let (y, t) = self.moment_temps(x);
        self.update_m1(y);
        self.update_m4(t, y);
        self.update_m3(t, y);
        self.update_m2(t);
    }

    /// Bessel-corrected sample variance. Valid once at least two samples
    /// have been seen.
    fn get_var(&self) -> (T, bool) {
        if self.cnt[0] >= 2 {
            let n = T::from(self.cnt[0]).unwrap_or(T::ZERO);
            (self.val[1] / (n - T::ONE), true)
        } else {
            (T::ZERO, false)
        }
    }

    /// `spec.md`'s Open Question on SKW/KRT validity is resolved in favor of
    /// `n >= 2` for both the on-line and batch paths — the literal C source
    /// accepts `n >= 1` on-line, which divides by a zero second moment.
    fn get_skw(&self) -> (T, bool) {
        if self.cnt[0] >= 2 {
            let n = T::from(self.cnt[0]).unwrap_or(T::ZERO);
            (n.sqrt() * self.val[2] / self.val[1].powf(T::ONE_POINT_FIVE), true)
        } else {
            (T::ZERO, false)
        }
    }

    fn get_krt(&self) -> (T, bool) {
        if self.cnt[0] >= 2 {
            let n = T::from(self.cnt[0]).unwrap_or(T::ZERO);
            (
                n * self.val[3] / (self.val[1] * self.val[1]) - T::THREE,
                true,
            )
        } else {
            (T::ZERO, false)
        }
    }

    // --- P² quantile (spec.md §4.6) ---------------------------------------
    //
    // `val[0..5]` hold the five marker heights (minimum, three quantile
    // markers, maximum); `cnt[1..4]` hold the three interior markers'
    // integer positions (`cnt[0]` and `cnt[4]` are the fixed end positions
    // 1 and 5 and are not separately tracked); `val[5..9]` hold the desired
    // (fractional) marker positions, advanced by `par/2, par, (1+par)/2, 1`
    // each sample once warm-up is complete.

    fn put_qnt(&mut self, x: T) {
        let warm = self.cnt[4];
        if warm < 4 {
            self.val[warm as usize] = x;
            self.cnt[4] += 1;
            return;
        }
        if warm == 4 {
            self.val[4] = x;
            self.val[0..5].sort_by(T::agg_total_cmp);
            self.cnt[1] = 2;
            self.cnt[2] = 3;
            self.cnt[3] = 4;
            self.cnt[4] = 5;
            self.val[5] = T::ONE;
            self.val[6] = T::ONE + T::TWO * self.par;
            self.val[7] = T::ONE + T::FOUR * self.par;
            self.val[8] = T::THREE + T::TWO * self.par;
            self.val[9] = T::FIVE;
            self.cnt[0] = 0;
            return;
        }

        if x < self.val[0] {
            self.val[0] = x;
        }
        if x < self.val[1] {
            self.cnt[1] += 1;
        }
        if x < self.val[2] {
            self.cnt[2] += 1;
        }
        if x < self.val[3] {
            self.cnt[3] += 1;
        }
        if x > self.val[4] {
            self.val[4] = x;
        }
        self.cnt[4] += 1;

        self.val[6] = self.val[6] + self.par / T::TWO;
        self.val[7] = self.val[7] + self.par;
        self.val[8] = self.val[8] + (T::ONE + self.par) / T::TWO;
        self.val[9] = self.val[9] + T::ONE;

        self.qnt_adj(1);
        self.qnt_adj(2);
        self.qnt_adj(3);

        self.cnt[0] = self.cnt[0].wrapping_sub(1);
    }

    /// Adjusts marker `i` (one of 1, 2, 3) toward its desired position by at
    /// most one sample's worth of movement, preferring the parabolic
    /// (P²) estimate and falling back to a linear one when the parabolic
    /// estimate would leave the markers out of order.
    fn qnt_adj(&mut self, i: usize) {
        let desired = self.val[i + 5] - T::from(self.cnt[i]).unwrap_or(T::ZERO);
        let may_advance = self.cnt[i + 1] > self.cnt[i] + 1;
        let may_retreat = self.cnt[i - 1] + 1 < self.cnt[i];

        if (desired >= T::ONE && may_advance) || (desired <= -T::ONE && may_retreat) {
            // `AGGSTAT_SIGN(1.0, dlt)` in `original_source/src/put.c`'s
            // `qnt_adj` picks the step direction via `copysign`, not a
            // hand-rolled comparison; `agg_copysign` is this trait's port of
            // that same C intrinsic.
            let d = T::ONE.agg_copysign(desired);
            let parabolic = self.qnt_parabolic(i, d);
            let candidate = if self.val[i - 1] < parabolic && parabolic < self.val[i + 1] {
                parabolic
            } else {
                self.qnt_linear(i, d)
            };
            self.val[i] = candidate;
            if d > T::ZERO {
                self.cnt[i] += 1;
            } else {
                self.cnt[i] -= 1;
            }
        }
    }

    fn qnt_parabolic(&self, i: usize, d: T) -> T {
        let n_im1 = T::from(self.cnt[i - 1]).unwrap_or(T::ZERO);
        let n_i = T::from(self.cnt[i]).unwrap_or(T::ZERO);
        let n_ip1 = T::from(self.cnt[i + 1]).unwrap_or(T::ZERO);
        let v_im1 = self.val[i - 1];
        let v_i = self.val[i];
        let v_ip1 = self.val[i + 1];

        let left = (n_i - n_im1 + d) * (v_ip1 - v_i) / (n_ip1 - n_i);
        let right = (n_ip1 - n_i - d) * (v_i - v_im1) / (n_i - n_im1);
        v_i + d / (n_ip1 - n_im1) * (left + right)
    }

    fn qnt_linear(&self, i: usize, d: T) -> T {
        let dir = if d > T::ZERO { 1i64 } else { -1i64 };
        let j = (i as i64 + dir) as usize;
        let n_i = T::from(self.cnt[i]).unwrap_or(T::ZERO);
        let n_j = T::from(self.cnt[j]).unwrap_or(T::ZERO);
        self.val[i] + d * (self.val[j] - self.val[i]) / (n_j - n_i)
    }
}
