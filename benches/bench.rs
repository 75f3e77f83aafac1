//! Throughput comparison between the on-line and batch engines.
//!
//! Run with `cargo bench`. `divan` is used in place of the nightly-only
//! `#[bench]` harness so this works on stable.

use aggstat::{run_copy, AggFnc, AggState};

fn main() {
    divan::main();
}

const LENGTHS: &[usize] = &[100, 10_000, 1_000_000];

fn sample_data(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| ((i as f64) * 0.618_034).fract() * 100.0 - 50.0)
        .collect()
}

#[divan::bench(args = LENGTHS)]
fn online_avg(bencher: divan::Bencher, len: usize) {
    let data = sample_data(len);
    bencher.bench(|| {
        let mut state = AggState::<f64>::new(AggFnc::Avg, 0.0);
        for &x in &data {
            state.put(divan::black_box(x));
        }
        state.get()
    });
}

#[divan::bench(args = LENGTHS)]
fn batch_avg(bencher: divan::Bencher, len: usize) {
    let data = sample_data(len);
    bencher.bench(|| run_copy(divan::black_box(&data), AggFnc::Avg, 0.0));
}

#[divan::bench(args = LENGTHS)]
fn online_median(bencher: divan::Bencher, len: usize) {
    let data = sample_data(len);
    bencher.bench(|| {
        let mut state = AggState::<f64>::new(AggFnc::Med, 0.0);
        for &x in &data {
            state.put(divan::black_box(x));
        }
        state.get()
    });
}

#[divan::bench(args = LENGTHS)]
fn batch_median(bencher: divan::Bencher, len: usize) {
    let data = sample_data(len);
    bencher.bench(|| run_copy(divan::black_box(&data), AggFnc::Med, 0.0));
}
