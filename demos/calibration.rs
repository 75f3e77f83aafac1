//! Calibration harness: repeatedly compares the on-line and batch engines on
//! freshly generated random streams and reports the largest observed
//! absolute divergence between them.
//!
//! Gated behind the `harness` feature (pulls in `rand`); not part of the
//! library's public surface and not unit-tested — its job is exploratory,
//! run by hand while tuning tolerance tables, not verified by CI.
//!
//! ```text
//! cargo run --features harness --bin aggstat-calibrate -- \
//!     -f avg -l 1000 -r 200 -s 10.0 -o -5.0 -p 0.5
//! ```

use aggstat::{run_copy, AggFnc, AggState};
use rand::Rng;
use std::env;
use std::process::ExitCode;

struct Settings {
    len: usize,
    rep: usize,
    scale: f64,
    offset: f64,
    par: f64,
    fnc: AggFnc,
}

fn parse_fnc(raw: &str) -> Option<AggFnc> {
    Some(match raw {
        "fst" => AggFnc::Fst,
        "lst" => AggFnc::Lst,
        "cnt" => AggFnc::Cnt,
        "sum" => AggFnc::Sum,
        "min" => AggFnc::Min,
        "max" => AggFnc::Max,
        "avg" => AggFnc::Avg,
        "var" => AggFnc::Var,
        "dev" => AggFnc::Dev,
        "skw" => AggFnc::Skw,
        "krt" => AggFnc::Krt,
        "qnt" => AggFnc::Qnt,
        "med" => AggFnc::Med,
        _ => return None,
    })
}

fn parse_settings(args: &[String]) -> Result<Settings, String> {
    let mut len = 1_000usize;
    let mut rep = 100usize;
    let mut scale = 1.0f64;
    let mut offset = 0.0f64;
    let mut par = 0.5f64;
    let mut fnc = None;

    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .ok_or_else(|| format!("missing value for '{flag}'"))?;
        match flag.as_str() {
            "-f" => fnc = Some(parse_fnc(value).ok_or_else(|| format!("unknown function '{value}'"))?),
            "-l" => len = value.parse().map_err(|_| format!("bad stream length '{value}'"))?,
            "-r" => rep = value.parse().map_err(|_| format!("bad repetition count '{value}'"))?,
            "-s" => scale = value.parse().map_err(|_| format!("bad scale '{value}'"))?,
            "-o" => offset = value.parse().map_err(|_| format!("bad offset '{value}'"))?,
            "-p" => par = value.parse().map_err(|_| format!("bad parameter '{value}'"))?,
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(Settings {
        len,
        rep,
        scale,
        offset,
        par,
        fnc: fnc.ok_or_else(|| "missing required '-f <fnc>'".to_string())?,
    })
}

fn fill_array(rng: &mut impl Rng, len: usize, scale: f64, offset: f64) -> Vec<f64> {
    (0..len)
        .map(|_| rng.random::<f64>() * scale + offset)
        .collect()
}

fn compute_online(arr: &[f64], fnc: AggFnc, par: f64) -> (f64, bool) {
    let mut state = AggState::<f64>::new(fnc, par);
    for &x in arr {
        state.put(x);
    }
    state.get()
}

fn run_comparisons(stg: &Settings) -> f64 {
    let mut rng = rand::rng();
    let mut max_diff = 0.0f64;

    for _ in 0..stg.rep {
        let arr = fill_array(&mut rng, stg.len, stg.scale, stg.offset);
        let (online_val, online_valid) = compute_online(&arr, stg.fnc, stg.par);
        let (batch_val, batch_valid) = run_copy(&arr, stg.fnc, stg.par);

        if online_valid && batch_valid {
            let diff = (online_val - batch_val).abs();
            if diff > max_diff {
                max_diff = diff;
            }
        }
    }

    max_diff
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let settings = match parse_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: aggstat-calibrate -f <fnc> [-l len] [-r rep] [-s scale] [-o offset] [-p par]");
            return ExitCode::FAILURE;
        }
    };

    let max_diff = run_comparisons(&settings);
    println!("{max_diff:e}");
    ExitCode::SUCCESS
}
