//! C5 (reporter half) — Reporter.
//!
//! Prints the histogram to stdout and diagnostics to stderr. Kept
//! separate from `io::load` so tests can exercise the loader without
//! touching process-global stdout/stderr.

use std::io::Write;
use std::time::Duration;

/// Prints `k: res[k]` for every `k` in `0..res.len()`, 15 fractional
/// digits, to `out`. A trailing newline follows every line.
pub fn print_histogram(out: &mut impl Write, res: &[f64]) -> std::io::Result<()> {
    for (k, p) in res.iter().enumerate() {
        writeln!(out, "{k}: {p:.15}")?;
    }
    Ok(())
}

/// Prints the `calc time: <ms> ms` diagnostic line.
pub fn print_timing(err: &mut impl Write, elapsed: Duration) -> std::io::Result<()> {
    writeln!(err, "calc time: {:.6} ms", elapsed.as_secs_f64() * 1000.0)
}

/// Prints the `#(states): <count>` diagnostic line, the sum of
/// interned state counts across every layer. Cheap always-on
/// instrumentation, not gated behind a flag.
pub fn print_state_count(err: &mut impl Write, layer_sizes: &[usize]) -> std::io::Result<()> {
    let total: usize = layer_sizes.iter().sum();
    writeln!(err, "#(states): {total}")
}

/// Checks that the histogram sums to 1 within `tolerance` and warns
/// on stderr if it doesn't. A failure here indicates accumulated
/// floating-point error, not a correctness bug, so it is a warning
/// rather than a propagated error.
pub fn warn_if_not_normalised(err: &mut impl Write, res: &[f64], tolerance: f64) -> std::io::Result<()> {
    let sum: f64 = res.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        writeln!(
            err,
            "warning: histogram sums to {sum} (expected 1 within {tolerance})"
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fifteen_fractional_digits() {
        let mut buf = Vec::new();
        print_histogram(&mut buf, &[0.7, 0.3]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "0: 0.700000000000000\n1: 0.300000000000000\n");
    }

    #[test]
    fn warns_when_histogram_does_not_sum_to_one() {
        let mut buf = Vec::new();
        warn_if_not_normalised(&mut buf, &[0.4, 0.4], 1e-9).unwrap();
        assert!(!buf.is_empty());
    }

    #[test]
    fn silent_when_normalised() {
        let mut buf = Vec::new();
        warn_if_not_normalised(&mut buf, &[0.7, 0.3], 1e-9).unwrap();
        assert!(buf.is_empty());
    }
}
