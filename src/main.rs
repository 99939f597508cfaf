//! CLI entry point: `frontrel graph_file probability_file source_file order_file`.
//!
//! Wires the five components together — load, build frontier
//! metadata, build DP layers, sweep probabilities, report — and
//! prints the resulting histogram to stdout with diagnostics on
//! stderr. Exit code is `0` on success and `1` on any input or
//! internal error, with the error printed to stderr via `anyhow`'s
//! `Context` chain.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;

use frontrel::{io, report, solve, NORMALISATION_TOLERANCE};

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        anyhow::bail!(
            "usage: frontrel <graph_file> <probability_file> <source_file> <order_file>"
        );
    }

    let graph_file = PathBuf::from(&args[0]);
    let probability_file = PathBuf::from(&args[1]);
    let source_file = PathBuf::from(&args[2]);
    let order_file = PathBuf::from(&args[3]);

    let problem = io::load(&graph_file, &probability_file, &source_file, &order_file)
        .context("loading input files")?;

    let start = Instant::now();
    let solution = solve(&problem).context("running the reliability DP")?;
    let elapsed = start.elapsed();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::print_histogram(&mut out, &solution.histogram).context("writing histogram")?;

    let stderr = std::io::stderr();
    let mut err = stderr.lock();
    report::print_state_count(&mut err, &solution.layer_sizes).context("writing state count")?;
    report::print_timing(&mut err, elapsed).context("writing timing")?;
    report::warn_if_not_normalised(&mut err, &solution.histogram, NORMALISATION_TOLERANCE)
        .context("checking normalisation")?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
