//! Frontier-based network reliability: the probability distribution
//! of the number of vertices reachable from a set of source vertices
//! in an undirected graph whose edges fail independently.
//!
//! The pipeline is five collaborators, in data-flow order:
//! [`frontier`] (per-edge frontier metadata) → [`state`] (single-edge
//! state transitions) → [`dp`] (layered interning + DP blocks) →
//! [`sweep`] (probability propagation into the output histogram) →
//! [`io`] / [`report`] (loading and printing, at the edges of the
//! pipeline). [`solve`] wires all of it together for the binary.

pub mod dp;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod io;
pub mod report;
pub mod state;
pub mod sweep;

/// Tolerance used when warning that the output histogram does not sum
/// to 1, which should only happen from accumulated floating-point
/// rounding, never from a correctness bug.
pub const NORMALISATION_TOLERANCE: f64 = 1e-9;

use error::Result;
use io::LoadedProblem;

/// The result of a full run: the histogram and the per-layer state
/// counts (for the optional `#(states)` diagnostic).
pub struct Solution {
    pub histogram: Vec<f64>,
    pub layer_sizes: Vec<usize>,
}

/// Runs the full pipeline — Frontier Builder, DP Layer Builder,
/// Probability Sweeper — over an already-loaded problem instance.
pub fn solve(problem: &LoadedProblem) -> Result<Solution> {
    let meta = frontier::FrontierMeta::build(&problem.order)?;
    let src_final = meta.src_final(&problem.is_source);
    let layers = dp::build_layers(&meta, &problem.is_source, src_final)?;
    let layer_sizes = layers.layer_sizes.clone();
    let histogram = sweep::sweep(layers, &problem.probabilities, problem.graph.num_vertices());
    Ok(Solution {
        histogram,
        layer_sizes,
    })
}
