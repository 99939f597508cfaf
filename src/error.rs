//! Error kinds for the frontier reliability pipeline.

use thiserror::Error;

/// Errors produced while loading, validating or running the DP.
///
/// `NumericError` from the design is deliberately not a variant here:
/// per spec it is a non-fatal warning (tolerance check on the final
/// histogram sum) and is reported directly to stderr by the reporter
/// rather than propagated as a `Result::Err`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("vertex {vertex} out of range 1..={n} in {file}")]
    VertexOutOfRange { file: String, vertex: i64, n: usize },

    #[error("probability {value} outside [0, 1] (edge index {index})")]
    ProbabilityOutOfRange { index: usize, value: f64 },

    #[error("probability file has {got} entries, expected {expected} (one per graph edge)")]
    ProbabilityCountMismatch { got: usize, expected: usize },

    #[error("edge ({u}, {v}) in the order file has no matching edge in the graph file")]
    UnmatchedOrderEdge { u: usize, v: usize },

    #[error("self-loop edge ({v}, {v}) is not a supported input")]
    SelfLoop { v: usize },

    #[error("frontier width {width} exceeds the implementation cap of {cap}")]
    FrontierTooWide { width: usize, cap: usize },

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
