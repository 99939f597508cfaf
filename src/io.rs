//! C5 (loader half) — Input Loader.
//!
//! Parses the four positional input files into a `Graph`, a
//! per-edge probability vector aligned to the *order file*'s edge
//! sequence, and a source-vertex indicator. File formats are plain
//! whitespace-separated text: no headers beyond the `n m` line, no
//! delimiter other than whitespace.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Graph;

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        file: path.display().to_string(),
        source,
    })
}

fn parse_ints(file: &str, text: &str) -> Result<Vec<i64>> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<i64>().map_err(|_| Error::Parse {
                file: file.to_string(),
                reason: format!("expected an integer, found {tok:?}"),
            })
        })
        .collect()
}

fn parse_floats(file: &str, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| Error::Parse {
                file: file.to_string(),
                reason: format!("expected a floating-point number, found {tok:?}"),
            })
        })
        .collect()
}

/// Reads a graph file: `n m` header, then `m` lines of `u v`
/// (1-indexed). Returns a 0-indexed `Graph`. Vertex ids out of
/// `1..=n` are rejected.
pub fn read_graph_file(path: &Path) -> Result<Graph> {
    let file = path.display().to_string();
    let text = read_to_string(path)?;
    let ints = parse_ints(&file, &text)?;

    if ints.len() < 2 {
        return Err(Error::Parse {
            file,
            reason: "missing `n m` header".to_string(),
        });
    }
    let n = ints[0] as usize;
    let m = ints[1] as usize;
    let rest = &ints[2..];

    if rest.len() != 2 * m {
        return Err(Error::Parse {
            file,
            reason: format!("header declares {m} edges but found {} endpoint values", rest.len()),
        });
    }

    let mut edges = Vec::with_capacity(m);
    for pair in rest.chunks_exact(2) {
        let u = validate_vertex(&file, pair[0], n)?;
        let v = validate_vertex(&file, pair[1], n)?;
        edges.push((u, v));
    }

    Ok(Graph::new(n, edges))
}

fn validate_vertex(file: &str, raw: i64, n: usize) -> Result<usize> {
    if raw < 1 || raw as usize > n {
        return Err(Error::VertexOutOfRange {
            file: file.to_string(),
            vertex: raw,
            n,
        });
    }
    Ok((raw - 1) as usize)
}

/// Reads `m` whitespace-separated probabilities in `[0, 1]`.
pub fn read_probability_file(path: &Path, m: usize) -> Result<Vec<f64>> {
    let file = path.display().to_string();
    let text = read_to_string(path)?;
    let values = parse_floats(&file, &text)?;

    if values.len() != m {
        return Err(Error::ProbabilityCountMismatch {
            got: values.len(),
            expected: m,
        });
    }
    for (index, &value) in values.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::ProbabilityOutOfRange { index, value });
        }
    }
    Ok(values)
}

/// Reads whitespace-separated 1-indexed source vertex ids and
/// returns a 0-indexed `is_source` vector of length `n`.
pub fn read_source_file(path: &Path, n: usize) -> Result<Vec<bool>> {
    let file = path.display().to_string();
    let text = read_to_string(path)?;
    let ints = parse_ints(&file, &text)?;

    let mut is_source = vec![false; n];
    for raw in ints {
        let v = validate_vertex(&file, raw, n)?;
        is_source[v] = true;
    }
    Ok(is_source)
}

/// Remaps `order.edges` onto `graph`'s probability vector: edge `i`
/// of the order file gets `prob[graph.index_of(order.edges[i])]`.
/// This is `H.etovar(u, v)` from the original — the order file may
/// list edges in a different sequence than the graph file, and
/// endpoints may be swapped.
pub fn remap_probabilities(graph: &Graph, order: &Graph, prob: &[f64]) -> Result<Vec<f64>> {
    order
        .edges
        .iter()
        .map(|&(u, v)| {
            graph
                .index_of(u, v)
                .map(|idx| prob[idx])
                .ok_or(Error::UnmatchedOrderEdge { u: u + 1, v: v + 1 })
        })
        .collect()
}

/// A debug/golden-file snapshot of the four loaded inputs. Not part
/// of the CLI surface; exists so tests and ad hoc debugging can dump
/// and diff a loaded problem instance as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedProblem {
    pub graph: Graph,
    pub order: Graph,
    pub probabilities: Vec<f64>,
    pub is_source: Vec<bool>,
}

/// Loads and cross-validates all four input files for a single run.
pub fn load(graph_file: &Path, probability_file: &Path, source_file: &Path, order_file: &Path) -> Result<LoadedProblem> {
    let graph = read_graph_file(graph_file)?;
    let prob = read_probability_file(probability_file, graph.num_edges())?;
    let is_source = read_source_file(source_file, graph.num_vertices())?;
    let order = read_graph_file(order_file)?;

    if order.num_vertices() != graph.num_vertices() || order.num_edges() != graph.num_edges() {
        return Err(Error::Parse {
            file: order_file.display().to_string(),
            reason: "does not have the same vertex/edge counts as the graph file".to_string(),
        });
    }

    let probabilities = remap_probabilities(&graph, &order, &prob)?;

    Ok(LoadedProblem {
        graph,
        order,
        probabilities,
        is_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_minimal_graph_file() {
        let f = write_temp("2 1\n1 2\n");
        let g = read_graph_file(f.path()).unwrap();
        assert_eq!(g.n, 2);
        assert_eq!(g.edges, vec![(0, 1)]);
    }

    #[test]
    fn rejects_vertex_out_of_range() {
        let f = write_temp("2 1\n1 3\n");
        assert!(matches!(read_graph_file(f.path()), Err(Error::VertexOutOfRange { .. })));
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let f = write_temp("1.5\n");
        assert!(matches!(
            read_probability_file(f.path(), 1),
            Err(Error::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn remaps_probabilities_across_differing_edge_orders() {
        let graph = Graph::new(3, vec![(0, 1), (1, 2)]);
        let order = Graph::new(3, vec![(1, 2), (0, 1)]);
        let prob = vec![0.3, 0.6];
        let remapped = remap_probabilities(&graph, &order, &prob).unwrap();
        assert_eq!(remapped, vec![0.6, 0.3]);
    }

    /// `LoadedProblem` round-trips through JSON, so a loaded instance
    /// can be dumped as a golden file and diffed across runs.
    #[test]
    fn loaded_problem_round_trips_through_json() {
        let graph = Graph::new(3, vec![(0, 1), (1, 2)]);
        let problem = LoadedProblem {
            graph: graph.clone(),
            order: graph,
            probabilities: vec![0.3, 0.6],
            is_source: vec![true, false, false],
        };
        let json = serde_json::to_string(&problem).unwrap();
        let back: LoadedProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.probabilities, problem.probabilities);
        assert_eq!(back.is_source, problem.is_source);
    }
}
