//! The graph data model: an ordered edge list over vertices `0..n`.
//!
//! Vertex ids are stored 0-indexed internally; all file formats use
//! 1-indexed ids and the conversion happens at the loader boundary
//! (`crate::io`).

use serde::{Deserialize, Serialize};

/// An undirected graph as an ordered sequence of edges.
///
/// The edge order is part of the problem: it is supplied externally
/// (the `order_file`) and determines the elimination order the DP
/// sweeps over, and therefore the frontier width at every step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub n: usize,
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    pub fn new(n: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { n, edges }
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Finds the index of the edge matching `(u, v)` regardless of
    /// endpoint order. This is `H.etovar(u, v)` from the original:
    /// the mechanism by which an `order_file` edge looks up its
    /// probability in the `graph_file`'s edge order.
    pub fn index_of(&self, u: usize, v: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&(a, b)| (a == u && b == v) || (a == v && b == u))
    }
}
