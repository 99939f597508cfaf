//! C1 — Frontier Builder.
//!
//! From a graph with a fixed edge order, computes the per-layer
//! frontier metadata that the rest of the pipeline treats as
//! read-only: which vertices are alive on the frontier at each step,
//! where they sit in the compact per-layer slot arrays, and the one
//! value that depends on the source set (`src_final`).

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Hard cap on simultaneous frontier width. States are encoded in
/// fixed 16-slot arrays (`crate::state::State`); a wider frontier
/// would need a wider encoding, which this crate does not provide.
pub const MAX_FRONTIER: usize = 16;

/// Per-edge frontier metadata, built once from the graph and its edge
/// order and read-only for the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct FrontierMeta {
    /// `fros[i]`: frontier vertices *before* processing edge i, in
    /// first-appearance order. Length `m + 1`; `fros[m]` is always
    /// empty (nothing survives past the last edge).
    pub fros: Vec<Vec<usize>>,
    /// `mfros[i]`: frontier *during* processing of edge i, i.e.
    /// `fros[i]` with the vertices first incident at i appended.
    pub mfros: Vec<Vec<usize>>,
    /// Positions within `mfros[i]` of vertices entering at i.
    pub fent: Vec<Vec<usize>>,
    /// Positions within `mfros[i]` of vertices leaving after i.
    pub flve: Vec<Vec<usize>>,
    /// Positions within `mfros[i]` of edge i's two endpoints.
    pub vpos: Vec<(usize, usize)>,
    /// For each i, the position in `fros[i + 1]` that slot p of
    /// `mfros[i]` maps to, or `None` if that slot leaves at i. This
    /// makes the Exit phase of the state canonicaliser a plain
    /// lookup instead of a positional memory trick.
    pub remap_next: Vec<Vec<Option<usize>>>,
    /// Maximum frontier width observed across all layers.
    pub max_width: usize,
}

impl FrontierMeta {
    /// Builds frontier metadata for `g` under its stored edge order.
    /// Fails with `Error::FrontierTooWide` if any layer's frontier
    /// exceeds `MAX_FRONTIER`, and with `Error::SelfLoop` if the
    /// graph contains an edge whose endpoints are equal — a self-loop
    /// never changes connectivity between distinct vertices, so it is
    /// rejected up front rather than threaded through the merge logic
    /// as a silently-accepted no-op.
    pub fn build(g: &Graph) -> Result<Self> {
        let n = g.n;
        let m = g.edges.len();

        for &(u, v) in &g.edges {
            if u == v {
                return Err(Error::SelfLoop { v: v + 1 });
            }
        }

        let mut first_occ = vec![usize::MAX; n];
        let mut last_occ = vec![usize::MAX; n];
        for (i, &(u, v)) in g.edges.iter().enumerate() {
            if first_occ[u] == usize::MAX {
                first_occ[u] = i;
            }
            if first_occ[v] == usize::MAX {
                first_occ[v] = i;
            }
            last_occ[u] = i;
            last_occ[v] = i;
        }

        let mut fros: Vec<Vec<usize>> = Vec::with_capacity(m + 1);
        let mut mfros: Vec<Vec<usize>> = Vec::with_capacity(m);
        let mut fent: Vec<Vec<usize>> = Vec::with_capacity(m);
        let mut flve: Vec<Vec<usize>> = Vec::with_capacity(m);
        let mut vpos: Vec<(usize, usize)> = Vec::with_capacity(m);
        let mut remap_next: Vec<Vec<Option<usize>>> = Vec::with_capacity(m);
        let mut max_width = 0;

        fros.push(Vec::new());

        for (i, &(u, v)) in g.edges.iter().enumerate() {
            let cur_fros = fros[i].clone();
            let mut cur_mfros = cur_fros.clone();
            let mut cur_fent = Vec::new();

            for &w in &[u, v] {
                if first_occ[w] == i && !cur_mfros.contains(&w) {
                    cur_fent.push(cur_mfros.len());
                    cur_mfros.push(w);
                }
            }

            let pos_of = |w: usize, slots: &[usize]| slots.iter().position(|&x| x == w).unwrap();
            let vp = (pos_of(u, &cur_mfros), pos_of(v, &cur_mfros));

            let mut cur_flve = Vec::new();
            for (p, &w) in cur_mfros.iter().enumerate() {
                if last_occ[w] == i {
                    cur_flve.push(p);
                }
            }

            let mut next_fros = Vec::with_capacity(cur_mfros.len() - cur_flve.len());
            let mut remap = vec![None; cur_mfros.len()];
            for (p, &w) in cur_mfros.iter().enumerate() {
                if !cur_flve.contains(&p) {
                    remap[p] = Some(next_fros.len());
                    next_fros.push(w);
                }
            }

            max_width = max_width.max(cur_mfros.len());
            if cur_mfros.len() > MAX_FRONTIER {
                return Err(Error::FrontierTooWide {
                    width: cur_mfros.len(),
                    cap: MAX_FRONTIER,
                });
            }

            mfros.push(cur_mfros);
            fent.push(cur_fent);
            flve.push(cur_flve);
            vpos.push(vp);
            remap_next.push(remap);
            fros.push(next_fros);
        }

        Ok(FrontierMeta {
            fros,
            mfros,
            fent,
            flve,
            vpos,
            remap_next,
            max_width,
        })
    }

    /// The largest edge index `i` such that `mfros[i]` still contains
    /// at least one source vertex. Gates the pruning rule in
    /// `crate::state`. Returns `0` if no source vertex appears in any
    /// frontier (degenerate but well-defined: every layer is then
    /// eligible for the "no live label-0 slot" pruning check).
    pub fn src_final(&self, is_source: &[bool]) -> usize {
        let mut last = 0;
        for (i, frontier) in self.mfros.iter().enumerate() {
            if frontier.iter().any(|&v| is_source[v]) {
                last = i;
            }
        }
        last
    }
}
