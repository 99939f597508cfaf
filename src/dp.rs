//! C3 — DP Layer Builder.
//!
//! Materialises the layered decision structure: for each layer `i`,
//! an interning map from canonical `State` to `StateId`, and a
//! parallel vector of `DPBlock`s with `lo`/`hi` successor ids filled
//! in. Layer `i`'s map is dropped once layer `i + 1` is fully built —
//! only the current and next layer's maps need to coexist. Uses
//! `ahash`'s map rather than the standard library's default hasher:
//! the state key is a fixed-size byte-ish struct, and mixing quality
//! dominates interning throughput far more than resistance to
//! adversarial inputs does here.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::frontier::FrontierMeta;
use crate::state::{self, Outcome, State};

/// A non-negative id indexes the next layer; a negative id
/// `-(k + 1)` is a terminal with exactly `k` source-connected
/// vertices.
pub type StateId = i64;

/// One DP node: accumulated probability mass plus the two successor
/// ids. `p` starts at 0 and is filled in by the sweep (`crate::sweep`);
/// `lo`/`hi` are fixed at construction time and never mutated again.
#[derive(Debug, Clone, Copy)]
pub struct DpBlock {
    pub p: f64,
    pub lo: StateId,
    pub hi: StateId,
}

/// The built layers: `dp[i]` has one block per state interned at
/// layer `i`, and `layer_sizes[i]` records how many states that was
/// (used for the optional `#(states)` diagnostic).
pub struct Layers {
    pub dp: Vec<Vec<DpBlock>>,
    pub layer_sizes: Vec<usize>,
}

/// Interns `s` into `next_map`/`next_states`, allocating the next
/// sequential id on first sight. `next_states[id]` always holds the
/// state that was assigned `id`, so the next iteration can revisit
/// layer `i + 1` in deterministic id order without relying on hash
/// map iteration order.
fn intern(next_map: &mut AHashMap<State, StateId>, next_states: &mut Vec<State>, s: State) -> StateId {
    if let Some(&id) = next_map.get(&s) {
        return id;
    }
    let id = next_states.len() as StateId;
    next_map.insert(s, id);
    next_states.push(s);
    id
}

fn to_state_id(outcome: Outcome, next_map: &mut AHashMap<State, StateId>, next_states: &mut Vec<State>) -> StateId {
    match outcome {
        Outcome::Terminal(k) => -((k as i64) + 1),
        Outcome::Continue(s) => intern(next_map, next_states, s),
    }
}

/// Builds all `m + 1` layers of the DP from frontier metadata and the
/// source indicator vector. `src_final` gates the pruning rule (see
/// `crate::state::step`). Layer `m` is always empty: every frontier
/// vertex has necessarily retired by the last edge, so every branch
/// at `i = m - 1` resolves to a terminal (see `src/dp.rs` tests).
pub fn build_layers(meta: &FrontierMeta, is_source: &[bool], src_final: usize) -> Result<Layers> {
    let m = meta.vpos.len();

    let mut dp: Vec<Vec<DpBlock>> = Vec::with_capacity(m + 1);
    let mut layer_sizes: Vec<usize> = Vec::with_capacity(m + 1);
    let mut cur_states: Vec<State> = vec![State::root()];
    layer_sizes.push(cur_states.len());

    for i in 0..m {
        let mut next_map: AHashMap<State, StateId> = AHashMap::new();
        let mut next_states: Vec<State> = Vec::new();
        let mut layer_blocks = Vec::with_capacity(cur_states.len());

        for pred in &cur_states {
            let result = state::step(pred, meta, i, src_final, is_source);
            let lo = to_state_id(result.lo, &mut next_map, &mut next_states);
            let hi = to_state_id(result.hi, &mut next_map, &mut next_states);
            layer_blocks.push(DpBlock { p: 0.0, lo, hi });
        }

        dp.push(layer_blocks);
        layer_sizes.push(next_states.len());
        cur_states = next_states;
    }
    dp.push(vec![DpBlock { p: 0.0, lo: 0, hi: 0 }; cur_states.len()]);

    if dp.len() != m + 1 {
        return Err(Error::Internal(format!(
            "expected {} layers, built {}",
            m + 1,
            dp.len()
        )));
    }

    Ok(Layers { dp, layer_sizes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn last_layer_is_always_empty() {
        let g = Graph::new(2, vec![(0, 1)]);
        let meta = FrontierMeta::build(&g).unwrap();
        let is_source = vec![true, false];
        let src_final = meta.src_final(&is_source);
        let layers = build_layers(&meta, &is_source, src_final).unwrap();
        assert!(layers.dp.last().unwrap().is_empty());
    }

    #[test]
    fn single_edge_builds_two_layers() {
        let g = Graph::new(2, vec![(0, 1)]);
        let meta = FrontierMeta::build(&g).unwrap();
        let is_source = vec![true, false];
        let src_final = meta.src_final(&is_source);
        let layers = build_layers(&meta, &is_source, src_final).unwrap();
        assert_eq!(layers.dp.len(), 2);
        assert_eq!(layers.dp[0].len(), 1);
        // Both lo and hi resolve directly to terminals: k=1 (lo, the
        // edge fails, only the source vertex counts) and k=2 (hi).
        let root_block = layers.dp[0][0];
        assert_eq!(root_block.lo, -2); // -(1+1)
        assert_eq!(root_block.hi, -3); // -(2+1)
    }
}
