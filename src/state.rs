//! C2 — State and State Canonicaliser.
//!
//! A `State` is a canonicalised partial partition of one layer's
//! frontier vertices into components, plus the count of
//! already-retired vertices per component. `step` advances a
//! predecessor state across one edge, producing the `lo` (excluded)
//! and `hi` (included) successors, each either a live `State` to
//! intern in the next layer or a `Terminal(k)` outcome.

use crate::frontier::{FrontierMeta, MAX_FRONTIER};

/// A canonicalised frontier state.
///
/// `comp[s]` is the component label of frontier slot `s`, or `-1` if
/// slot `s` is unused at this layer's width. Labels appear in
/// first-occurrence left-to-right order starting at 0; label 0 is
/// permanently reserved for "connected to a source vertex" and is
/// pinned even when no live slot currently carries it.
///
/// `numv[c]` counts vertices already retired off the frontier whose
/// final component is `c`. Widened to `u16` so a single component
/// retiring more than 255 vertices does not silently wrap.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct State {
    pub comp: [i8; MAX_FRONTIER],
    pub numv: [u16; MAX_FRONTIER],
    pub cnum: u8,
}

impl State {
    /// The root state for layer 0: an empty frontier, with label 0
    /// already reserved (`cnum = 1`) and no vertices retired yet.
    pub fn root() -> Self {
        State {
            comp: [-1; MAX_FRONTIER],
            numv: [0; MAX_FRONTIER],
            cnum: 1,
        }
    }
}

/// Outcome of advancing a state across one branch (`lo` or `hi`) of
/// one edge.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// A live successor state to intern in the next layer.
    Continue(State),
    /// A terminal outcome: exactly `k` vertices are source-connected
    /// along every completion of this branch, and no further layers
    /// need to be built for it.
    Terminal(usize),
}

/// The `lo` (edge excluded) and `hi` (edge included) outcomes of
/// advancing one predecessor state across edge `i`.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    pub lo: Outcome,
    pub hi: Outcome,
}

/// Advances `pred` (the state at layer `i`, indexed by `meta.fros[i]`)
/// across edge `i`, given which vertices are sources and the
/// pre-computed `src_final` gate.
///
/// This proceeds in three phases: Entry builds the intermediate state
/// in the `mfros[i]` layout, Transition produces `lo`/`hi` by
/// optionally merging edge i's two endpoint components, and Exit
/// retires `flve[i]` slots into `numv` and renumbers canonically. The
/// pruning check fires a terminal once `i >= src_final` (no further
/// edge can bring a new source vertex onto the frontier) and no live
/// slot is label 0: with no live source-connected component to merge
/// into, label 0 can never reappear on the frontier again, so the
/// accumulated `numv[0]` is already the final source-connected count.
pub fn step(pred: &State, meta: &FrontierMeta, i: usize, src_final: usize, is_source: &[bool]) -> StepResult {
    let kk = meta.fros[i].len();
    let tt = meta.mfros[i].len();

    let mut entry_comp = [-1i8; MAX_FRONTIER];
    entry_comp[..kk].copy_from_slice(&pred.comp[..kk]);
    let mut cnum = pred.cnum;
    for &p in &meta.fent[i] {
        let v = meta.mfros[i][p];
        if is_source[v] {
            entry_comp[p] = 0;
        } else {
            entry_comp[p] = cnum as i8;
            cnum += 1;
        }
    }

    let lo_comp = entry_comp;
    let hi_comp = merge(entry_comp, meta.vpos[i]);

    StepResult {
        lo: exit(lo_comp, &pred.numv, cnum, tt, meta, i, src_final),
        hi: exit(hi_comp, &pred.numv, cnum, tt, meta, i, src_final),
    }
}

/// Transition phase for the `hi` (edge included) branch: merges the
/// components of the edge's two endpoints. Label 0 always wins; of
/// two non-zero labels the smaller (equivalently, per the canonical
/// first-occurrence order already held by `comp`, the one appearing
/// first) wins. A self-loop (`vpos.0 == vpos.1`) or an edge whose
/// endpoints are already in the same component degenerates to a
/// no-op, matching the documented self-loop policy.
fn merge(mut comp: [i8; MAX_FRONTIER], vpos: (usize, usize)) -> [i8; MAX_FRONTIER] {
    let l0 = comp[vpos.0];
    let l1 = comp[vpos.1];
    if l0 != l1 {
        let (winner, loser) = if l0 == 0 {
            (0, l1)
        } else if l1 == 0 {
            (0, l0)
        } else if l0 < l1 {
            (l0, l1)
        } else {
            (l1, l0)
        };
        for slot in comp.iter_mut() {
            if *slot == loser {
                *slot = winner;
            }
        }
    }
    comp
}

/// Exit phase: retires `flve[i]` slots into `numv`, compacts the
/// surviving slots into the `fros[i + 1]` layout via
/// `meta.remap_next[i]`, and renumbers canonically with label 0
/// pinned. Labels that no longer own any live slot are dropped (their
/// retired-vertex counts are discarded) unless the label is 0, which
/// is always carried forward — this is what lets `numv[0]` keep
/// accumulating even once every source-connected vertex has left the
/// frontier.
fn exit(
    comp: [i8; MAX_FRONTIER],
    pred_numv: &[u16; MAX_FRONTIER],
    cnum: u8,
    tt: usize,
    meta: &FrontierMeta,
    i: usize,
    src_final: usize,
) -> Outcome {
    let mut numv_work = *pred_numv;
    for &p in &meta.flve[i] {
        let label = comp[p] as usize;
        numv_work[label] += 1;
    }

    let ll = meta.fros[i + 1].len();
    let mut next_comp = [-1i8; MAX_FRONTIER];
    for p in 0..tt {
        if let Some(np) = meta.remap_next[i][p] {
            next_comp[np] = comp[p];
        }
    }

    let any_zero_live = next_comp[..ll].contains(&0);

    let mut renum = [-1i8; MAX_FRONTIER];
    renum[0] = 0;
    let mut cc_new: i8 = 1;
    for slot in next_comp[..ll].iter_mut() {
        if *slot < 0 {
            continue;
        }
        let old = *slot as usize;
        if renum[old] < 0 {
            renum[old] = cc_new;
            cc_new += 1;
        }
        *slot = renum[old];
    }

    if i >= src_final && !any_zero_live {
        return Outcome::Terminal(numv_work[0] as usize);
    }

    let mut next_numv = [0u16; MAX_FRONTIER];
    for old in 0..cnum as usize {
        let new_label = renum[old];
        if new_label >= 0 {
            next_numv[new_label as usize] += numv_work[old];
        }
    }

    Outcome::Continue(State {
        comp: next_comp,
        numv: next_numv,
        cnum: cc_new as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn root_state_is_canonical_singleton() {
        let root = State::root();
        assert_eq!(root.cnum, 1);
        assert!(root.comp.iter().all(|&c| c == -1));
        assert!(root.numv.iter().all(|&c| c == 0));
    }

    #[test]
    fn single_edge_both_sources_never_prunes_before_src_final() {
        // n=2, edge (1,2) 0-indexed (0,1), both endpoints sources.
        let g = Graph::new(2, vec![(0, 1)]);
        let meta = FrontierMeta::build(&g).unwrap();
        let is_source = vec![true, true];
        let src_final = meta.src_final(&is_source);
        assert_eq!(src_final, 0);

        let result = step(&State::root(), &meta, 0, src_final, &is_source);
        // lo: the two sources remain disconnected, both retire at the
        // only edge, each into its own label-0-or-not component. Since
        // both slots are labeled 0 (both sources), lo is a terminal
        // with k=2.
        match result.lo {
            Outcome::Terminal(k) => assert_eq!(k, 2),
            Outcome::Continue(_) => panic!("expected terminal on lo branch"),
        }
        match result.hi {
            Outcome::Terminal(k) => assert_eq!(k, 2),
            Outcome::Continue(_) => panic!("expected terminal on hi branch"),
        }
    }

    #[test]
    fn merge_prefers_label_zero_over_any_other() {
        let mut comp = [-1i8; MAX_FRONTIER];
        comp[0] = 0;
        comp[1] = 3;
        let merged = merge(comp, (0, 1));
        assert_eq!(merged[0], 0);
        assert_eq!(merged[1], 0);
    }

    #[test]
    fn merge_is_noop_on_self_loop_position() {
        let mut comp = [-1i8; MAX_FRONTIER];
        comp[0] = 2;
        let merged = merge(comp, (0, 0));
        assert_eq!(merged[0], 2);
    }
}
