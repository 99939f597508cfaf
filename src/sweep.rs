//! C4 — Probability Sweeper.
//!
//! Forward-propagates probability mass through the built layers,
//! accumulating terminal mass directly into the output histogram.
//! Accumulation order is layer-by-layer, block-by-block — the same
//! order `dp` was built in — and must not be reassociated: reordering
//! the additions changes which floating-point rounding errors
//! accumulate where, so reproducing a result bit-for-bit depends on
//! this exact order, not just on the final sums.

use crate::dp::Layers;

/// Computes `res[0..=n]`, the histogram of source-connected vertex
/// counts, given the built layers and per-edge survival
/// probabilities `pi[0..m)`.
///
/// `dp.dp[0][0].p` is seeded to 1 (all probability mass starts at the
/// root) before the sweep begins; layers are consumed in increasing
/// `i` and blocks within a layer in id order, matching `dp`'s own
/// construction order.
pub fn sweep(mut layers: Layers, pi: &[f64], n: usize) -> Vec<f64> {
    let mut res = vec![0.0f64; n + 1];
    layers.dp[0][0].p = 1.0;

    for (i, &p_edge) in pi.iter().enumerate() {
        // DpBlock is Copy; a snapshot of this layer's blocks lets the
        // loop body freely mutate layer i+1 without fighting the
        // borrow checker over two indices of the same Vec<Vec<_>>.
        let cur_blocks = layers.dp[i].clone();

        for block in cur_blocks {
            let p_lo = (1.0 - p_edge) * block.p;
            let p_hi = p_edge * block.p;

            match block.lo {
                id if id >= 0 => layers.dp[i + 1][id as usize].p += p_lo,
                id => res[terminal_count(id)] += p_lo,
            }
            match block.hi {
                id if id >= 0 => layers.dp[i + 1][id as usize].p += p_hi,
                id => res[terminal_count(id)] += p_hi,
            }
        }
    }

    res
}

fn terminal_count(id: i64) -> usize {
    (-(id + 1)) as usize
}
