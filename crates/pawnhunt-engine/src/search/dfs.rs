//! Sequential depth-first branch-and-bound.

use std::sync::atomic::Ordering;

use pawnhunt_core::{Board, Side, candidate_moves};

use crate::search::SearchShared;
use crate::search::prune::cannot_improve;

/// Explore the subtree under `board` on the current thread.
///
/// Every invocation counts one call, pruned calls included. Each child
/// branch gets its own copy of the board; nothing is undone. A solved board
/// is committed under the incumbent lock, which re-checks the bound so a
/// concurrent commit cannot be overwritten by a worse one.
pub(crate) fn search(shared: &SearchShared, board: Board, depth: i32, side: Side) {
    shared.nodes.fetch_add(1, Ordering::Relaxed);

    if cannot_improve(depth, &board, shared.incumbent.cost()) {
        return;
    }
    if board.pawn_count() == 0 {
        shared.incumbent.try_commit(&board, depth);
        return;
    }
    for cand in candidate_moves(&board, side) {
        let mut child = board.clone();
        child.apply(side, cand.row, cand.col);
        search(shared, child, depth + 1, side.flip());
    }
}
