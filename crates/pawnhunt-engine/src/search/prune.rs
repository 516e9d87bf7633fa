//! The bound predicate deciding whether a node is still worth exploring.

use pawnhunt_core::Board;

/// True when the node at `depth` can no longer beat `best_cost`.
///
/// Holds when even one capture per remaining ply cannot finish sooner than
/// the incumbent, when finishing would overrun the board's depth cutoff, or
/// when the incumbent already sits on the theoretical lower bound. The last
/// clause drains every outstanding task once an optimal solution exists.
pub fn cannot_improve(depth: i32, board: &Board, best_cost: i32) -> bool {
    depth + board.pawn_count() >= best_cost
        || depth + board.pawn_count() > board.max_depth()
        || best_cost == board.min_depth()
}
