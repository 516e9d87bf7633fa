//! Frontier expansion: the root unrolled a fixed number of plies into
//! distributable subproblems.

use tracing::debug;

use pawnhunt_core::{Board, INF_COST, candidate_moves};

use crate::search::Subproblem;

/// Default number of expansion plies.
pub const DEFAULT_FRONTIER_PLIES: u32 = 3;

/// The distributable work derived from a root subproblem.
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Every node exactly `plies` below the root, in expansion order.
    pub entries: Vec<Subproblem>,
    /// A zero-pawn board met on a level before the last, if any.
    pub early: Option<Board>,
}

/// Expand `root` breadth-first for `plies` plies.
///
/// Each level before the last is scanned for an already-solved board; the
/// first level holding one supplies `early`. Expansion still runs to the
/// full depth either way, so the frontier stays complete: the subtrees
/// rooted at the entries cover exactly the continuations of the root beyond
/// `plies` plies, each board appearing once.
pub fn generate_frontier(root: Subproblem, plies: u32) -> Frontier {
    let mut level = vec![root];
    let mut early: Option<Board> = None;

    for _ in 0..plies {
        let mut next = Vec::new();
        for sub in &level {
            for cand in candidate_moves(&sub.board, sub.side) {
                let mut child = sub.board.clone();
                child.apply(sub.side, cand.row, cand.col);
                next.push(Subproblem {
                    board: child,
                    depth: sub.depth + 1,
                    side: sub.side.flip(),
                    bound: INF_COST,
                });
            }
        }
        if early.is_none() {
            for sub in &level {
                if sub.board.pawn_count() == 0 {
                    early = Some(sub.board.clone());
                }
            }
        }
        level = next;
    }

    debug!(entries = level.len(), early = early.is_some(), "frontier generated");
    Frontier { entries: level, early }
}

#[cfg(test)]
mod tests {
    use super::{Frontier, generate_frontier};
    use crate::search::Subproblem;
    use pawnhunt_core::{Board, Side};

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn frontier(b: &Board, plies: u32) -> Frontier {
        generate_frontier(Subproblem::root(b.clone()), plies)
    }

    #[test]
    fn one_ply_frontier_lists_the_bishop_moves() {
        // The bishop's only move is (1,1): the knight truncates the diagonal
        let b = board("5 4\nSP---\n-----\n--J--\n-----\n-----\n");
        let f = frontier(&b, 1);
        assert!(f.early.is_none());
        assert_eq!(f.entries.len(), 1);
        let entry = &f.entries[0];
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.side, Side::Knight);
        assert_eq!(entry.board.bishop().row, 1);
        assert_eq!(entry.board.bishop().col, 1);
        assert_eq!(entry.board.move_log().len(), 1);
    }

    #[test]
    fn levels_alternate_sides() {
        let b = board("5 4\nSP---\n-----\n--J--\n-----\n-----\n");
        let f = frontier(&b, 2);
        assert!(f.entries.iter().all(|e| e.side == Side::Bishop && e.depth == 2));
    }

    #[test]
    fn pawnless_root_yields_an_early_solution() {
        let b = board("3 0\nS--\n---\n--J\n");
        let f = frontier(&b, 3);
        let early = f.early.expect("level 0 already has no pawns");
        assert_eq!(early.path_len(), 0);
        // The frontier is still produced for distribution
        assert!(!f.entries.is_empty());
    }

    #[test]
    fn entry_count_is_the_product_of_branching() {
        // Bishop at (2,2): three open rays of two squares each, and the
        // down-left ray truncated to one by the knight at (4,0)
        let b = board("5 10\n-----\n-----\n--S--\n-----\nJ---P\n");
        let f = frontier(&b, 1);
        assert_eq!(f.entries.len(), 7);
        let total: usize = f
            .entries
            .iter()
            .map(|e| pawnhunt_core::candidate_moves(&e.board, e.side).len())
            .sum();
        assert_eq!(frontier(&b, 2).entries.len(), total);
    }

    #[test]
    fn zero_plies_returns_the_root_itself() {
        let b = board("3 0\nS--\n---\n--J\n");
        let f = frontier(&b, 0);
        assert_eq!(f.entries.len(), 1);
        assert!(f.early.is_none());
        assert_eq!(f.entries[0].depth, 0);
    }
}
