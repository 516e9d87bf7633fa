//! The shared best-solution record.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use pawnhunt_core::Board;

use crate::search::prune::cannot_improve;

/// Best solution shared by every task of one search.
///
/// `cost` mirrors the committed cost so pruning can read the bound without
/// taking the lock. A stale read only causes extra exploration, never a
/// wrong result: [`try_commit`](Incumbent::try_commit) re-checks under the
/// lock before writing.
pub struct Incumbent {
    cost: AtomicI32,
    best: Mutex<Board>,
}

impl Incumbent {
    /// Start from `board` with `bound` as the cost to beat.
    pub fn new(board: Board, bound: i32) -> Incumbent {
        Incumbent { cost: AtomicI32::new(bound), best: Mutex::new(board) }
    }

    /// Current best cost; may be stale by the time the caller acts on it.
    pub fn cost(&self) -> i32 {
        self.cost.load(Ordering::Relaxed)
    }

    /// Commit `board` as the best solution at `depth` plies, unless a
    /// concurrent commit already made it obsolete. Returns whether the
    /// commit happened.
    pub fn try_commit(&self, board: &Board, depth: i32) -> bool {
        let mut best = self.best.lock().expect("incumbent mutex poisoned");
        if cannot_improve(depth, board, self.cost()) {
            return false;
        }
        self.cost.store(depth, Ordering::Relaxed);
        *best = board.clone();
        true
    }

    /// Tear down into the final `(board, cost)` pair.
    pub fn into_inner(self) -> (Board, i32) {
        let cost = self.cost.load(Ordering::Relaxed);
        let board = self.best.into_inner().expect("incumbent mutex poisoned");
        (board, cost)
    }
}

#[cfg(test)]
mod tests {
    use super::Incumbent;
    use pawnhunt_core::{Board, INF_COST};

    /// A solved two-ply board: bishop to (1,1), knight takes (0,1).
    fn solved_board() -> Board {
        let mut board: Board = "5 4\nSP---\n-----\n--J--\n-----\n-----\n".parse().unwrap();
        board.apply_bishop_move(1, 1);
        board.apply_knight_move(0, 1);
        board
    }

    #[test]
    fn commit_improves_on_infinity() {
        let solved = solved_board();
        let incumbent = Incumbent::new(solved.clone(), INF_COST);
        assert!(incumbent.try_commit(&solved, 2));
        assert_eq!(incumbent.cost(), 2);
    }

    #[test]
    fn recommit_at_equal_cost_is_rejected() {
        let solved = solved_board();
        let incumbent = Incumbent::new(solved.clone(), INF_COST);
        assert!(incumbent.try_commit(&solved, 2));
        assert!(!incumbent.try_commit(&solved, 2));
        assert_eq!(incumbent.cost(), 2);
    }

    #[test]
    fn commit_never_raises_the_cost() {
        let solved = solved_board();
        let incumbent = Incumbent::new(solved.clone(), 2);
        assert!(!incumbent.try_commit(&solved, 3));
        assert_eq!(incumbent.cost(), 2);
    }

    #[test]
    fn into_inner_returns_the_committed_board() {
        let solved = solved_board();
        let initial: Board = "5 4\nSP---\n-----\n--J--\n-----\n-----\n".parse().unwrap();
        let incumbent = Incumbent::new(initial, INF_COST);
        incumbent.try_commit(&solved, 2);
        let (board, cost) = incumbent.into_inner();
        assert_eq!(cost, 2);
        assert_eq!(board, solved);
    }
}
