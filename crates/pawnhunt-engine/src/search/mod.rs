//! Search types and the sequential branch-and-bound driver.

pub mod dfs;
pub mod frontier;
pub mod incumbent;
pub mod pool;
pub mod prune;

use std::sync::atomic::{AtomicU64, Ordering};

use pawnhunt_core::{Board, INF_COST, Move, Side};

use incumbent::Incumbent;

/// Tunables for one search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Depth at or below which child branches spawn as independent tasks.
    pub task_threshold: i32,
    /// Worker threads in the intra-process pool; `None` uses all hardware threads.
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { task_threshold: 4, threads: None }
    }
}

/// A unit of search work: a board plus where in the tree it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subproblem {
    pub board: Board,
    /// Plies between the root of the whole search and this board.
    pub depth: i32,
    /// Side to move at this node.
    pub side: Side,
    /// Best cost known when the subproblem was issued.
    pub bound: i32,
}

impl Subproblem {
    /// The whole puzzle as a single subproblem; the bishop always opens.
    pub fn root(board: Board) -> Subproblem {
        Subproblem { board, depth: 0, side: Side::Bishop, bound: INF_COST }
    }
}

/// Outcome of searching one subproblem.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The incumbent board: the best solved board, or the subproblem's own
    /// board when nothing beat the initial bound.
    pub best: Board,
    /// Committed cost, or the initial bound if no commit happened.
    pub cost: i32,
    /// Search invocations across all tasks, pruned calls included.
    pub nodes: u64,
}

/// Final result of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Move log of the incumbent board; empty when the initial board stands.
    pub moves: Vec<Move>,
    /// Plies in the best capturing sequence, [`INF_COST`] if none was found.
    pub cost: i32,
    /// Total search invocations.
    pub nodes: u64,
}

impl Solution {
    /// Whether a capturing sequence within the depth bound was found.
    pub fn is_solved(&self) -> bool {
        self.cost < INF_COST
    }

    fn from_report(report: SearchReport) -> Solution {
        Solution { moves: report.best.move_log().to_vec(), cost: report.cost, nodes: report.nodes }
    }
}

/// State shared by every task of one search: the incumbent and the call counter.
pub(crate) struct SearchShared {
    pub incumbent: Incumbent,
    pub nodes: AtomicU64,
}

impl SearchShared {
    pub fn new(board: Board, bound: i32) -> SearchShared {
        SearchShared { incumbent: Incumbent::new(board, bound), nodes: AtomicU64::new(0) }
    }

    pub fn into_report(self) -> SearchReport {
        let nodes = self.nodes.load(Ordering::Relaxed);
        let (best, cost) = self.incumbent.into_inner();
        SearchReport { best, cost, nodes }
    }
}

/// Run the whole search depth-first on the calling thread.
pub fn solve_sequential(board: &Board) -> Solution {
    let shared = SearchShared::new(board.clone(), INF_COST);
    dfs::search(&shared, board.clone(), 0, Side::Bishop);
    Solution::from_report(shared.into_report())
}
