//! Task-parallel branch-and-bound on a rayon pool.

use std::sync::atomic::Ordering;

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use pawnhunt_core::{Board, Side, candidate_moves};

use crate::search::prune::cannot_improve;
use crate::search::{SearchConfig, SearchReport, SearchShared, Solution, Subproblem, dfs};

/// Errors from setting up the search pool.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The worker thread pool could not be built.
    #[error("failed to build search thread pool: {source}")]
    ThreadPool {
        /// The underlying rayon error.
        #[from]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Shared-memory task-parallel searcher.
///
/// Child branches fan out as detached tasks while `depth <= task_threshold`,
/// then the recursion continues sequentially on whichever thread picked the
/// task up. Tasks share only the incumbent and the call counter; the scope
/// joining is the only termination barrier.
pub struct TaskPool {
    pool: ThreadPool,
    task_threshold: i32,
}

impl TaskPool {
    /// Build a pool for `config`; `threads: None` sizes it to the hardware.
    pub fn new(config: &SearchConfig) -> Result<TaskPool, EngineError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads.unwrap_or(0))
            .build()?;
        Ok(TaskPool { pool, task_threshold: config.task_threshold })
    }

    /// Solve the whole puzzle from its initial board.
    pub fn solve(&self, board: &Board) -> Solution {
        let report = self.search(&Subproblem::root(board.clone()));
        Solution { moves: report.best.move_log().to_vec(), cost: report.cost, nodes: report.nodes }
    }

    /// Search one subproblem; the embedded bound seeds the incumbent.
    ///
    /// The report's board equals the subproblem's own board when nothing
    /// beat the seed bound.
    pub fn search(&self, sub: &Subproblem) -> SearchReport {
        let shared = SearchShared::new(sub.board.clone(), sub.bound);
        let threshold = self.task_threshold;
        self.pool.install(|| {
            rayon::scope(|scope| {
                search_task(scope, &shared, sub.board.clone(), sub.depth, sub.side, threshold);
            });
        });
        let report = shared.into_report();
        debug!(depth = sub.depth, cost = report.cost, nodes = report.nodes, "subproblem searched");
        report
    }
}

/// Task-spawning recursion. Mirrors [`dfs::search`] except that children
/// at or below the threshold become detached tasks on the scope.
fn search_task<'s>(
    scope: &Scope<'s>,
    shared: &'s SearchShared,
    board: Board,
    depth: i32,
    side: Side,
    threshold: i32,
) {
    shared.nodes.fetch_add(1, Ordering::Relaxed);

    if cannot_improve(depth, &board, shared.incumbent.cost()) {
        return;
    }
    if board.pawn_count() == 0 {
        shared.incumbent.try_commit(&board, depth);
        return;
    }
    let spawn = depth <= threshold;
    for cand in candidate_moves(&board, side) {
        let mut child = board.clone();
        child.apply(side, cand.row, cand.col);
        if spawn {
            scope.spawn(move |scope| search_task(scope, shared, child, depth + 1, side.flip(), threshold));
        } else {
            dfs::search(shared, child, depth + 1, side.flip());
        }
    }
}
