//! Master/worker distribution of the branch-and-bound search.
//!
//! One master owns the frontier of subproblems and hands them out on
//! demand; each worker runs the task-parallel search on whatever it is
//! given and sends the solved board back. The cluster is simulated
//! in-process: every worker is a thread with its own inbox channel, and
//! completions drain through a single shared channel so the master never
//! waits on a particular worker. Messages are the same tagged byte frames
//! an out-of-process transport would carry.

mod codec;
mod error;
mod master;
mod protocol;
mod worker;

pub use codec::{decode_board, decode_subproblem, encode_board, encode_subproblem};
pub use error::{ClusterError, WireError};
pub use protocol::{Frame, Tag};

use std::thread;

use crossbeam_channel::unbounded;
use tracing::info;

use pawnhunt_core::Board;
use pawnhunt_engine::{DEFAULT_FRONTIER_PLIES, SearchConfig, Solution};

use protocol::Envelope;

/// Cluster shape and limits.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Number of worker threads; the master runs on the calling thread.
    pub workers: usize,
    /// BFS plies used to build the frontier.
    pub frontier_plies: u32,
    /// Per-worker search tunables.
    pub search: SearchConfig,
    /// Upper bound on a single message payload, in bytes.
    pub max_message_len: usize,
}

impl ClusterConfig {
    /// A cluster of `workers` workers with default tunables.
    pub fn new(workers: usize) -> ClusterConfig {
        ClusterConfig {
            workers,
            frontier_plies: DEFAULT_FRONTIER_PLIES,
            search: SearchConfig::default(),
            max_message_len: 1_000_000,
        }
    }
}

/// Counters describing one cluster run.
#[derive(Debug, Clone, Default)]
pub struct ClusterStats {
    /// Number of subproblems in the frontier.
    pub frontier_len: usize,
    /// The bound embedded in each WORK message, in dispatch order.
    pub dispatched_bounds: Vec<i32>,
    /// DONE messages the master consumed.
    pub completions: usize,
    /// Search invocations summed over all workers.
    pub nodes: u64,
}

/// A finished cluster run.
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub solution: Solution,
    pub stats: ClusterStats,
}

/// Solve `board` with one master and `config.workers` workers.
///
/// Fatal errors (transport failures, malformed or oversized payloads,
/// invariant violations in decoded boards) abort the run and surface
/// here. An exhausted search without improvement is not an error: the
/// solution simply keeps the initial board's (empty) move log and an
/// infinite cost.
pub fn solve(board: &Board, config: &ClusterConfig) -> Result<ClusterOutcome, ClusterError> {
    if config.workers == 0 {
        return Err(ClusterError::NoWorkers);
    }

    thread::scope(|scope| {
        let (done_tx, done_rx) = unbounded::<Envelope>();
        let mut inboxes = Vec::with_capacity(config.workers);
        let mut handles = Vec::with_capacity(config.workers);

        for id in 0..config.workers {
            let (work_tx, work_rx) = unbounded::<Frame>();
            let done_tx = done_tx.clone();
            let search = config.search.clone();
            let max_len = config.max_message_len;
            inboxes.push(work_tx);
            handles.push(scope.spawn(move || worker::run(id, work_rx, done_tx, &search, max_len)));
        }
        drop(done_tx);

        let master_result = master::run(board, config, &inboxes, &done_rx);
        // Closing the inboxes unblocks any worker still waiting for a frame
        drop(inboxes);
        let mut outcome = master_result?;

        for (id, handle) in handles.into_iter().enumerate() {
            let stats =
                handle.join().map_err(|_| ClusterError::WorkerPanicked { worker: id })??;
            outcome.stats.nodes += stats.nodes;
        }
        outcome.solution.nodes = outcome.stats.nodes;

        info!(
            cost = outcome.solution.cost,
            nodes = outcome.stats.nodes,
            frontier = outcome.stats.frontier_len,
            "cluster solve finished"
        );
        Ok(outcome)
    })
}
