//! The master scheduler: frontier pool, on-demand dispatch, incumbent
//! aggregation, and worker retirement.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use pawnhunt_core::{Board, INF_COST};
use pawnhunt_engine::{Solution, Subproblem, generate_frontier};

use crate::codec;
use crate::error::ClusterError;
use crate::protocol::{Envelope, Frame, Tag, check_payload_len};
use crate::{ClusterConfig, ClusterOutcome, ClusterStats};

/// Run the scheduler event loop on the calling thread.
///
/// Dispatches one frontier entry per idle worker, drains completions from
/// whichever worker answers first, tightens the incumbent, and retires each
/// worker with FINISHED once the frontier is exhausted. Every WORK embeds
/// the best cost known at dispatch time; the master's view of that cost
/// only ever decreases.
pub(crate) fn run(
    board: &Board,
    config: &ClusterConfig,
    inboxes: &[Sender<Frame>],
    done_rx: &Receiver<Envelope>,
) -> Result<ClusterOutcome, ClusterError> {
    let frontier = generate_frontier(Subproblem::root(board.clone()), config.frontier_plies);
    let mut best_board = board.clone();
    let mut best_cost = INF_COST;

    // Record the early solution's cost right away; the frontier is still
    // distributed so workers can improve on it under that bound.
    if let Some(early) = frontier.early {
        best_cost = early.path_len();
        best_board = early;
        info!(cost = best_cost, "early solution found during frontier expansion");
    }

    let entries = frontier.entries;
    let mut stats = ClusterStats { frontier_len: entries.len(), ..ClusterStats::default() };
    info!(workers = inboxes.len(), frontier = entries.len(), "dispatching frontier");

    let mut head = 0;
    let mut retired = 0;

    for (worker, tx) in inboxes.iter().enumerate() {
        if head < entries.len() {
            dispatch(tx, worker, &entries[head], best_cost, config.max_message_len, &mut stats)?;
            head += 1;
        } else {
            send(tx, worker, Frame::finished(best_cost))?;
            retired += 1;
        }
    }

    while retired < inboxes.len() {
        let envelope = done_rx
            .recv()
            .map_err(|_| ClusterError::MasterDisconnected { outstanding: head - stats.completions })?;
        let frame = envelope.msg?;
        if frame.tag != Tag::Done {
            return Err(ClusterError::UnexpectedFrame { worker: envelope.worker, tag: frame.tag });
        }
        check_payload_len(frame.payload.len(), config.max_message_len)?;
        let solved = codec::decode_board(&frame.payload)?;
        stats.completions += 1;

        let cost = solved.path_len();
        debug!(worker = envelope.worker, cost, best = best_cost, "received solved subproblem");
        if cost < best_cost {
            best_cost = cost;
            best_board = solved;
        }

        let tx = &inboxes[envelope.worker];
        if head < entries.len() {
            dispatch(tx, envelope.worker, &entries[head], best_cost, config.max_message_len, &mut stats)?;
            head += 1;
        } else {
            send(tx, envelope.worker, Frame::finished(best_cost))?;
            retired += 1;
        }
    }

    let solution =
        Solution { moves: best_board.move_log().to_vec(), cost: best_cost, nodes: 0 };
    Ok(ClusterOutcome { solution, stats })
}

fn dispatch(
    tx: &Sender<Frame>,
    worker: usize,
    entry: &Subproblem,
    best_cost: i32,
    max_len: usize,
    stats: &mut ClusterStats,
) -> Result<(), ClusterError> {
    let sub = Subproblem { bound: best_cost, ..entry.clone() };
    let mut payload = Vec::new();
    codec::encode_subproblem(&sub, &mut payload);
    check_payload_len(payload.len(), max_len)?;
    debug!(worker, depth = sub.depth, bound = best_cost, bytes = payload.len(), "dispatching subproblem");
    stats.dispatched_bounds.push(best_cost);
    tx.send(Frame::work(payload)).map_err(|_| ClusterError::Disconnected { worker })
}

fn send(tx: &Sender<Frame>, worker: usize, frame: Frame) -> Result<(), ClusterError> {
    tx.send(frame).map_err(|_| ClusterError::Disconnected { worker })
}
