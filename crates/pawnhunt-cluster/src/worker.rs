//! The worker loop: receive WORK, run the task-parallel search, answer DONE.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use pawnhunt_engine::{SearchConfig, TaskPool};

use crate::codec;
use crate::error::ClusterError;
use crate::protocol::{Envelope, Frame, Tag, check_payload_len};

/// Per-worker counters reported after shutdown.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WorkerStats {
    /// Subproblems this worker solved.
    pub solved: usize,
    /// Search invocations across those subproblems.
    pub nodes: u64,
}

/// Run one worker until a FINISHED frame arrives.
///
/// A fatal error is delivered to the master through the completion channel
/// and ends the loop; `Err` is returned only when even that delivery is
/// impossible. The worker holds no state between subproblems: each WORK
/// carries its own bound, and no incumbent updates arrive mid-search.
pub(crate) fn run(
    id: usize,
    work_rx: Receiver<Frame>,
    done_tx: Sender<Envelope>,
    config: &SearchConfig,
    max_message_len: usize,
) -> Result<WorkerStats, ClusterError> {
    let mut stats = WorkerStats::default();
    let pool = match TaskPool::new(config) {
        Ok(pool) => pool,
        Err(e) => {
            report(&done_tx, id, Err(e.into()))?;
            return Ok(stats);
        }
    };

    loop {
        let frame = work_rx.recv().map_err(|_| ClusterError::Disconnected { worker: id })?;
        match frame.tag {
            Tag::Work => {
                let sub = match codec::decode_subproblem(&frame.payload) {
                    Ok(sub) => sub,
                    Err(e) => {
                        report(&done_tx, id, Err(e.into()))?;
                        return Ok(stats);
                    }
                };
                debug!(worker = id, depth = sub.depth, bound = sub.bound, "received subproblem");

                let result = pool.search(&sub);
                stats.solved += 1;
                stats.nodes += result.nodes;

                let mut payload = Vec::new();
                codec::encode_board(&result.best, &mut payload);
                if let Err(e) = check_payload_len(payload.len(), max_message_len) {
                    report(&done_tx, id, Err(e))?;
                    return Ok(stats);
                }
                report(&done_tx, id, Ok(Frame::done(payload)))?;
            }
            Tag::Finished => {
                info!(worker = id, solved = stats.solved, nodes = stats.nodes, "worker retiring");
                return Ok(stats);
            }
            Tag::Done => {
                let err = ClusterError::UnexpectedFrame { worker: id, tag: frame.tag };
                report(&done_tx, id, Err(err))?;
                return Ok(stats);
            }
        }
    }
}

fn report(
    done_tx: &Sender<Envelope>,
    worker: usize,
    msg: Result<Frame, ClusterError>,
) -> Result<(), ClusterError> {
    done_tx
        .send(Envelope { worker, msg })
        .map_err(|_| ClusterError::Disconnected { worker })
}
