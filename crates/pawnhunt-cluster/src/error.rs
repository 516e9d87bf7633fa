//! Cluster and wire-format errors. Nothing here is retried.

use crate::protocol::Tag;

/// Errors in the flat wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The payload ended before a field could be read.
    #[error("payload ended early: needed {needed} more bytes, {remaining} left")]
    UnexpectedEof {
        /// Bytes the next field requires.
        needed: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },
    /// A grid byte is not a valid cell.
    #[error("invalid cell byte {byte:#04x} in grid")]
    InvalidCell {
        /// The offending byte.
        byte: u8,
    },
    /// The side-to-move byte is neither `S` nor `J`.
    #[error("invalid side byte {byte:#04x}")]
    InvalidSide {
        /// The offending byte.
        byte: u8,
    },
    /// A piece record carries a type byte that is not `S` or `J`.
    #[error("invalid piece type byte {byte:#04x}")]
    InvalidPieceType {
        /// The offending byte.
        byte: u8,
    },
    /// A length field is negative.
    #[error("negative length field: {field} = {value}")]
    NegativeLength {
        /// Which field.
        field: &'static str,
        /// The decoded value.
        value: i32,
    },
    /// The cell-count field does not equal the squared side length.
    #[error("grid length {size} does not match side length {row_len}")]
    DimensionMismatch {
        /// The decoded cell count.
        size: i32,
        /// The decoded side length.
        row_len: i32,
    },
    /// Bytes were left over after the payload was fully decoded.
    #[error("{trailing} trailing bytes after payload")]
    TrailingBytes {
        /// Number of unread bytes.
        trailing: usize,
    },
    /// The decoded board fails structural validation.
    #[error("decoded board is invalid: {source}")]
    Board {
        /// The underlying validation error.
        #[from]
        source: pawnhunt_core::BoardError,
    },
}

/// Fatal cluster failures.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// The configuration names zero workers.
    #[error("cluster needs at least one worker")]
    NoWorkers,
    /// A worker's channel closed while traffic was still expected.
    #[error("worker {worker} channel closed unexpectedly")]
    Disconnected {
        /// The worker's index.
        worker: usize,
    },
    /// The completion channel closed before every dispatch was answered.
    #[error("completion channel closed with {outstanding} subproblems outstanding")]
    MasterDisconnected {
        /// Dispatches still awaiting a reply.
        outstanding: usize,
    },
    /// A message payload exceeds the configured receive buffer.
    #[error("message payload of {len} bytes exceeds the {max}-byte limit")]
    OversizedPayload {
        /// The payload's size.
        len: usize,
        /// The configured limit.
        max: usize,
    },
    /// A frame arrived with a tag its receiver never accepts.
    #[error("worker {worker} saw unexpected {tag:?} frame")]
    UnexpectedFrame {
        /// The worker index involved.
        worker: usize,
        /// The offending tag.
        tag: Tag,
    },
    /// A worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// The worker's index.
        worker: usize,
    },
    /// The per-worker search pool could not be built.
    #[error(transparent)]
    Engine(#[from] pawnhunt_engine::EngineError),
    /// A payload failed to decode.
    #[error(transparent)]
    Wire(#[from] WireError),
}
