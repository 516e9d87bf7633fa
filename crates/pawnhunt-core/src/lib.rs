//! Core puzzle types: board representation, move generation, and candidate scoring.

mod board;
mod cell;
mod error;
mod eval;
mod movegen;
mod moves;
mod parse;
mod piece;
mod side;

pub use board::{Board, INF_COST};
pub use cell::Cell;
pub use error::{BoardError, ParseError};
pub use eval::{bishop_target_score, knight_target_score};
pub use movegen::{Candidate, KNIGHT_OFFSETS, candidate_moves};
pub use moves::Move;
pub use piece::Piece;
pub use side::Side;
