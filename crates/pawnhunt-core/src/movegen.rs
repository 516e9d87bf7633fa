//! Candidate move generation, scored and ordered for the search.

use crate::board::Board;
use crate::cell::Cell;
use crate::eval::{bishop_target_score, knight_target_score};
use crate::side::Side;

/// Relative knight jumps, in the order candidates are generated.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
];

/// Bishop ray directions, in the order candidates are generated.
const BISHOP_RAYS: [(i32, i32); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

/// A scored destination square for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub row: i32,
    pub col: i32,
    pub score: i32,
}

/// All legal destinations for `side`, best score first.
///
/// The sort is stable: equally scored candidates keep generation order, so
/// single-threaded searches are fully deterministic.
pub fn candidate_moves(board: &Board, side: Side) -> Vec<Candidate> {
    let mut moves = match side {
        Side::Bishop => bishop_moves(board),
        Side::Knight => knight_moves(board),
    };
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves
}

/// Knight destinations: the eight L-jumps onto empty or pawn cells.
fn knight_moves(board: &Board) -> Vec<Candidate> {
    let knight = board.knight();
    let mut moves = Vec::with_capacity(8);
    for (dr, dc) in KNIGHT_OFFSETS {
        let (row, col) = (knight.row + dr, knight.col + dc);
        if matches!(board.at(row, col), Some(Cell::Empty | Cell::Pawn)) {
            moves.push(Candidate { row, col, score: knight_target_score(board, row, col) });
        }
    }
    moves
}

/// Bishop destinations: walk each diagonal outward. An empty cell is a
/// destination and the ray continues; a pawn is a destination and the ray
/// stops; the knight or the board edge stops the ray with no destination.
fn bishop_moves(board: &Board) -> Vec<Candidate> {
    let bishop = board.bishop();
    let mut moves = Vec::with_capacity(2 * board.side_len().saturating_sub(1));
    for (dr, dc) in BISHOP_RAYS {
        let mut i = 1;
        loop {
            let (row, col) = (bishop.row + i * dr, bishop.col + i * dc);
            match board.at(row, col) {
                Some(Cell::Empty) => {
                    moves.push(Candidate { row, col, score: bishop_target_score(board, row, col) });
                    i += 1;
                }
                Some(Cell::Pawn) => {
                    moves.push(Candidate { row, col, score: bishop_target_score(board, row, col) });
                    break;
                }
                _ => break,
            }
        }
    }
    moves
}
