//! Target-square scoring that steers the search toward early captures.
//!
//! The weights are fixed small integers; there is no tuning at runtime.

use crate::board::Board;
use crate::cell::Cell;
use crate::movegen::KNIGHT_OFFSETS;

/// Score a knight destination: 3 captures a pawn now, 2 can capture on the
/// next knight move, 1 lands adjacent to a pawn, 0 otherwise.
pub fn knight_target_score(board: &Board, row: i32, col: i32) -> i32 {
    if board.at(row, col) == Some(Cell::Pawn) {
        return 3;
    }
    for (dr, dc) in KNIGHT_OFFSETS {
        if board.at(row + dr, col + dc) == Some(Cell::Pawn) {
            return 2;
        }
    }
    for dr in -1..=1 {
        for dc in -1..=1 {
            if (dr, dc) != (0, 0) && board.at(row + dr, col + dc) == Some(Cell::Pawn) {
                return 1;
            }
        }
    }
    0
}

/// Score a bishop destination: 2 captures a pawn now, 1 sees a pawn along a
/// diagonal, 0 otherwise. Rays stop only at the knight or the board edge.
pub fn bishop_target_score(board: &Board, row: i32, col: i32) -> i32 {
    if board.at(row, col) == Some(Cell::Pawn) {
        return 2;
    }
    for (dr, dc) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        if ray_sees_pawn(board, row, col, dr, dc) {
            return 1;
        }
    }
    0
}

fn ray_sees_pawn(board: &Board, row: i32, col: i32, dr: i32, dc: i32) -> bool {
    let mut i = 1;
    loop {
        match board.at(row + i * dr, col + i * dc) {
            Some(Cell::Pawn) => return true,
            None | Some(Cell::Knight) => return false,
            _ => i += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{bishop_target_score, knight_target_score};
    use crate::board::Board;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn knight_scores_capture_highest() {
        let b = board("5 10\nS----\n-----\n--J--\n-----\n---P-\n");
        // (4,3) holds the pawn itself
        assert_eq!(knight_target_score(&b, 4, 3), 3);
        // (2,2) is a knight jump away from (4,3)
        assert_eq!(knight_target_score(&b, 2, 2), 2);
        // (3,3) is king-adjacent to (4,3) but no jump reaches it
        assert_eq!(knight_target_score(&b, 3, 3), 1);
        // (0,1) sees nothing
        assert_eq!(knight_target_score(&b, 0, 1), 0);
    }

    #[test]
    fn bishop_scores_capture_then_vision() {
        let b = board("5 10\nS----\n-----\n--J--\n-----\n----P\n");
        assert_eq!(bishop_target_score(&b, 4, 4), 2);
        // (3,3): the down-right diagonal reaches the pawn at (4,4)
        assert_eq!(bishop_target_score(&b, 3, 3), 1);
        // (0,1): diagonals run to (1,0), (1,2)->(2,3)->(3,4); no pawn seen
        assert_eq!(bishop_target_score(&b, 0, 1), 0);
    }

    #[test]
    fn bishop_vision_blocked_by_knight() {
        // Pawn sits behind the knight on the same diagonal from (0,0)
        let b = board("5 10\nS----\n-----\n--J--\n-----\n----P\n");
        assert_eq!(bishop_target_score(&b, 0, 0), 0);
        // From (1,1) the ray hits the knight at (2,2) first as well
        assert_eq!(bishop_target_score(&b, 1, 1), 0);
    }
}
