//! The puzzle board: grid, piece positions, pawn count, and move log.

use std::fmt;

use crate::cell::Cell;
use crate::error::BoardError;
use crate::moves::Move;
use crate::piece::Piece;
use crate::side::Side;

/// Cost sentinel for "no capturing sequence": the board still has pawns.
pub const INF_COST: i32 = i32::MAX;

/// Complete state of one search node.
///
/// Mutation goes through [`apply`](Board::apply) only. The search clones the
/// board before every move and explores each branch on its own copy, so no
/// undo exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Side length of the square grid.
    n: usize,
    /// Row-major cells, `n * n` entries.
    grid: Vec<Cell>,
    bishop: Piece,
    knight: Piece,
    /// Number of pawn cells remaining.
    pawn_cnt: i32,
    /// Lower bound on any solution: the initial pawn count.
    min_depth: i32,
    /// Caller-supplied depth cutoff.
    max_depth: i32,
    /// Every move applied since the initial snapshot, in order.
    move_log: Vec<Move>,
}

impl Board {
    /// Assemble a board from raw parts, checking the structural invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        n: usize,
        grid: Vec<Cell>,
        bishop: Piece,
        knight: Piece,
        pawn_cnt: i32,
        min_depth: i32,
        max_depth: i32,
        move_log: Vec<Move>,
    ) -> Result<Board, BoardError> {
        let board = Board { n, grid, bishop, knight, pawn_cnt, min_depth, max_depth, move_log };
        board.validate()?;
        Ok(board)
    }

    /// Check the structural invariants.
    ///
    /// A violation on a board the search built itself is a bug; on a decoded
    /// payload it means corruption. Either way the caller must abort.
    pub fn validate(&self) -> Result<(), BoardError> {
        let expected = self.n * self.n;
        if self.grid.len() != expected {
            return Err(BoardError::GridSize {
                side_len: self.n,
                expected,
                found: self.grid.len(),
            });
        }
        if self.min_depth < 0 || self.max_depth < 0 {
            return Err(BoardError::NegativeDepth {
                min_depth: self.min_depth,
                max_depth: self.max_depth,
            });
        }
        for (cell, kind) in [(Cell::Bishop, "bishop"), (Cell::Knight, "knight")] {
            let count = self.grid.iter().filter(|&&c| c == cell).count();
            if count != 1 {
                return Err(BoardError::PieceCount { kind, count });
            }
        }
        for (piece, cell, kind) in [
            (self.bishop, Cell::Bishop, "bishop"),
            (self.knight, Cell::Knight, "knight"),
        ] {
            if piece.kind != cell {
                return Err(BoardError::PieceType { kind });
            }
            if self.at(piece.row, piece.col) != Some(cell) {
                return Err(BoardError::PiecePosition { kind, row: piece.row, col: piece.col });
            }
        }
        let counted = self.grid.iter().filter(|&&c| c == Cell::Pawn).count() as i32;
        if counted != self.pawn_cnt {
            return Err(BoardError::PawnCount { recorded: self.pawn_cnt, counted });
        }
        Ok(())
    }

    /// Side length of the grid.
    pub fn side_len(&self) -> usize {
        self.n
    }

    /// Pawn cells remaining.
    pub fn pawn_count(&self) -> i32 {
        self.pawn_cnt
    }

    /// Lower bound on any solution: each ply captures at most one pawn.
    pub fn min_depth(&self) -> i32 {
        self.min_depth
    }

    /// Caller-supplied depth cutoff.
    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    pub fn bishop(&self) -> Piece {
        self.bishop
    }

    pub fn knight(&self) -> Piece {
        self.knight
    }

    /// Moves applied since the initial snapshot, in order.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Row-major cell array.
    pub fn cells(&self) -> &[Cell] {
        &self.grid
    }

    /// Cell at `(row, col)`, or `None` off the board.
    pub fn at(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.n as i32 || col >= self.n as i32 {
            return None;
        }
        Some(self.grid[row as usize * self.n + col as usize])
    }

    /// Move the piece of `side` to `(row, col)`.
    ///
    /// Raw mutator: legality is the move generator's responsibility. Updates
    /// the grid, the piece position, the pawn count, and the move log.
    pub fn apply(&mut self, side: Side, row: i32, col: i32) {
        debug_assert!(
            matches!(self.at(row, col), Some(Cell::Empty | Cell::Pawn)),
            "illegal destination ({row},{col})"
        );
        let took_pawn = self.at(row, col) == Some(Cell::Pawn);
        self.move_log.push(Move { row, col, took_pawn });
        if took_pawn {
            self.pawn_cnt -= 1;
        }
        let piece = match side {
            Side::Bishop => &mut self.bishop,
            Side::Knight => &mut self.knight,
        };
        let (from_row, from_col) = (piece.row, piece.col);
        piece.row = row;
        piece.col = col;
        self.set_at(row, col, side.cell());
        self.set_at(from_row, from_col, Cell::Empty);
    }

    /// Move the bishop to `(row, col)`.
    pub fn apply_bishop_move(&mut self, row: i32, col: i32) {
        self.apply(Side::Bishop, row, col);
    }

    /// Move the knight to `(row, col)`.
    pub fn apply_knight_move(&mut self, row: i32, col: i32) {
        self.apply(Side::Knight, row, col);
    }

    /// Length of the capturing sequence, or [`INF_COST`] while pawns remain.
    pub fn path_len(&self) -> i32 {
        if self.pawn_cnt != 0 { INF_COST } else { self.move_log.len() as i32 }
    }

    fn set_at(&mut self, row: i32, col: i32, value: Cell) {
        self.grid[row as usize * self.n + col as usize] = value;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "side length: {}", self.n)?;
        writeln!(f, "min depth: {}, max depth: {}", self.min_depth, self.max_depth)?;
        writeln!(f, "knight at ({},{})", self.knight.row, self.knight.col)?;
        writeln!(f, "bishop at ({},{})", self.bishop.row, self.bishop.col)?;
        writeln!(f, "pawns: {}", self.pawn_cnt)?;
        for (i, cell) in self.grid.iter().enumerate() {
            write!(f, "{}", cell.as_char())?;
            if (i + 1) % self.n != 0 {
                write!(f, " | ")?;
            } else {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, INF_COST};
    use crate::cell::Cell;
    use crate::error::BoardError;
    use crate::piece::Piece;
    use crate::side::Side;

    fn small_board() -> Board {
        "5 4\n\
         SP---\n\
         -----\n\
         --J--\n\
         -----\n\
         -----\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn at_reads_grid_and_bounds() {
        let board = small_board();
        assert_eq!(board.at(0, 0), Some(Cell::Bishop));
        assert_eq!(board.at(0, 1), Some(Cell::Pawn));
        assert_eq!(board.at(2, 2), Some(Cell::Knight));
        assert_eq!(board.at(1, 1), Some(Cell::Empty));
        assert_eq!(board.at(-1, 0), None);
        assert_eq!(board.at(0, 5), None);
        assert_eq!(board.at(5, 0), None);
    }

    #[test]
    fn apply_updates_grid_piece_and_log() {
        let mut board = small_board();
        board.apply_bishop_move(1, 1);
        assert_eq!(board.at(0, 0), Some(Cell::Empty));
        assert_eq!(board.at(1, 1), Some(Cell::Bishop));
        assert_eq!(board.bishop().row, 1);
        assert_eq!(board.bishop().col, 1);
        assert_eq!(board.move_log().len(), 1);
        assert!(!board.move_log()[0].took_pawn);
        board.validate().unwrap();
    }

    #[test]
    fn capture_decrements_pawn_count() {
        let mut board = small_board();
        board.apply_bishop_move(1, 1);
        board.apply_knight_move(0, 1);
        assert_eq!(board.pawn_count(), 0);
        assert!(board.move_log()[1].took_pawn);
        board.validate().unwrap();
    }

    #[test]
    fn path_len_is_infinite_until_pawns_are_gone() {
        let mut board = small_board();
        assert_eq!(board.path_len(), INF_COST);
        board.apply_bishop_move(1, 1);
        assert_eq!(board.path_len(), INF_COST);
        board.apply_knight_move(0, 1);
        assert_eq!(board.path_len(), 2);
    }

    #[test]
    fn clones_are_independent() {
        let board = small_board();
        let mut copy = board.clone();
        copy.apply_bishop_move(1, 1);
        assert_eq!(board.at(0, 0), Some(Cell::Bishop));
        assert_eq!(board.move_log().len(), 0);
        assert_eq!(copy.move_log().len(), 1);
    }

    #[test]
    fn from_raw_rejects_wrong_pawn_count() {
        let board = small_board();
        let err = Board::from_raw(
            board.side_len(),
            board.cells().to_vec(),
            board.bishop(),
            board.knight(),
            board.pawn_count() + 1,
            board.min_depth(),
            board.max_depth(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::PawnCount { .. }));
    }

    #[test]
    fn from_raw_rejects_stale_piece_position() {
        let board = small_board();
        let err = Board::from_raw(
            board.side_len(),
            board.cells().to_vec(),
            Piece::new(4, 4, Cell::Bishop),
            board.knight(),
            board.pawn_count(),
            board.min_depth(),
            board.max_depth(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::PiecePosition { kind: "bishop", .. }));
    }

    #[test]
    fn from_raw_rejects_wrong_grid_size() {
        let board = small_board();
        let err = Board::from_raw(
            4,
            board.cells().to_vec(),
            board.bishop(),
            board.knight(),
            board.pawn_count(),
            board.min_depth(),
            board.max_depth(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::GridSize { .. }));
    }

    #[test]
    fn apply_dispatches_by_side() {
        let mut board = small_board();
        board.apply(Side::Bishop, 1, 1);
        board.apply(Side::Knight, 0, 1);
        assert_eq!(board.knight().row, 0);
        assert_eq!(board.knight().col, 1);
    }

    #[test]
    fn display_renders_grid_rows() {
        let board = small_board();
        let text = format!("{board}");
        assert!(text.contains("side length: 5"));
        assert!(text.contains("S | P | - | - | -"));
        assert!(text.contains("pawns: 1"));
    }
}
