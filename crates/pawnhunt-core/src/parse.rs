//! Board-file parsing: an `N max_depth` header, then `N` rows of cells.

use std::str::FromStr;

use tracing::debug;

use crate::board::Board;
use crate::cell::Cell;
use crate::error::{BoardError, ParseError};
use crate::piece::Piece;

impl FromStr for Board {
    type Err = ParseError;

    /// Parse the text form of a board.
    ///
    /// The first two whitespace-separated tokens are the side length and the
    /// maximum depth. The grid follows, read cell by cell with `\n` and `\r`
    /// skipped; it must describe exactly `N²` cells with one bishop (`S`) and
    /// one knight (`J`).
    fn from_str(input: &str) -> Result<Board, ParseError> {
        let (n_tok, rest) = take_token(input);
        if n_tok.is_empty() {
            return Err(ParseError::MissingSideLength);
        }
        let n: usize = n_tok
            .parse()
            .map_err(|_| ParseError::InvalidSideLength { found: n_tok.to_string() })?;
        let expected = n
            .checked_mul(n)
            .ok_or_else(|| ParseError::InvalidSideLength { found: n_tok.to_string() })?;

        let (depth_tok, rest) = take_token(rest);
        if depth_tok.is_empty() {
            return Err(ParseError::MissingMaxDepth);
        }
        let max_depth: i32 = depth_tok
            .parse()
            .map_err(|_| ParseError::InvalidMaxDepth { found: depth_tok.to_string() })?;

        let mut grid = Vec::with_capacity(expected);
        let mut bishop = None;
        let mut knight = None;
        let mut pawn_cnt = 0;
        for c in rest.chars() {
            if c == '\n' || c == '\r' {
                continue;
            }
            if grid.len() == expected {
                break;
            }
            let cell = Cell::from_char(c).ok_or(ParseError::InvalidCellChar { character: c })?;
            let idx = grid.len();
            let (row, col) = ((idx / n) as i32, (idx % n) as i32);
            match cell {
                Cell::Bishop => bishop = Some(Piece::new(row, col, Cell::Bishop)),
                Cell::Knight => knight = Some(Piece::new(row, col, Cell::Knight)),
                Cell::Pawn => pawn_cnt += 1,
                Cell::Empty => {}
            }
            grid.push(cell);
        }
        if grid.len() != expected {
            return Err(ParseError::GridTooShort { expected, found: grid.len() });
        }

        let bishop = bishop.ok_or(BoardError::PieceCount { kind: "bishop", count: 0 })?;
        let knight = knight.ok_or(BoardError::PieceCount { kind: "knight", count: 0 })?;

        // min depth = initial pawn count: each ply captures at most one pawn
        let board = Board::from_raw(n, grid, bishop, knight, pawn_cnt, pawn_cnt, max_depth, Vec::new())?;
        debug!(n, max_depth, pawns = pawn_cnt, "parsed board");
        Ok(board)
    }
}

/// Split off the next whitespace-delimited token.
fn take_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}
