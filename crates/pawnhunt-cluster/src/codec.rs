//! Flat little-endian encoding for boards, moves, and subproblems.
//!
//! Layout (integers are little-endian `i32` unless noted):
//!
//! ```text
//! subproblem := depth | best_cost | side:u8 | board
//! board      := size | row_len | pawn_cnt | min_depth | max_depth
//!             | grid:u8[size] | bishop:piece | knight:piece
//!             | log_len | move × log_len
//! piece      := row | col | type:u8
//! move       := row | col | took_pawn:i16
//! ```
//!
//! Decoding validates everything it reads; a malformed payload is a fatal
//! error at the receiving end, never a silent truncation.

use pawnhunt_core::{Board, Cell, Move, Piece, Side};
use pawnhunt_engine::Subproblem;

use crate::error::WireError;

/// Serialized size of one move record.
const MOVE_LEN: usize = 10;

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Reader<'a> {
        Reader { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < n {
            return Err(WireError::UnexpectedEof { needed: n, remaining: self.remaining() });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    fn i16(&mut self) -> Result<i16, WireError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    fn i32(&mut self) -> Result<i32, WireError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Fail on trailing bytes; payloads carry exactly one value.
    fn finish(self) -> Result<(), WireError> {
        if self.remaining() != 0 {
            return Err(WireError::TrailingBytes { trailing: self.remaining() });
        }
        Ok(())
    }
}

fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_move(buf: &mut Vec<u8>, m: &Move) {
    put_i32(buf, m.row);
    put_i32(buf, m.col);
    buf.extend_from_slice(&(m.took_pawn as i16).to_le_bytes());
}

fn put_piece(buf: &mut Vec<u8>, p: &Piece) {
    put_i32(buf, p.row);
    put_i32(buf, p.col);
    buf.push(p.kind.as_byte());
}

/// Append the board blob to `buf`.
pub fn encode_board(board: &Board, buf: &mut Vec<u8>) {
    let n = board.side_len() as i32;
    put_i32(buf, n * n);
    put_i32(buf, n);
    put_i32(buf, board.pawn_count());
    put_i32(buf, board.min_depth());
    put_i32(buf, board.max_depth());
    buf.extend(board.cells().iter().map(|c| c.as_byte()));
    put_piece(buf, &board.bishop());
    put_piece(buf, &board.knight());
    put_i32(buf, board.move_log().len() as i32);
    for m in board.move_log() {
        put_move(buf, m);
    }
}

/// Append the subproblem (header plus board blob) to `buf`.
pub fn encode_subproblem(sub: &Subproblem, buf: &mut Vec<u8>) {
    put_i32(buf, sub.depth);
    put_i32(buf, sub.bound);
    buf.push(sub.side.as_byte());
    encode_board(&sub.board, buf);
}

fn read_move(r: &mut Reader<'_>) -> Result<Move, WireError> {
    let row = r.i32()?;
    let col = r.i32()?;
    let took_pawn = r.i16()? != 0;
    Ok(Move { row, col, took_pawn })
}

fn read_piece(r: &mut Reader<'_>) -> Result<Piece, WireError> {
    let row = r.i32()?;
    let col = r.i32()?;
    let byte = r.u8()?;
    let kind = match Cell::from_byte(byte) {
        Some(kind @ (Cell::Bishop | Cell::Knight)) => kind,
        _ => return Err(WireError::InvalidPieceType { byte }),
    };
    Ok(Piece { row, col, kind })
}

fn read_board(r: &mut Reader<'_>) -> Result<Board, WireError> {
    let size = r.i32()?;
    let row_len = r.i32()?;
    if size < 0 {
        return Err(WireError::NegativeLength { field: "size", value: size });
    }
    if row_len < 0 || row_len.checked_mul(row_len) != Some(size) {
        return Err(WireError::DimensionMismatch { size, row_len });
    }
    let pawn_cnt = r.i32()?;
    let min_depth = r.i32()?;
    let max_depth = r.i32()?;
    let mut grid = Vec::with_capacity(size as usize);
    for &byte in r.take(size as usize)? {
        grid.push(Cell::from_byte(byte).ok_or(WireError::InvalidCell { byte })?);
    }
    let bishop = read_piece(r)?;
    let knight = read_piece(r)?;
    let log_len = r.i32()?;
    if log_len < 0 {
        return Err(WireError::NegativeLength { field: "move log length", value: log_len });
    }
    let need = (log_len as usize).saturating_mul(MOVE_LEN);
    if need > r.remaining() {
        return Err(WireError::UnexpectedEof { needed: need, remaining: r.remaining() });
    }
    let mut move_log = Vec::with_capacity(log_len as usize);
    for _ in 0..log_len {
        move_log.push(read_move(r)?);
    }
    let board = Board::from_raw(
        row_len as usize,
        grid,
        bishop,
        knight,
        pawn_cnt,
        min_depth,
        max_depth,
        move_log,
    )?;
    Ok(board)
}

/// Decode a DONE payload: exactly one board blob.
pub fn decode_board(buf: &[u8]) -> Result<Board, WireError> {
    let mut r = Reader::new(buf);
    let board = read_board(&mut r)?;
    r.finish()?;
    Ok(board)
}

/// Decode a WORK payload: exactly one subproblem.
pub fn decode_subproblem(buf: &[u8]) -> Result<Subproblem, WireError> {
    let mut r = Reader::new(buf);
    let depth = r.i32()?;
    let bound = r.i32()?;
    let byte = r.u8()?;
    let side = Side::from_byte(byte).ok_or(WireError::InvalidSide { byte })?;
    let board = read_board(&mut r)?;
    r.finish()?;
    Ok(Subproblem { board, depth, side, bound })
}

#[cfg(test)]
mod tests {
    use super::{decode_board, decode_subproblem, encode_board, encode_subproblem};
    use crate::error::WireError;
    use pawnhunt_core::{Board, Side};
    use pawnhunt_engine::Subproblem;

    fn sample_board() -> Board {
        let mut board: Board = "5 4\nSP---\n-----\n--J--\n-----\n-----\n".parse().unwrap();
        board.apply_bishop_move(1, 1);
        board.apply_knight_move(0, 1);
        board
    }

    /// Expected blob size: 5 header ints, the grid, two 9-byte pieces,
    /// the log length, and 10 bytes per move.
    fn board_len(board: &Board) -> usize {
        let n = board.side_len();
        20 + n * n + 2 * 9 + 4 + 10 * board.move_log().len()
    }

    #[test]
    fn board_round_trip() {
        let board = sample_board();
        let mut buf = Vec::new();
        encode_board(&board, &mut buf);
        assert_eq!(buf.len(), board_len(&board));
        assert_eq!(decode_board(&buf).unwrap(), board);
    }

    #[test]
    fn pristine_board_round_trip() {
        let board: Board = "3 2\nS--\n-P-\n--J\n".parse().unwrap();
        let mut buf = Vec::new();
        encode_board(&board, &mut buf);
        assert_eq!(decode_board(&buf).unwrap(), board);
    }

    #[test]
    fn subproblem_round_trip() {
        let sub = Subproblem {
            board: sample_board(),
            depth: 2,
            side: Side::Bishop,
            bound: 17,
        };
        let mut buf = Vec::new();
        encode_subproblem(&sub, &mut buf);
        assert_eq!(buf.len(), 9 + board_len(&sub.board));
        assert_eq!(decode_subproblem(&buf).unwrap(), sub);
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let mut buf = Vec::new();
        encode_board(&sample_board(), &mut buf);
        for cut in [0, 3, 10, buf.len() - 1] {
            let err = decode_board(&buf[..cut]).unwrap_err();
            assert!(matches!(err, WireError::UnexpectedEof { .. }), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut buf = Vec::new();
        encode_board(&sample_board(), &mut buf);
        buf.push(0);
        assert!(matches!(decode_board(&buf).unwrap_err(), WireError::TrailingBytes { trailing: 1 }));
    }

    #[test]
    fn corrupt_grid_byte_is_rejected() {
        let mut buf = Vec::new();
        encode_board(&sample_board(), &mut buf);
        buf[20] = b'x';
        assert!(matches!(decode_board(&buf).unwrap_err(), WireError::InvalidCell { byte: b'x' }));
    }

    #[test]
    fn corrupt_side_byte_is_rejected() {
        let sub = Subproblem::root(sample_board());
        let mut buf = Vec::new();
        encode_subproblem(&sub, &mut buf);
        buf[8] = b'P';
        assert!(matches!(decode_subproblem(&buf).unwrap_err(), WireError::InvalidSide { byte: b'P' }));
    }

    #[test]
    fn inconsistent_board_payload_is_rejected() {
        let mut buf = Vec::new();
        encode_board(&sample_board(), &mut buf);
        // Corrupt the pawn-count field (bytes 8..12)
        buf[8] = 9;
        assert!(matches!(decode_board(&buf).unwrap_err(), WireError::Board { .. }));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let mut buf = Vec::new();
        encode_board(&sample_board(), &mut buf);
        // size=25 but row_len patched to 4
        buf[4] = 4;
        assert!(matches!(
            decode_board(&buf).unwrap_err(),
            WireError::DimensionMismatch { size: 25, row_len: 4 }
        ));
    }
}
