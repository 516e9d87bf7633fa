//! Error types for board-file parsing and structural validation.

/// Errors that occur when parsing a board file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The header is missing the side length.
    #[error("missing board side length in header")]
    MissingSideLength,
    /// The side length is not a valid number.
    #[error("invalid board side length: \"{found}\"")]
    InvalidSideLength {
        /// The offending token.
        found: String,
    },
    /// The header is missing the maximum depth.
    #[error("missing maximum depth in header")]
    MissingMaxDepth,
    /// The maximum depth is not a valid number.
    #[error("invalid maximum depth: \"{found}\"")]
    InvalidMaxDepth {
        /// The offending token.
        found: String,
    },
    /// An unrecognized character appeared in the grid.
    #[error("invalid cell character: '{character}'")]
    InvalidCellChar {
        /// The invalid character.
        character: char,
    },
    /// The grid holds fewer cells than the side length demands.
    #[error("grid describes {found} cells, expected {expected}")]
    GridTooShort {
        /// Number of cells required by the header.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
    /// The parsed grid fails structural validation.
    #[error("invalid board: {source}")]
    Board {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::board::Board).
///
/// Any of these on a board built by the search itself indicates a bug; on a
/// decoded payload it indicates corruption. Both are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The grid does not hold exactly one cell of a piece kind.
    #[error("expected exactly 1 {kind} cell, found {count}")]
    PieceCount {
        /// Which piece ("bishop" or "knight").
        kind: &'static str,
        /// Number of matching cells found.
        count: usize,
    },
    /// A piece record carries the wrong cell type.
    #[error("{kind} record does not carry a {kind} cell")]
    PieceType {
        /// Which piece ("bishop" or "knight").
        kind: &'static str,
    },
    /// A cached piece position disagrees with the grid.
    #[error("{kind} recorded at ({row},{col}) does not match the grid")]
    PiecePosition {
        /// Which piece ("bishop" or "knight").
        kind: &'static str,
        /// Recorded row.
        row: i32,
        /// Recorded column.
        col: i32,
    },
    /// The cached pawn count disagrees with the grid.
    #[error("recorded pawn count {recorded} but grid holds {counted}")]
    PawnCount {
        /// The cached count.
        recorded: i32,
        /// The count observed in the grid.
        counted: i32,
    },
    /// The cell array length does not match the side length.
    #[error("grid holds {found} cells for side length {side_len}, expected {expected}")]
    GridSize {
        /// The board's side length.
        side_len: usize,
        /// `side_len` squared.
        expected: usize,
        /// Actual cell count.
        found: usize,
    },
    /// A depth bound is negative.
    #[error("negative depth bound: min {min_depth}, max {max_depth}")]
    NegativeDepth {
        /// The recorded minimum depth.
        min_depth: i32,
        /// The recorded maximum depth.
        max_depth: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::{BoardError, ParseError};

    #[test]
    fn parse_error_display() {
        let err = ParseError::InvalidCellChar { character: 'x' };
        assert_eq!(format!("{err}"), "invalid cell character: 'x'");
    }

    #[test]
    fn board_error_display() {
        let err = BoardError::PieceCount { kind: "bishop", count: 2 };
        assert_eq!(format!("{err}"), "expected exactly 1 bishop cell, found 2");
    }

    #[test]
    fn parse_error_from_board_error() {
        let board_err = BoardError::PawnCount { recorded: 3, counted: 2 };
        let parse_err: ParseError = board_err.into();
        assert!(matches!(parse_err, ParseError::Board { .. }));
    }
}
