//! Move records appended to a board's move log.

use std::fmt;

/// One executed move: the destination square and whether a pawn was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: i32,
    pub col: i32,
    pub took_pawn: bool,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)?;
        if self.took_pawn {
            write!(f, " *")?;
        }
        Ok(())
    }
}
