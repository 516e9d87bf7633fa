//! Branch-and-bound search for the pawn-capture puzzle.

pub mod search;

pub use search::frontier::{DEFAULT_FRONTIER_PLIES, Frontier, generate_frontier};
pub use search::pool::{EngineError, TaskPool};
pub use search::{SearchConfig, SearchReport, Solution, Subproblem, solve_sequential};
