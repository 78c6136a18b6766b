//! Errors reported by the rules engine.

use crate::Cell;
use thiserror::Error;

/// Errors that can occur when addressing the board or requesting a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("no piece on {0}")]
    EmptyCell(Cell),

    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Cell, to: Cell },

    #[error("invalid cell: {0}")]
    InvalidCell(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RulesError::OutOfBounds { x: 9, y: 0 };
        assert_eq!(err.to_string(), "coordinate (9, 0) is outside the board");

        let from = Cell::new(5, 2).unwrap();
        let to = Cell::new(5, 5).unwrap();
        let err = RulesError::IllegalMove { from, to };
        assert_eq!(err.to_string(), "illegal move: e2e5");
        assert_eq!(RulesError::EmptyCell(to).to_string(), "no piece on e5");
    }
}
