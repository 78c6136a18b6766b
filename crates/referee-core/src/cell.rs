//! Board cell representation.

use crate::RulesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the board, addressed by 1-indexed column and row.
///
/// `x` runs over files A-H (1-8) and `y` over ranks 1-8. A `Cell` is always
/// on the board; every constructor rejects coordinates outside `[1, 8]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cell {
    x: u8,
    y: u8,
}

impl Cell {
    /// Creates a cell, failing with [`RulesError::OutOfBounds`] off the board.
    pub fn new(x: i32, y: i32) -> Result<Self, RulesError> {
        if (1..=8).contains(&x) && (1..=8).contains(&y) {
            Ok(Cell {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(RulesError::OutOfBounds { x, y })
        }
    }

    /// Creates a cell from coordinates already known to be on the board.
    pub(crate) const fn on_board(x: u8, y: u8) -> Self {
        debug_assert!(x >= 1 && x <= 8 && y >= 1 && y <= 8);
        Cell { x, y }
    }

    /// Parses a cell from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, RulesError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidCell(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(RulesError::InvalidCell(s.to_string()));
        }
        Ok(Cell::on_board(file - b'a' + 1, rank - b'0'))
    }

    /// Returns the column (1 = A-file).
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row (1 = first rank).
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the cell displaced by `(dx, dy)`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        if (1..=8).contains(&x) && (1..=8).contains(&y) {
            Some(Cell::on_board(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Returns true for light squares. a1 is dark, so light squares have odd `x + y`.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.x + self.y) % 2 == 1
    }

    /// Iterates over all 64 cells, rank by rank starting at a1.
    pub fn all() -> impl Iterator<Item = Cell> {
        (1..=8u8).flat_map(|y| (1..=8u8).map(move |x| Cell::on_board(x, y)))
    }

    /// Returns the algebraic notation for this cell.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.x - 1) as char, self.y)
    }

    // Back-rank cells used by castling
    pub const A1: Cell = Cell::on_board(1, 1);
    pub const B1: Cell = Cell::on_board(2, 1);
    pub const C1: Cell = Cell::on_board(3, 1);
    pub const D1: Cell = Cell::on_board(4, 1);
    pub const E1: Cell = Cell::on_board(5, 1);
    pub const F1: Cell = Cell::on_board(6, 1);
    pub const G1: Cell = Cell::on_board(7, 1);
    pub const H1: Cell = Cell::on_board(8, 1);
    pub const A8: Cell = Cell::on_board(1, 8);
    pub const B8: Cell = Cell::on_board(2, 8);
    pub const C8: Cell = Cell::on_board(3, 8);
    pub const D8: Cell = Cell::on_board(4, 8);
    pub const E8: Cell = Cell::on_board(5, 8);
    pub const F8: Cell = Cell::on_board(6, 8);
    pub const G8: Cell = Cell::on_board(7, 8);
    pub const H8: Cell = Cell::on_board(8, 8);
}

impl TryFrom<String> for Cell {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cell::from_algebraic(&value)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.to_algebraic()
    }
}

impl std::str::FromStr for Cell {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cell::from_algebraic(s)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.to_algebraic())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cell_new() {
        let e4 = Cell::new(5, 4).unwrap();
        assert_eq!(e4.x(), 5);
        assert_eq!(e4.y(), 4);
        assert_eq!(e4.to_algebraic(), "e4");
    }

    #[test]
    fn cell_new_out_of_bounds() {
        assert_eq!(Cell::new(0, 1), Err(RulesError::OutOfBounds { x: 0, y: 1 }));
        assert_eq!(Cell::new(1, 9), Err(RulesError::OutOfBounds { x: 1, y: 9 }));
        assert_eq!(
            Cell::new(-3, 4),
            Err(RulesError::OutOfBounds { x: -3, y: 4 })
        );
    }

    #[test]
    fn cell_from_algebraic() {
        assert_eq!(Cell::from_algebraic("a1"), Ok(Cell::A1));
        assert_eq!(Cell::from_algebraic("H8"), Ok(Cell::H8));
        assert_eq!(Cell::from_algebraic("e4"), Cell::new(5, 4));
        assert!(Cell::from_algebraic("i1").is_err());
        assert!(Cell::from_algebraic("a9").is_err());
        assert!(Cell::from_algebraic("a0").is_err());
        assert!(Cell::from_algebraic("").is_err());
    }

    #[test]
    fn cell_offset() {
        assert_eq!(Cell::E1.offset(1, 0), Some(Cell::F1));
        assert_eq!(Cell::E1.offset(0, 7), Some(Cell::E8));
        assert_eq!(Cell::E1.offset(0, -1), None);
        assert_eq!(Cell::H8.offset(1, 1), None);
    }

    #[test]
    fn cell_offset_extremes() {
        assert_eq!(Cell::H8.offset(i8::MAX, 0), None);
        assert_eq!(Cell::H8.offset(0, i8::MAX), None);
        assert_eq!(Cell::A1.offset(i8::MIN, i8::MIN), None);
        assert_eq!(Cell::A1.offset(i8::MAX, i8::MIN), None);
    }

    #[test]
    fn cell_colour() {
        assert!(!Cell::A1.is_light());
        assert!(Cell::H1.is_light());
        assert!(!Cell::H8.is_light());
        assert!(Cell::D1.is_light());
    }

    #[test]
    fn all_cells() {
        let cells: Vec<Cell> = Cell::all().collect();
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0], Cell::A1);
        assert_eq!(cells[63], Cell::H8);
    }

    proptest! {
        #[test]
        fn algebraic_roundtrip(x in 1i32..=8, y in 1i32..=8) {
            let cell = Cell::new(x, y).unwrap();
            prop_assert_eq!(Cell::from_algebraic(&cell.to_algebraic()), Ok(cell));
        }

        #[test]
        fn offset_stays_on_board(x in 1i32..=8, y in 1i32..=8, dx in any::<i8>(), dy in any::<i8>()) {
            let cell = Cell::new(x, y).unwrap();
            let expected = Cell::new(x + dx as i32, y + dy as i32).ok();
            prop_assert_eq!(cell.offset(dx, dy), expected);
        }
    }
}
