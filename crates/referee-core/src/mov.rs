//! Move requests.

use crate::{Cell, PieceKind, RulesError};
use std::fmt;

/// A requested move: a piece's source cell, its destination, and an optional
/// promotion choice for a pawn reaching its farthest rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without a promotion choice.
    #[inline]
    pub const fn new(from: Cell, to: Cell) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a move carrying a promotion choice.
    #[inline]
    pub const fn promoting(from: Cell, to: Cell, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Returns the coordinate form of this move (e.g., "e2e4", "e7e8n").
    pub fn to_coordinates(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.selection_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from coordinate form.
    pub fn from_coordinates(s: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidMove(s.to_string());
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(invalid());
        }
        let from = Cell::from_algebraic(&s[0..2]).map_err(|_| invalid())?;
        let to = Cell::from_algebraic(&s[2..4]).map_err(|_| invalid())?;
        let promotion = match s.get(4..) {
            Some("") | None => None,
            Some(letter) => Some(PieceKind::from_selection(letter).ok_or_else(invalid)?),
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

impl std::str::FromStr for Move {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_coordinates(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coordinates())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinates())
    }
}
