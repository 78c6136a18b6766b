//! The two opposing sides.

use serde::{Deserialize, Serialize};

/// One of the two symmetric sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Faction {
    White = 0,
    Black = 1,
}

impl Faction {
    /// Both factions, White first.
    pub const ALL: [Faction; 2] = [Faction::White, Faction::Black];

    /// Returns the opposing faction.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Faction::White => Faction::Black,
            Faction::Black => Faction::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank delta of a pawn step (+1 for White, -1 for Black).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Faction::White => 1,
            Faction::Black => -1,
        }
    }

    /// Returns the home rank of the king and rooks (1 for White, 8 for Black).
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Faction::White => 1,
            Faction::Black => 8,
        }
    }

    /// Returns the rank pawns start on and may double-step from.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Faction::White => 2,
            Faction::Black => 7,
        }
    }

    /// Returns the farthest rank, where pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Faction::White => 8,
            Faction::Black => 1,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::White => write!(f, "White"),
            Faction::Black => write!(f, "Black"),
        }
    }
}
