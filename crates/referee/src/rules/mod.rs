//! Check and terminal-state queries.
//!
//! Check detection looks only at the enemy's candidate moves; it never runs
//! the legality filter, which itself simulates moves and asks for check.

mod dead;

use crate::Board;
use referee_core::Faction;
use serde::Serialize;

/// Where a faction stands at the start of its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not in check, with at least one legal move.
    Ongoing,
    /// In check, with at least one legal move.
    Check,
    /// In check with no legal move: the faction has lost.
    Checkmate,
    /// Not in check but without a legal move: a draw.
    Stalemate,
    /// Neither side can deliver mate with the remaining material: a draw.
    DeadPosition,
}

impl Status {
    /// Returns true if the game cannot continue.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::Checkmate | Status::Stalemate | Status::DeadPosition
        )
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Ongoing => "ongoing",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
            Status::DeadPosition => "dead position",
        };
        write!(f, "{}", label)
    }
}

impl Board {
    /// Returns true if `faction`'s king stands on a cell some enemy piece
    /// could move to.
    pub fn is_checked(&self, faction: Faction) -> bool {
        let Some(king) = self.king(faction) else {
            return false;
        };
        self.pieces(faction.opposite())
            .any(|piece| piece.candidate_moves(self).contains(&king))
    }

    /// Returns true if no piece of `faction` has a safe move.
    pub fn has_no_moves(&self, faction: Faction) -> bool {
        self.pieces(faction)
            .all(|piece| piece.safe_moves(self).is_empty())
    }

    pub fn is_checkmate(&self, faction: Faction) -> bool {
        self.has_no_moves(faction) && self.is_checked(faction)
    }

    pub fn is_stalemate(&self, faction: Faction) -> bool {
        self.has_no_moves(faction) && !self.is_checked(faction)
    }

    /// Folds the terminal queries into one verdict for `faction`.
    ///
    /// Checkmate and stalemate take precedence over a dead position, which in
    /// turn hides a check.
    pub fn status(&self, faction: Faction) -> Status {
        let checked = self.is_checked(faction);
        match (self.has_no_moves(faction), checked) {
            (true, true) => Status::Checkmate,
            (true, false) => Status::Stalemate,
            _ if self.is_dead_position() => Status::DeadPosition,
            (false, true) => Status::Check,
            (false, false) => Status::Ongoing,
        }
    }
}
