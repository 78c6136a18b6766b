//! Position setup.
//!
//! A [`Setup`] describes the pieces to place on a fresh board. It is usually
//! loaded from TOML:
//!
//! ```toml
//! previous_turn = "black"
//!
//! [[pieces]]
//! kind = "king"
//! faction = "white"
//! cell = "e1"
//!
//! [[pieces]]
//! kind = "rook"
//! faction = "white"
//! cell = "h1"
//! moved = true
//! ```

use crate::Board;
use referee_core::{Cell, Faction, PieceKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating a setup.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Failed to read the setup file from disk.
    #[error("failed to read setup file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the setup as valid TOML.
    #[error("failed to parse setup: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two placements name the same cell.
    #[error("more than one piece placed on {0}")]
    Occupied(Cell),
    /// A faction has no king.
    #[error("{0} has no king")]
    MissingKing(Faction),
    /// A faction has more than one king.
    #[error("{0} has more than one king")]
    DuplicateKing(Faction),
    /// A pawn placed on the first or last rank.
    #[error("pawn placed on edge rank at {0}")]
    PawnOnEdgeRank(Cell),
}

/// One piece to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PieceKind,
    pub faction: Faction,
    pub cell: Cell,
    /// Whether the piece counts as having moved (affects castling and pawn
    /// double steps). Defaults to false.
    #[serde(default)]
    pub moved: bool,
}

impl Placement {
    pub const fn new(kind: PieceKind, faction: Faction, cell: Cell) -> Self {
        Placement {
            kind,
            faction,
            cell,
            moved: false,
        }
    }
}

/// A description of the pieces on a board before play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    /// The faction considered to have moved last.
    #[serde(default)]
    pub previous_turn: Option<Faction>,
    #[serde(default)]
    pub pieces: Vec<Placement>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The standard initial array, White first.
pub(crate) fn standard_placements() -> impl Iterator<Item = Placement> {
    Faction::ALL.into_iter().flat_map(|faction| {
        Cell::all()
            .filter(move |cell| {
                cell.y() == faction.back_rank() || cell.y() == faction.pawn_rank()
            })
            .map(move |cell| {
                let kind = if cell.y() == faction.pawn_rank() {
                    PieceKind::Pawn
                } else {
                    BACK_RANK[cell.x() as usize - 1]
                };
                Placement::new(kind, faction, cell)
            })
    })
}

impl Setup {
    /// The standard initial array.
    pub fn standard() -> Self {
        Setup {
            previous_turn: None,
            pieces: standard_placements().collect(),
        }
    }

    /// Parses a setup from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SetupError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a setup file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that the setup is well formed: one piece per cell, exactly one
    /// king per faction, and no pawn on the first or last rank.
    pub fn validate(&self) -> Result<(), SetupError> {
        let mut seen = HashSet::new();
        let mut kings = [0usize; 2];
        for placement in &self.pieces {
            if !seen.insert(placement.cell) {
                return Err(SetupError::Occupied(placement.cell));
            }
            match placement.kind {
                PieceKind::King => kings[placement.faction.index()] += 1,
                PieceKind::Pawn if matches!(placement.cell.y(), 1 | 8) => {
                    return Err(SetupError::PawnOnEdgeRank(placement.cell));
                }
                _ => {}
            }
        }
        for faction in Faction::ALL {
            match kings[faction.index()] {
                0 => return Err(SetupError::MissingKing(faction)),
                1 => {}
                _ => return Err(SetupError::DuplicateKing(faction)),
            }
        }
        Ok(())
    }

    /// Validates the setup and places every piece on a fresh board.
    pub fn build(&self) -> Result<Board, SetupError> {
        self.validate()?;
        let mut board = Board::new();
        for placement in &self.pieces {
            if placement.moved {
                board.spawn_moved(placement.kind, placement.faction, placement.cell);
            } else {
                board.spawn(placement.kind, placement.faction, placement.cell);
            }
        }
        board.set_previous_turn(self.previous_turn);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    #[test]
    fn standard_setup_builds_standard_board() {
        let setup = Setup::standard();
        assert_eq!(setup.pieces.len(), 32);
        assert!(setup.validate().is_ok());
        assert_eq!(setup.build().unwrap(), Board::standard());
    }

    #[test]
    fn parse_valid_toml_setup() {
        let toml_content = r#"
previous_turn = "black"

[[pieces]]
kind = "king"
faction = "white"
cell = "e1"

[[pieces]]
kind = "rook"
faction = "white"
cell = "h1"
moved = true

[[pieces]]
kind = "king"
faction = "black"
cell = "E8"
"#;
        let setup = Setup::from_toml_str(toml_content).unwrap();
        assert_eq!(setup.previous_turn, Some(Faction::Black));
        assert_eq!(setup.pieces.len(), 3);
        assert_eq!(setup.pieces[1].kind, PieceKind::Rook);
        assert!(setup.pieces[1].moved);
        assert!(!setup.pieces[0].moved);
        assert_eq!(setup.pieces[2].cell, Cell::E8);

        let board = setup.build().unwrap();
        assert_eq!(board.previous_turn(), Some(Faction::Black));
        assert!(board.at(Cell::H1).unwrap().is_moved());
        assert_eq!(board.king(Faction::Black), Some(Cell::E8));
    }

    #[test]
    fn parse_rejects_bad_values() {
        let bad_cell = r#"
[[pieces]]
kind = "king"
faction = "white"
cell = "z9"
"#;
        assert!(matches!(
            Setup::from_toml_str(bad_cell),
            Err(SetupError::Parse(_))
        ));

        let bad_kind = r#"
[[pieces]]
kind = "archbishop"
faction = "white"
cell = "e1"
"#;
        assert!(matches!(
            Setup::from_toml_str(bad_kind),
            Err(SetupError::Parse(_))
        ));
    }

    #[test]
    fn empty_setup_parses_but_fails_validation() {
        let setup = Setup::from_toml_str("").unwrap();
        assert!(setup.pieces.is_empty());
        assert!(matches!(
            setup.validate(),
            Err(SetupError::MissingKing(Faction::White))
        ));
    }

    #[test]
    fn validate_rejects_malformed_setups() {
        let kings = vec![
            Placement::new(PieceKind::King, Faction::White, Cell::E1),
            Placement::new(PieceKind::King, Faction::Black, Cell::E8),
        ];

        let mut setup = Setup {
            previous_turn: None,
            pieces: kings.clone(),
        };
        setup
            .pieces
            .push(Placement::new(PieceKind::Queen, Faction::Black, Cell::E1));
        assert!(matches!(setup.validate(), Err(SetupError::Occupied(c)) if c == Cell::E1));

        let mut setup = Setup {
            previous_turn: None,
            pieces: kings.clone(),
        };
        setup
            .pieces
            .push(Placement::new(PieceKind::King, Faction::Black, cell("a5")));
        assert!(matches!(
            setup.validate(),
            Err(SetupError::DuplicateKing(Faction::Black))
        ));

        let mut setup = Setup {
            previous_turn: None,
            pieces: kings,
        };
        setup
            .pieces
            .push(Placement::new(PieceKind::Pawn, Faction::White, cell("c8")));
        assert!(matches!(
            setup.validate(),
            Err(SetupError::PawnOnEdgeRank(c)) if c == cell("c8")
        ));
        assert!(setup.build().is_err());
    }

    #[test]
    fn load_missing_file() {
        let result = Setup::load("/nonexistent/setup.toml");
        assert!(matches!(result, Err(SetupError::Read(_))));
    }
}
