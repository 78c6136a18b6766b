//! Piece kinds.

use crate::Faction;
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Knight jumps as `(dx, dy)`.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps as `(dx, dy)`.
pub const KING_STEPS: [(i8, i8); 8] = QUEEN_DIRS;

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, default first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the single-character glyph for this kind (uppercase for White).
    pub const fn glyph(self, faction: Faction) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match faction {
            Faction::White => c.to_ascii_uppercase(),
            Faction::Black => c,
        }
    }

    /// Parses a promotion selection.
    ///
    /// Accepts the letters `q`, `r`, `b`, `n` or the full names, in any case.
    /// Returns `None` for anything else, including kinds a pawn cannot become.
    pub fn from_selection(selection: &str) -> Option<PieceKind> {
        let wanted = selection.trim().to_ascii_lowercase();
        PieceKind::PROMOTIONS.into_iter().find(|kind| {
            let letter = kind.selection_char().to_string();
            wanted == letter || wanted == kind.to_string().to_ascii_lowercase()
        })
    }

    /// Returns the letter used to select this kind on promotion.
    pub const fn selection_char(self) -> char {
        self.glyph(Faction::Black)
    }

    /// Unit directions for sliding pieces; empty for the others.
    #[inline]
    pub const fn slide_dirs(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Bishop => &BISHOP_DIRS,
            PieceKind::Rook => &ROOK_DIRS,
            PieceKind::Queen => &QUEEN_DIRS,
            _ => &[],
        }
    }

    /// Returns true for the minor pieces (bishop and knight).
    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Knight)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}
