//! Piece entities.

use referee_core::{Cell, Faction, PieceKind};

/// Special-rule state carried by a pawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PawnState {
    /// The cell this pawn skipped over on a double step, while an enemy pawn
    /// may still capture onto it.
    pub(crate) en_passant: Option<Cell>,
}

/// Special-rule state carried by a king.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KingState {
    /// Castling destinations recognised when this king last started a move.
    pub(crate) castling: Vec<Cell>,
}

/// The closed set of piece variants, with per-variant state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    Pawn(PawnState),
    Knight,
    Bishop,
    Rook,
    Queen,
    King(KingState),
}

impl Variant {
    fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Pawn => Variant::Pawn(PawnState::default()),
            PieceKind::Knight => Variant::Knight,
            PieceKind::Bishop => Variant::Bishop,
            PieceKind::Rook => Variant::Rook,
            PieceKind::Queen => Variant::Queen,
            PieceKind::King => Variant::King(KingState::default()),
        }
    }

    /// Returns the kind of this variant.
    pub fn kind(&self) -> PieceKind {
        match self {
            Variant::Pawn(_) => PieceKind::Pawn,
            Variant::Knight => PieceKind::Knight,
            Variant::Bishop => PieceKind::Bishop,
            Variant::Rook => PieceKind::Rook,
            Variant::Queen => PieceKind::Queen,
            Variant::King(_) => PieceKind::King,
        }
    }
}

/// A piece on (or captured from) a board.
///
/// Pieces are only created by placing them on a [`Board`](crate::Board), so
/// a live piece's `position` always names the cell that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) variant: Variant,
    pub(crate) faction: Faction,
    pub(crate) position: Cell,
    pub(crate) moved: bool,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, faction: Faction, position: Cell, moved: bool) -> Self {
        Piece {
            variant: Variant::of(kind),
            faction,
            position,
            moved,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.variant.kind()
    }

    #[inline]
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Returns true once the piece has made a move of its own.
    #[inline]
    pub fn is_moved(&self) -> bool {
        self.moved
    }

    /// Returns true if `other` belongs to the opposing faction.
    #[inline]
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.faction != other.faction
    }

    /// Returns the glyph used when drawing this piece.
    #[inline]
    pub fn glyph(&self) -> char {
        self.kind().glyph(self.faction)
    }

    /// For a pawn that has just double-stepped, the cell an enemy pawn may
    /// capture onto this turn.
    pub fn en_passant_target(&self) -> Option<Cell> {
        match &self.variant {
            Variant::Pawn(state) => state.en_passant,
            _ => None,
        }
    }

    /// The cell actually vacated when this pawn is captured en passant: its
    /// own cell, distinct from the capturing pawn's destination.
    pub fn en_passant_capture_cell(&self) -> Option<Cell> {
        self.en_passant_target().map(|_| self.position)
    }

    /// Castling destinations this king recognised at the start of its last move.
    pub fn castling_cells(&self) -> &[Cell] {
        match &self.variant {
            Variant::King(state) => &state.castling,
            _ => &[],
        }
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<Cell>) {
        if let Variant::Pawn(state) = &mut self.variant {
            state.en_passant = target;
        }
    }

    pub(crate) fn set_castling(&mut self, cells: Vec<Cell>) {
        if let Variant::King(state) = &mut self.variant {
            state.castling = cells;
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
