//! Move generation.
//!
//! Candidate moves come from each variant's movement geometry alone and never
//! consult check safety; [`legality`] intersects them with simulations that
//! keep the mover's own king out of check. Check detection is built strictly
//! on the candidate side so the two never recurse into each other.

mod legality;

use crate::piece::{Piece, Variant};
use crate::Board;
use referee_core::{Cell, Faction, PieceKind, KING_STEPS, KNIGHT_JUMPS};
use std::collections::BTreeSet;

/// One side of the board a king may castle towards.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Wing {
    /// Where the king lands.
    pub king_to: Cell,
    /// The cell the king crosses on its way.
    pub transit: Cell,
    pub rook_from: Cell,
    pub rook_to: Cell,
    /// Cells between king and rook; all must be empty.
    pub between: &'static [Cell],
}

const WHITE_WINGS: [Wing; 2] = [
    Wing {
        king_to: Cell::G1,
        transit: Cell::F1,
        rook_from: Cell::H1,
        rook_to: Cell::F1,
        between: &[Cell::F1, Cell::G1],
    },
    Wing {
        king_to: Cell::C1,
        transit: Cell::D1,
        rook_from: Cell::A1,
        rook_to: Cell::D1,
        between: &[Cell::B1, Cell::C1, Cell::D1],
    },
];

const BLACK_WINGS: [Wing; 2] = [
    Wing {
        king_to: Cell::G8,
        transit: Cell::F8,
        rook_from: Cell::H8,
        rook_to: Cell::F8,
        between: &[Cell::F8, Cell::G8],
    },
    Wing {
        king_to: Cell::C8,
        transit: Cell::D8,
        rook_from: Cell::A8,
        rook_to: Cell::D8,
        between: &[Cell::B8, Cell::C8, Cell::D8],
    },
];

/// Returns the king-side and queen-side wings of a faction.
pub(crate) fn wings(faction: Faction) -> &'static [Wing; 2] {
    match faction {
        Faction::White => &WHITE_WINGS,
        Faction::Black => &BLACK_WINGS,
    }
}

/// Returns the cell a faction's king starts on.
pub(crate) fn king_home(faction: Faction) -> Cell {
    match faction {
        Faction::White => Cell::E1,
        Faction::Black => Cell::E8,
    }
}

impl Piece {
    /// Generates the cells this piece can reach by its movement geometry,
    /// ignoring whether the move would leave its own king in check.
    pub fn candidate_moves(&self, board: &Board) -> BTreeSet<Cell> {
        let mut moves = BTreeSet::new();
        match &self.variant {
            Variant::Pawn(_) => pawn_moves(self, board, &mut moves),
            Variant::Knight => step_moves(self, board, &KNIGHT_JUMPS, &mut moves),
            Variant::Bishop | Variant::Rook | Variant::Queen => {
                slide_moves(self, board, &mut moves)
            }
            Variant::King(_) => {
                step_moves(self, board, &KING_STEPS, &mut moves);
                moves.extend(castling_cells(board, self));
            }
        }
        moves
    }
}

/// Single and double steps forward, diagonal captures, and en passant.
fn pawn_moves(pawn: &Piece, board: &Board, moves: &mut BTreeSet<Cell>) {
    let faction = pawn.faction;
    let from = pawn.position;
    let dir = faction.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if board.at(one).is_none() {
            moves.insert(one);
            if !pawn.moved && from.y() == faction.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.at(two).is_none() {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for dx in [-1, 1] {
        let Some(diagonal) = from.offset(dx, dir) else {
            continue;
        };
        if board.is_enemy(diagonal, faction) {
            moves.insert(diagonal);
            continue;
        }
        let passed = from.offset(dx, 0).and_then(|cell| board.at(cell));
        if let Some(neighbour) = passed {
            if neighbour.faction != faction && neighbour.en_passant_target() == Some(diagonal) {
                moves.insert(diagonal);
            }
        }
    }
}

/// Fixed-offset moves (knight jumps, king steps).
fn step_moves(piece: &Piece, board: &Board, offsets: &[(i8, i8)], moves: &mut BTreeSet<Cell>) {
    for &(dx, dy) in offsets {
        if let Some(to) = piece.position.offset(dx, dy) {
            if !board.is_friendly(to, piece.faction) {
                moves.insert(to);
            }
        }
    }
}

/// Rays for bishops, rooks and queens, stopping at the edge or the first
/// occupant (included when it is an enemy).
fn slide_moves(piece: &Piece, board: &Board, moves: &mut BTreeSet<Cell>) {
    for &(dx, dy) in piece.kind().slide_dirs() {
        let mut cursor = piece.position;
        while let Some(to) = cursor.offset(dx, dy) {
            match board.at(to) {
                None => {
                    moves.insert(to);
                    cursor = to;
                }
                Some(occupant) => {
                    if occupant.faction != piece.faction {
                        moves.insert(to);
                    }
                    break;
                }
            }
        }
    }
}

/// Castling destinations currently open to `king`.
///
/// Requires an unmoved king on its home cell, an unmoved friendly rook on the
/// wing's home cell, and empty cells between them. Attacked cells are not
/// considered here; see [`Board::simulate_move`].
pub(crate) fn castling_cells(board: &Board, king: &Piece) -> Vec<Cell> {
    let faction = king.faction;
    if king.kind() != PieceKind::King || king.moved || king.position != king_home(faction) {
        return Vec::new();
    }

    wings(faction)
        .iter()
        .filter(|wing| {
            let rook_ready = matches!(
                board.at(wing.rook_from),
                Some(rook) if rook.kind() == PieceKind::Rook && rook.faction == faction && !rook.moved
            );
            rook_ready && wing.between.iter().all(|&cell| board.at(cell).is_none())
        })
        .map(|wing| wing.king_to)
        .collect()
}
