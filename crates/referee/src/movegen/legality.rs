//! The legality filter: candidate moves that keep the mover's king safe.

use super::{castling_cells, wings};
use crate::piece::Piece;
use crate::promotion::FixedPromotion;
use crate::Board;
use referee_core::{Cell, Faction, Move, PieceKind, RulesError};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

impl Piece {
    /// Candidate moves that do not leave this piece's own king in check.
    pub fn safe_moves(&self, board: &Board) -> BTreeSet<Cell> {
        self.candidate_moves(board)
            .into_iter()
            .filter(|&to| board.simulate_move(self.position, to))
            .collect()
    }
}

impl Board {
    /// Candidate moves of the piece on `cell`; empty if the cell is empty.
    pub fn candidate_moves(&self, cell: Cell) -> BTreeSet<Cell> {
        self.at(cell)
            .map(|piece| piece.candidate_moves(self))
            .unwrap_or_default()
    }

    /// Safe moves of the piece on `cell`; empty if the cell is empty.
    pub fn safe_moves(&self, cell: Cell) -> BTreeSet<Cell> {
        self.at(cell)
            .map(|piece| piece.safe_moves(self))
            .unwrap_or_default()
    }

    /// Returns whether moving the piece on `from` to `to` leaves its own king
    /// safe, by playing the move on a copy of the board.
    ///
    /// Castling is safe only if the king is not in check now, and would not
    /// be on its transit cell or on its destination.
    pub fn simulate_move(&self, from: Cell, to: Cell) -> bool {
        let Some(piece) = self.at(from) else {
            return false;
        };
        let faction = piece.faction();

        if piece.kind() == PieceKind::King && castling_cells(self, piece).contains(&to) {
            let Some(wing) = wings(faction).iter().find(|wing| wing.king_to == to) else {
                return false;
            };
            let safe = !self.is_checked(faction)
                && self.simulation(from, wing.transit, faction)
                && self.simulation(from, to, faction);
            trace!(%from, %to, safe, "castling simulated");
            return safe;
        }

        self.simulation(from, to, faction)
    }

    fn simulation(&self, from: Cell, to: Cell, faction: Faction) -> bool {
        let mut board = self.copy();
        if board.make_move(from, to).is_err() {
            return false;
        }
        let safe = !board.is_checked(faction);
        trace!(%from, %to, safe, "move simulated");
        safe
    }

    /// Moves the piece on `from` to `to` if that is one of its safe moves,
    /// marking the piece as moved.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::EmptyCell`] if `from` is empty, or
    /// [`RulesError::IllegalMove`] if `to` is not a candidate move or would
    /// leave the mover in check. The board is untouched on error.
    pub fn move_piece(&mut self, from: Cell, to: Cell) -> Result<(), RulesError> {
        let piece = self.at(from).ok_or(RulesError::EmptyCell(from))?;
        if !piece.candidate_moves(self).contains(&to) || !self.simulate_move(from, to) {
            return Err(RulesError::IllegalMove { from, to });
        }

        self.make_move(from, to)?;
        if let Some(piece) = self.at_mut(to) {
            piece.moved = true;
        }
        Ok(())
    }

    /// Plays a move request, using its promotion choice (if any) in place of
    /// the installed promotion selector.
    pub fn play(&mut self, mv: Move) -> Result<(), RulesError> {
        let Some(kind) = mv.promotion else {
            return self.move_piece(mv.from, mv.to);
        };
        let installed = self.replace_promotion_selector(Some(Box::new(FixedPromotion(kind))));
        let result = self.move_piece(mv.from, mv.to);
        self.replace_promotion_selector(installed);
        result
    }

    /// Maps each piece of `faction` that can move to its safe destinations.
    pub fn available_moves(&self, faction: Faction) -> BTreeMap<Cell, BTreeSet<Cell>> {
        self.pieces(faction)
            .filter_map(|piece| {
                let moves = piece.safe_moves(self);
                (!moves.is_empty()).then(|| (piece.position(), moves))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::White, Cell::E1)
            .spawn(PieceKind::Bishop, Faction::White, cell("e2"))
            .spawn(PieceKind::Rook, Faction::Black, cell("e8"));
        assert!(!board.candidate_moves(cell("e2")).is_empty());
        assert!(board.safe_moves(cell("e2")).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::White, Cell::E1)
            .spawn(PieceKind::Rook, Faction::Black, cell("d8"));
        let safe = board.safe_moves(Cell::E1);
        assert!(!safe.contains(&Cell::D1));
        assert!(!safe.contains(&cell("d2")));
        assert!(safe.contains(&Cell::F1));
    }

    #[test]
    fn move_piece_rejects_illegal_and_leaves_board() {
        let mut board = Board::standard();
        let before = board.copy();
        assert_eq!(
            board.move_piece(cell("e2"), cell("e5")),
            Err(RulesError::IllegalMove {
                from: cell("e2"),
                to: cell("e5")
            })
        );
        assert_eq!(
            board.move_piece(cell("e4"), cell("e5")),
            Err(RulesError::EmptyCell(cell("e4")))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn move_piece_marks_moved() {
        let mut board = Board::standard();
        board.move_piece(cell("g1"), cell("f3")).unwrap();
        assert!(board.at(cell("f3")).unwrap().is_moved());
        assert!(!board.at(cell("b1")).unwrap().is_moved());
    }

    #[test]
    fn castling_through_check_is_unsafe() {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::White, Cell::E1)
            .spawn(PieceKind::Rook, Faction::White, Cell::H1)
            .spawn(PieceKind::Rook, Faction::Black, cell("f8"));
        assert!(board.candidate_moves(Cell::E1).contains(&Cell::G1));
        assert!(!board.simulate_move(Cell::E1, Cell::G1));
    }

    #[test]
    fn castling_out_of_check_is_unsafe() {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::White, Cell::E1)
            .spawn(PieceKind::Rook, Faction::White, Cell::A1)
            .spawn(PieceKind::Rook, Faction::Black, cell("e8"));
        assert!(board.candidate_moves(Cell::E1).contains(&Cell::C1));
        assert!(!board.safe_moves(Cell::E1).contains(&Cell::C1));
    }

    #[test]
    fn play_castles_with_move_piece() {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::Black, Cell::E8)
            .spawn(PieceKind::Rook, Faction::Black, Cell::H8);
        board.play(Move::new(Cell::E8, Cell::G8)).unwrap();
        assert_eq!(board.at(Cell::G8).unwrap().kind(), PieceKind::King);
        assert_eq!(board.at(Cell::F8).unwrap().kind(), PieceKind::Rook);
        assert!(board.at(Cell::G8).unwrap().is_moved());
        assert!(board.safe_moves(Cell::G8).iter().all(|c| c.y() >= 7));
    }

    #[test]
    fn play_uses_requested_promotion_once() {
        let mut board = Board::new();
        board
            .spawn_moved(PieceKind::Pawn, Faction::White, cell("a7"))
            .spawn_moved(PieceKind::Pawn, Faction::White, cell("h7"));
        board
            .play(Move::promoting(cell("a7"), Cell::A8, PieceKind::Rook))
            .unwrap();
        board.play(Move::new(cell("h7"), Cell::H8)).unwrap();
        assert_eq!(board.at(Cell::A8).unwrap().kind(), PieceKind::Rook);
        assert_eq!(board.at(Cell::H8).unwrap().kind(), PieceKind::Queen);
    }

    #[test]
    fn available_moves_startpos() {
        let board = Board::standard();
        let moves = board.available_moves(Faction::White);
        assert_eq!(moves.len(), 10);
        assert_eq!(moves.values().map(BTreeSet::len).sum::<usize>(), 20);
    }
}
