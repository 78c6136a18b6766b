//! Dead-position detection.
//!
//! Two literal heuristics, both conservative: a lone minor piece against a
//! bare king, and kings plus bishops that all stand on one square colour.
//! Other drawn material (two knights, bishop against knight) is not detected.

use crate::Board;
use referee_core::PieceKind;

impl Board {
    /// Returns true when neither side can still deliver checkmate.
    pub fn is_dead_position(&self) -> bool {
        self.king_against_lone_minor() || self.kings_and_same_coloured_bishops()
    }

    /// At most three pieces remain, all of them kings, bishops or knights.
    fn king_against_lone_minor(&self) -> bool {
        self.pieces_in_play()
            .all(|piece| piece.kind() == PieceKind::King || piece.kind().is_minor())
            && self.pieces_in_play().count() <= 3
    }

    /// Only kings and bishops remain, and every bishop shares one square colour.
    fn kings_and_same_coloured_bishops(&self) -> bool {
        let only_kings_and_bishops = self
            .pieces_in_play()
            .all(|piece| matches!(piece.kind(), PieceKind::King | PieceKind::Bishop));
        if !only_kings_and_bishops {
            return false;
        }

        let mut colours = self
            .pieces_in_play()
            .filter(|piece| piece.kind() == PieceKind::Bishop)
            .map(|bishop| bishop.position().is_light());
        match colours.next() {
            Some(first) => colours.all(|light| light == first),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Board;
    use referee_core::{Cell, Faction, PieceKind};

    fn cell(s: &str) -> Cell {
        s.parse().unwrap()
    }

    fn kings() -> Board {
        let mut board = Board::new();
        board
            .spawn(PieceKind::King, Faction::White, Cell::E1)
            .spawn(PieceKind::King, Faction::Black, Cell::E8);
        board
    }

    #[test]
    fn bare_kings() {
        assert!(kings().is_dead_position());
    }

    #[test]
    fn king_and_minor_against_king() {
        let mut board = kings();
        board.spawn(PieceKind::Knight, Faction::White, cell("b1"));
        assert!(board.is_dead_position());

        let mut board = kings();
        board.spawn(PieceKind::Bishop, Faction::Black, cell("c8"));
        assert!(board.is_dead_position());
    }

    #[test]
    fn heavy_piece_or_pawn_is_alive() {
        for kind in [PieceKind::Rook, PieceKind::Queen, PieceKind::Pawn] {
            let mut board = kings();
            board.spawn(kind, Faction::White, cell("d4"));
            assert!(!board.is_dead_position(), "{kind} should keep the game alive");
        }
    }

    #[test]
    fn bishops_on_same_colour() {
        let mut board = kings();
        board
            .spawn(PieceKind::Bishop, Faction::White, cell("c1"))
            .spawn(PieceKind::Bishop, Faction::Black, cell("f8"));
        assert!(!cell("c1").is_light());
        assert!(!cell("f8").is_light());
        assert!(board.is_dead_position());
    }

    #[test]
    fn bishops_on_opposite_colours() {
        let mut board = kings();
        board
            .spawn(PieceKind::Bishop, Faction::White, cell("c1"))
            .spawn(PieceKind::Bishop, Faction::Black, cell("c8"));
        assert!(!board.is_dead_position());
    }

    #[test]
    fn two_knights_are_not_detected() {
        let mut board = kings();
        board
            .spawn(PieceKind::Knight, Faction::White, cell("b1"))
            .spawn(PieceKind::Knight, Faction::White, cell("g1"));
        assert!(!board.is_dead_position());
    }
}
