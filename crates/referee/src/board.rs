//! The board: grid, live pieces, captures, and the king-location cache.

use crate::movegen::{castling_cells, wings};
use crate::piece::{Piece, Variant};
use crate::promotion::{self, PromotionSelector};
use crate::setup;
use referee_core::{Cell, Faction, PieceKind, RulesError};
use std::fmt;
use tracing::debug;

/// An 8×8 board owning every live piece.
///
/// Pieces live in the grid itself, so the set of pieces in play is exactly
/// the set of occupied cells and each piece's `position` names its cell.
/// All mutation goes through [`Board::set`] and [`Board::make_move`].
pub struct Board {
    /// Indexed `[x - 1][y - 1]`.
    grid: [[Option<Piece>; 8]; 8],
    /// Pieces captured by each faction, in capture order.
    captures: [Vec<Piece>; 2],
    /// Cell of each faction's king, updated on every king placement.
    kings: [Option<Cell>; 2],
    previous_turn: Option<Faction>,
    promotion: Option<Box<dyn PromotionSelector>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with no promotion selector.
    pub fn new() -> Self {
        Board {
            grid: Default::default(),
            captures: [Vec::new(), Vec::new()],
            kings: [None, None],
            previous_turn: None,
            promotion: None,
        }
    }

    /// Creates a board holding the standard initial array.
    pub fn standard() -> Self {
        let mut board = Board::new();
        for placement in setup::standard_placements() {
            board.spawn(placement.kind, placement.faction, placement.cell);
        }
        board
    }

    /// Installs the hook asked which piece a promoting pawn becomes.
    pub fn with_promotion<S: PromotionSelector + 'static>(mut self, selector: S) -> Self {
        self.set_promotion_selector(selector);
        self
    }

    /// Installs the hook asked which piece a promoting pawn becomes.
    pub fn set_promotion_selector<S: PromotionSelector + 'static>(&mut self, selector: S) {
        self.promotion = Some(Box::new(selector));
    }

    pub(crate) fn replace_promotion_selector(
        &mut self,
        selector: Option<Box<dyn PromotionSelector>>,
    ) -> Option<Box<dyn PromotionSelector>> {
        std::mem::replace(&mut self.promotion, selector)
    }

    /// Returns the occupant of `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::OutOfBounds`] if either coordinate is outside `[1, 8]`.
    pub fn get(&self, x: i32, y: i32) -> Result<Option<&Piece>, RulesError> {
        Ok(self.at(Cell::new(x, y)?))
    }

    /// Returns the occupant of `cell`.
    #[inline]
    pub fn at(&self, cell: Cell) -> Option<&Piece> {
        self.grid[cell.x() as usize - 1][cell.y() as usize - 1].as_ref()
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, cell: Cell) -> Option<&mut Piece> {
        self.grid[cell.x() as usize - 1][cell.y() as usize - 1].as_mut()
    }

    /// Returns true if `cell` holds a piece of `faction`.
    pub fn is_friendly(&self, cell: Cell, faction: Faction) -> bool {
        self.at(cell).is_some_and(|piece| piece.faction == faction)
    }

    /// Returns true if `cell` holds a piece of the faction opposing `faction`.
    pub fn is_enemy(&self, cell: Cell, faction: Faction) -> bool {
        self.at(cell).is_some_and(|piece| piece.faction != faction)
    }

    /// Iterates over every live piece.
    pub fn pieces_in_play(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.grid.iter().flatten().flatten()
    }

    /// Iterates over the live pieces of one faction.
    pub fn pieces(&self, faction: Faction) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces_in_play()
            .filter(move |piece| piece.faction == faction)
    }

    /// Returns the cells currently holding a piece.
    pub fn occupied_cells(&self) -> Vec<Cell> {
        self.pieces_in_play().map(Piece::position).collect()
    }

    /// Returns the pieces `faction` has captured, oldest first.
    pub fn captures(&self, faction: Faction) -> &[Piece] {
        &self.captures[faction.index()]
    }

    /// Returns the cell of `faction`'s king, if one has been placed.
    pub fn king(&self, faction: Faction) -> Option<Cell> {
        self.kings[faction.index()]
    }

    /// Returns the faction that moved last.
    pub fn previous_turn(&self) -> Option<Faction> {
        self.previous_turn
    }

    pub(crate) fn set_previous_turn(&mut self, faction: Option<Faction>) {
        self.previous_turn = faction;
    }

    /// Creates a piece and places it on `cell`.
    pub fn spawn(&mut self, kind: PieceKind, faction: Faction, cell: Cell) -> &mut Self {
        self.set(Some(Piece::new(kind, faction, cell, false)), cell);
        self
    }

    /// Creates a piece already flagged as having moved and places it on `cell`.
    pub fn spawn_moved(&mut self, kind: PieceKind, faction: Faction, cell: Cell) -> &mut Self {
        self.set(Some(Piece::new(kind, faction, cell, true)), cell);
        self
    }

    /// Writes `piece` (or nothing) into `cell`, applying in order: capture
    /// accounting, placement, promotion, and the castling rook relocation.
    pub fn set(&mut self, piece: Option<Piece>, cell: Cell) {
        if let Some(piece) = &piece {
            self.record_capture(piece, cell);
        }

        let promoting = piece.as_ref().is_some_and(|p| {
            p.kind() == PieceKind::Pawn && cell.y() == p.faction.promotion_rank()
        });
        let castling = piece.as_ref().and_then(|p| castling_rook(p, cell));
        let faction = piece.as_ref().map(Piece::faction);

        self.place(piece, cell);

        if let (true, Some(faction)) = (promoting, faction) {
            self.promote(faction, cell);
        }
        if let Some((rook_from, rook_to)) = castling {
            self.relocate_rook(rook_from, rook_to);
        }
    }

    /// Moves whatever stands on `from` to `to` without any legality check.
    ///
    /// Records the mover's faction as the previous turn, applies the capture,
    /// promotion and castling side effects of [`Board::set`], then clears
    /// every pawn's en-passant target except the one a double step just
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::EmptyCell`] if `from` is empty.
    pub fn make_move(&mut self, from: Cell, to: Cell) -> Result<(), RulesError> {
        let castling = match self.at(from) {
            None => return Err(RulesError::EmptyCell(from)),
            Some(piece) => castling_cells(self, piece),
        };
        let mut piece = self.take(from).ok_or(RulesError::EmptyCell(from))?;
        piece.set_castling(castling);

        let faction = piece.faction;
        let skipped = match piece.kind() {
            PieceKind::Pawn if from.y().abs_diff(to.y()) == 2 => {
                from.offset(0, faction.pawn_direction())
            }
            _ => None,
        };

        self.previous_turn = Some(faction);
        self.set(Some(piece), to);
        self.clear_en_passant();

        if let Some(target) = skipped {
            if let Some(pawn) = self.at_mut(to) {
                pawn.set_en_passant(Some(target));
                debug!(pawn = %to, %target, "en passant opened");
            }
        }
        Ok(())
    }

    /// Returns an independent board holding copies of every live piece
    /// (with their moved flags and special state) and the previous turn.
    ///
    /// Capture history and the promotion hook are not carried over, so a
    /// copy used for simulation never prompts and always promotes to a queen.
    pub fn copy(&self) -> Board {
        let mut board = Board::new();
        for piece in self.pieces_in_play() {
            board.place(Some(piece.clone()), piece.position);
        }
        board.previous_turn = self.previous_turn;
        board
    }

    /// Removes and returns the occupant of `cell`.
    fn take(&mut self, cell: Cell) -> Option<Piece> {
        self.grid[cell.x() as usize - 1][cell.y() as usize - 1].take()
    }

    fn place(&mut self, piece: Option<Piece>, cell: Cell) {
        let piece = piece.map(|mut piece| {
            piece.position = cell;
            if piece.kind() == PieceKind::King {
                self.kings[piece.faction.index()] = Some(cell);
            }
            piece
        });
        self.grid[cell.x() as usize - 1][cell.y() as usize - 1] = piece;
    }

    fn record_capture(&mut self, piece: &Piece, cell: Cell) {
        let captor = piece.faction;
        if let Some(victim_cell) = self.en_passant_victim(piece, cell) {
            if let Some(victim) = self.take(victim_cell) {
                debug!(%captor, at = %victim_cell, "en passant capture");
                self.captures[captor.index()].push(victim);
            }
            return;
        }

        match self.take(cell) {
            Some(occupant) if occupant.is_enemy_of(piece) => {
                debug!(%captor, captured = %occupant.kind(), at = %cell, "capture");
                self.captures[captor.index()].push(occupant);
            }
            Some(occupant) => {
                debug!(replaced = %occupant.kind(), at = %cell, "friendly piece overwritten");
            }
            None => {}
        }
    }

    /// For a pawn landing on the en-passant target of an enemy pawn, returns
    /// the cell of that enemy pawn.
    fn en_passant_victim(&self, piece: &Piece, cell: Cell) -> Option<Cell> {
        if !matches!(piece.variant, Variant::Pawn(_)) || self.at(cell).is_some() {
            return None;
        }
        let victim = self.at(cell.offset(0, -piece.faction.pawn_direction())?)?;
        if victim.is_enemy_of(piece) && victim.en_passant_target() == Some(cell) {
            victim.en_passant_capture_cell()
        } else {
            None
        }
    }

    fn promote(&mut self, faction: Faction, cell: Cell) {
        self.take(cell);
        let kind = self.choose_promotion(faction, cell);
        debug!(%faction, %kind, at = %cell, "promotion");
        self.set(Some(Piece::new(kind, faction, cell, false)), cell);
    }

    fn choose_promotion(&mut self, faction: Faction, cell: Cell) -> PieceKind {
        match self.promotion.as_mut() {
            Some(selector) => promotion::resolve(&selector.choose(faction, cell)),
            None => PieceKind::Queen,
        }
    }

    fn relocate_rook(&mut self, from: Cell, to: Cell) {
        match self.take(from) {
            Some(mut rook) => {
                rook.moved = true;
                debug!(from = %from, to = %to, "castling rook relocated");
                self.place(Some(rook), to);
            }
            None => debug!(from = %from, "castling rook missing"),
        }
    }

    fn clear_en_passant(&mut self) {
        for piece in self.grid.iter_mut().flatten().flatten() {
            piece.set_en_passant(None);
        }
    }
}

/// For a king landing on one of its recognised castling cells, returns the
/// rook's home cell and its post-castle cell.
fn castling_rook(piece: &Piece, cell: Cell) -> Option<(Cell, Cell)> {
    if !piece.castling_cells().contains(&cell) {
        return None;
    }
    wings(piece.faction)
        .iter()
        .find(|wing| wing.king_to == cell)
        .map(|wing| (wing.rook_from, wing.rook_to))
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
            && self.captures == other.captures
            && self.kings == other.kings
            && self.previous_turn == other.previous_turn
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("pieces", &self.pieces_in_play().collect::<Vec<_>>())
            .field("captures", &self.captures)
            .field("kings", &self.kings)
            .field("previous_turn", &self.previous_turn)
            .field("promotion", &self.promotion.is_some())
            .finish()
    }
}
