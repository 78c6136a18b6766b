//! Promotion selection.
//!
//! When a pawn reaches its farthest rank the board asks an external
//! [`PromotionSelector`] what it becomes. Without a selector, or when the
//! answer is not one of the four promotion kinds, the pawn becomes a queen.

use referee_core::{Cell, Faction, PieceKind};
use tracing::warn;

/// Hook consulted when a pawn promotes.
///
/// The answer is free text so that callers can forward raw player input;
/// `q`, `r`, `b`, `n` and the full piece names are recognised.
pub trait PromotionSelector {
    fn choose(&mut self, faction: Faction, cell: Cell) -> String;
}

impl<F> PromotionSelector for F
where
    F: FnMut(Faction, Cell) -> String,
{
    fn choose(&mut self, faction: Faction, cell: Cell) -> String {
        self(faction, cell)
    }
}

/// A selector that always answers with the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub PieceKind);

impl PromotionSelector for FixedPromotion {
    fn choose(&mut self, _faction: Faction, _cell: Cell) -> String {
        self.0.selection_char().to_string()
    }
}

/// Maps a selection to the promoted kind, falling back to a queen.
pub(crate) fn resolve(selection: &str) -> PieceKind {
    match PieceKind::from_selection(selection) {
        Some(kind) => kind,
        None => {
            if !selection.trim().is_empty() {
                warn!(selection, "unrecognised promotion choice, promoting to queen");
            }
            PieceKind::Queen
        }
    }
}
