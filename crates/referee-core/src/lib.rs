//! Core value types for the chess rules engine.
//!
//! This crate provides the vocabulary shared by the engine and its callers:
//! - [`Faction`] for the two sides
//! - [`Cell`] for 1-indexed board coordinates
//! - [`PieceKind`] for the six piece variants
//! - [`Move`] for move requests
//! - [`RulesError`] for everything the engine can reject

mod cell;
mod error;
mod faction;
mod kind;
mod mov;

pub use cell::Cell;
pub use error::RulesError;
pub use faction::Faction;
pub use kind::{PieceKind, KING_STEPS, KNIGHT_JUMPS};
pub use mov::Move;
