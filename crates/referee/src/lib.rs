//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an 8×8 grid owning every live piece, with capture history
//! - [`Piece`] - a piece entity whose [`Variant`] carries special-rule state
//! - Candidate move generation per variant, including castling, en passant
//!   and promotion
//! - A legality filter that simulates each move on a copy of the board
//! - Check, checkmate, stalemate and dead-position queries, folded into [`Status`]
//! - [`Setup`] - TOML position descriptions
//!
//! # Example
//!
//! ```
//! use referee::{Board, Cell, Faction, Status};
//!
//! let mut board = Board::standard();
//! board.move_piece("f2".parse().unwrap(), "f3".parse().unwrap()).unwrap();
//! board.move_piece("e7".parse().unwrap(), "e5".parse().unwrap()).unwrap();
//! board.move_piece("g2".parse().unwrap(), "g4".parse().unwrap()).unwrap();
//! board.move_piece(Cell::D8, "h4".parse().unwrap()).unwrap();
//!
//! assert_eq!(board.status(Faction::White), Status::Checkmate);
//! ```

mod board;
mod movegen;
mod piece;
pub mod promotion;
mod render;
pub mod rules;
pub mod setup;

pub use board::Board;
pub use piece::{KingState, PawnState, Piece, Variant};
pub use promotion::{FixedPromotion, PromotionSelector};
pub use referee_core::{Cell, Faction, Move, PieceKind, RulesError};
pub use rules::Status;
pub use setup::{Placement, Setup, SetupError};
