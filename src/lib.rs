//! ZONETRIS - a falling block puzzle with color zones
//!
//! The board is split into three 4-column zones (red, blue, green). Every
//! piece is assigned one of those colors and only counts when it locks inside
//! the matching zone; anything else turns gray. Clearing works per zone
//! segment rather than per full row.
//!
//! This crate is the game engine. Front-ends drive a [`Session`] with
//! [`Session::advance`] on a fixed cadence, forward player commands, and draw
//! from [`Session::snapshot`].

pub mod board;
pub mod game;
pub mod piece;
pub mod score;
pub mod spawner;
pub mod speed;
pub mod tetromino;

pub use board::{Board, Cell, PieceColor, Zone};
pub use game::{Action, GameState, Session, Snapshot, TickEvent};
pub use piece::Piece;
pub use spawner::{NextPiece, Randomizer, RngRandomizer, SequenceRandomizer};
pub use tetromino::Shape;
