//! Chess domain: board types, glyphs and the position store.

mod error;
mod glyph;
mod position;
mod types;

pub use error::PositionError;
pub use glyph::glyph;
pub use position::{Occupants, PositionStore, RulesEngine, ShakmatyEngine};
pub use types::{Color, Move, Piece, PieceKind, Square, SquareParseError};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
