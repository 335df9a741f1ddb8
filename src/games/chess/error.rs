//! Errors reported by the position store.

use super::types::Move;
use derive_more::{Display, Error};

/// Error that can occur when loading a snapshot or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PositionError {
    /// The snapshot could not be parsed into a valid position.
    #[display("Invalid snapshot {:?}: {}", fen, reason)]
    InvalidSnapshot {
        /// The rejected serialized position.
        fen: String,
        /// Why the rules engine refused it.
        reason: String,
    },

    /// The rules engine refused the move in the current position.
    #[display("Illegal move {}", mv)]
    IllegalMove {
        /// The refused move.
        mv: Move,
    },

    /// A move arrived before any position was loaded.
    #[display("No position loaded")]
    NoPosition,
}
