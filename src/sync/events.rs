//! Event vocabulary exchanged with the authority.

use crate::games::chess::{Color, Move};

/// Events pushed by the authority, in the core's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// This client plays `Color`.
    RoleAssigned(Color),
    /// This client only watches.
    SpectatorAssigned,
    /// Complete board position (FEN) replacing the current one.
    PositionSnapshot(String),
    /// A move made by either side.
    MoveApplied(Move),
    /// The authority refused a move this client proposed.
    MoveRejected(Move),
    /// The connection ended.
    Closed,
}

/// Events sent to the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Request to play a move.
    MoveProposed(Move),
}
