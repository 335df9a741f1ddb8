//! Drag-and-drop gesture capture.
//!
//! Turns gesture start / drop / cancel into move intents. Whether a piece may
//! be picked up is read from the current [`RenderModel`], so the gate is the
//! same one the board was drawn with.

use crate::games::chess::{Move, Square};
use crate::render::RenderModel;
use tracing::{debug, instrument};

/// Transient drag state (the dragged piece's source square).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCapture {
    dragged: Option<Square>,
}

impl InputCapture {
    /// Creates an idle capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Square currently being dragged.
    pub fn dragged(&self) -> Option<Square> {
        self.dragged
    }

    /// Starts a drag on `square`.
    ///
    /// Returns `false` (and records nothing) for empty squares and pieces
    /// the model marks as not draggable.
    #[instrument(skip(self, model), fields(square = %square))]
    pub fn begin(&mut self, model: &RenderModel, square: Square) -> bool {
        if !model.is_draggable(square) {
            debug!("Ignoring drag start on non-draggable square");
            return false;
        }
        debug!("Drag started");
        self.dragged = Some(square);
        true
    }

    /// Ends the gesture without a drop.
    pub fn cancel(&mut self) {
        if let Some(square) = self.dragged.take() {
            debug!(square = %square, "Drag cancelled");
        }
    }

    /// Drops onto `target`, yielding a move intent if a drag was active.
    ///
    /// Dropping back on the source square still yields an intent; the
    /// authority decides what to make of it.
    #[instrument(skip(self), fields(target = %target))]
    pub fn drop_on(&mut self, target: Square) -> Option<Move> {
        let Some(source) = self.dragged.take() else {
            debug!("Ignoring drop without an active drag");
            return None;
        };
        let intent = Move::new(source, target);
        debug!(intent = %intent, "Drop produced move intent");
        Some(intent)
    }
}
