//! Synchronization controller.
//!
//! Owns the session, the drag state and the current render model. Every
//! inbound event and every local move intent flows through
//! [`SyncController::handle`], one at a time, in the order received.
//!
//! Local intents never touch the position: the board only changes when the
//! authority echoes a move or sends a snapshot.

use crate::games::chess::{Color, Move, RulesEngine, ShakmatyEngine, Square};
use crate::input::InputCapture;
use crate::render::{RenderModel, render};
use crate::session::{Role, Session};
use crate::sync::{ChannelError, InboundEvent, OutboundEvent};
use tracing::{debug, error, info, instrument, warn};

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Authority assigned a player color.
    RoleAssigned(Color),
    /// Authority made this client a spectator.
    SpectatorAssigned,
    /// Authority sent a full position.
    PositionSnapshot(String),
    /// Authority broadcast a move.
    MoveApplied(Move),
    /// Authority refused a move this client proposed.
    MoveRejected(Move),
    /// The user dropped a piece.
    LocalMoveIntent(Move),
    /// The connection ended.
    ChannelClosed,
}

impl From<InboundEvent> for SyncEvent {
    fn from(event: InboundEvent) -> Self {
        match event {
            InboundEvent::RoleAssigned(color) => SyncEvent::RoleAssigned(color),
            InboundEvent::SpectatorAssigned => SyncEvent::SpectatorAssigned,
            InboundEvent::PositionSnapshot(fen) => SyncEvent::PositionSnapshot(fen),
            InboundEvent::MoveApplied(mv) => SyncEvent::MoveApplied(mv),
            InboundEvent::MoveRejected(mv) => SyncEvent::MoveRejected(mv),
            InboundEvent::Closed => SyncEvent::ChannelClosed,
        }
    }
}

/// Non-fatal problem worth showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Diagnostic {
    /// A snapshot could not be loaded; the previous board is still shown.
    #[display("Ignored invalid board snapshot: {}", reason)]
    InvalidSnapshot {
        /// Rules-engine explanation.
        reason: String,
    },
    /// The authority's move could not be replayed locally; the board may be stale.
    #[display("Board out of sync after {}: {}", mv, reason)]
    Divergence {
        /// The move that failed to apply.
        mv: Move,
        /// Rules-engine explanation.
        reason: String,
    },
    /// The authority refused a proposed move.
    #[display("Move {} was rejected", mv)]
    MoveRejected {
        /// The refused move.
        mv: Move,
    },
    /// A channel frame was dropped or a send failed.
    #[display("Channel problem: {}", message)]
    Channel {
        /// Description of the failure.
        message: String,
    },
    /// The connection ended.
    #[display("Disconnected from server")]
    Disconnected,
}

/// Orchestrates session state, input and rendering.
#[derive(Debug)]
pub struct SyncController<E: RulesEngine = ShakmatyEngine> {
    session: Session<E>,
    input: InputCapture,
    model: RenderModel,
    diagnostic: Option<Diagnostic>,
    renders: u64,
}

impl<E: RulesEngine> Default for SyncController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine> SyncController<E> {
    /// Creates a controller with an empty, unassigned session and renders it.
    #[instrument]
    pub fn new() -> Self {
        let session = Session::new();
        let model = render(session.position(), session.role());
        info!("Sync controller ready");
        Self {
            session,
            input: InputCapture::new(),
            model,
            diagnostic: None,
            renders: 1,
        }
    }

    /// Session state.
    pub fn session(&self) -> &Session<E> {
        &self.session
    }

    /// Current role (the controller's state).
    pub fn role(&self) -> Role {
        self.session.role().current()
    }

    /// Latest render model.
    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    /// Square being dragged, if any.
    pub fn dragged(&self) -> Option<Square> {
        self.input.dragged()
    }

    /// Most recent diagnostic.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostic.as_ref()
    }

    /// Number of renders performed so far.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Handles one event. Returns the event to send to the authority, if any.
    #[instrument(skip(self), fields(role = ?self.role()))]
    pub fn handle(&mut self, event: SyncEvent) -> Option<OutboundEvent> {
        match event {
            SyncEvent::RoleAssigned(color) => {
                self.session.role_mut().assign(Role::Player(color));
                self.rerender();
                None
            }
            SyncEvent::SpectatorAssigned => {
                self.session.role_mut().assign(Role::Spectator);
                self.rerender();
                None
            }
            SyncEvent::PositionSnapshot(fen) => {
                if let Err(e) = self.session.position_mut().load(&fen) {
                    warn!(error = %e, "Keeping previous position after invalid snapshot");
                    self.diagnostic = Some(Diagnostic::InvalidSnapshot {
                        reason: e.to_string(),
                    });
                } else {
                    info!("Position snapshot loaded");
                    self.clear_board_diagnostic();
                }
                self.rerender();
                None
            }
            SyncEvent::MoveApplied(mv) => {
                if let Err(e) = self.session.position_mut().apply(&mv) {
                    error!(mv = %mv, error = %e, "Authority move refused locally; board may be stale");
                    self.diagnostic = Some(Diagnostic::Divergence {
                        mv,
                        reason: e.to_string(),
                    });
                } else {
                    info!(mv = %mv, "Authority move applied");
                    self.clear_board_diagnostic();
                }
                self.rerender();
                None
            }
            SyncEvent::MoveRejected(mv) => {
                info!(mv = %mv, "Authority rejected move");
                self.diagnostic = Some(Diagnostic::MoveRejected { mv });
                None
            }
            SyncEvent::LocalMoveIntent(mv) => {
                info!(mv = %mv, "Proposing move");
                Some(OutboundEvent::MoveProposed(mv))
            }
            SyncEvent::ChannelClosed => {
                self.session.reset();
                self.diagnostic = Some(Diagnostic::Disconnected);
                self.rerender();
                None
            }
        }
    }

    /// Starts a drag on `square` if the current render allows it.
    pub fn begin_drag(&mut self, square: Square) -> bool {
        self.input.begin(&self.model, square)
    }

    /// Abandons the current drag.
    pub fn cancel_drag(&mut self) {
        self.input.cancel();
    }

    /// Drops the dragged piece on `target`, proposing the move if a drag was active.
    pub fn drop_on(&mut self, target: Square) -> Option<OutboundEvent> {
        let intent = self.input.drop_on(target)?;
        self.handle(SyncEvent::LocalMoveIntent(intent))
    }

    /// Records a channel failure as a diagnostic.
    #[instrument(skip(self))]
    pub fn note_channel_error(&mut self, err: &ChannelError) {
        warn!(error = %err, "Channel error");
        self.diagnostic = Some(Diagnostic::Channel {
            message: err.kind().to_string(),
        });
    }

    /// Drops a snapshot or divergence warning once the board is consistent again.
    fn clear_board_diagnostic(&mut self) {
        if matches!(
            self.diagnostic,
            Some(Diagnostic::InvalidSnapshot { .. } | Diagnostic::Divergence { .. })
        ) {
            debug!("Board consistent again, clearing diagnostic");
            self.diagnostic = None;
        }
    }

    fn rerender(&mut self) {
        self.input.cancel();
        self.model = render(self.session.position(), self.session.role());
        self.renders += 1;
        debug!(renders = self.renders, "Re-rendered board");
    }
}
