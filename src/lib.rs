//! Strictly Chess library - a chessboard kept in lockstep with a remote authority
//!
//! The client never decides the game. It renders whatever position the
//! authority last sent, lets the local player drag their own pieces, and
//! forwards the resulting move proposals. The board only changes when the
//! authority echoes a move back or sends a fresh snapshot.
//!
//! # Architecture
//!
//! - **Games**: chess types and the position store over a rules engine
//! - **Session**: the authoritative position plus the assigned role
//! - **Render**: pure derivation of the visual board
//! - **Input**: drag-and-drop capture producing move intents
//! - **Sync**: wire codec, transports and the event channel
//! - **Controller**: one dispatch point for every event
//! - **TUI**: ratatui front-end
//!
//! # Example
//!
//! ```
//! use strictly_chess::{SyncController, SyncEvent, Color, STARTING_FEN};
//!
//! let mut controller: SyncController = SyncController::new();
//! controller.handle(SyncEvent::RoleAssigned(Color::White));
//! controller.handle(SyncEvent::PositionSnapshot(STARTING_FEN.to_string()));
//! assert!(controller.model().is_loaded());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod input;
mod render;
mod session;
mod sync;
mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV, Theme, ThemeColor};

// Crate-level exports - Controller
pub use controller::{Diagnostic, SyncController, SyncEvent};

// Crate-level exports - Chess types
pub use games::chess::{
    Color, Move, Occupants, Piece, PieceKind, PositionError, PositionStore, RulesEngine,
    STARTING_FEN, ShakmatyEngine, Square, SquareParseError, glyph,
};

// Crate-level exports - Input capture
pub use input::InputCapture;

// Crate-level exports - Rendering
pub use render::{RenderModel, RenderedPiece, RenderedSquare, Shade, render};

// Crate-level exports - Session state
pub use session::{Orientation, Role, RoleState, Session};

// Crate-level exports - Synchronization channel
pub use sync::{
    AuthorityHandle, ChannelError, ChannelErrorKind, FramePoll, InboundEvent, MemoryTransport,
    OutboundEvent, SyncChannel, Transport, WebSocketTransport, memory_pair, wire,
};

// Crate-level exports - Terminal UI
pub use tui::{App, BoardGeometry, Cursor, UiAction, draw, move_cursor, run, run_with_channel, theme_color, translate};
