//! Application state and logic.

use tracing::{debug, info, warn};

use super::input::{Cursor, UiAction, move_cursor};
use super::ui::BoardGeometry;
use crate::controller::SyncController;
use crate::session::Role;
use crate::sync::{ChannelError, InboundEvent, OutboundEvent};

/// Main application state.
#[derive(Debug, Default)]
pub struct App {
    controller: SyncController,
    cursor: Cursor,
    geometry: Option<BoardGeometry>,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self::default()
    }

    /// The synchronization controller.
    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    /// Keyboard cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Records where the board was drawn, for mouse hit-testing.
    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = Some(geometry);
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one item read from the sync channel.
    pub fn handle_inbound(&mut self, item: Result<InboundEvent, ChannelError>) {
        match item {
            Ok(event) => {
                if let Some(outbound) = self.controller.handle(event.into()) {
                    warn!(?outbound, "Dropping proposal raised by inbound event");
                }
            }
            Err(e) => self.controller.note_channel_error(&e),
        }
    }

    /// Records a failed send.
    pub fn note_channel_error(&mut self, err: &ChannelError) {
        self.controller.note_channel_error(err);
    }

    /// Handles a user action. Returns a proposal to send, if one was made.
    pub fn handle_action(&mut self, action: UiAction) -> Option<OutboundEvent> {
        debug!(?action, "Handling UI action");

        match action {
            UiAction::Quit => {
                info!("User quit");
                self.should_quit = true;
                None
            }
            UiAction::MoveCursor(key) => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            UiAction::Activate => {
                let square = self
                    .controller
                    .model()
                    .square_at_display(self.cursor.row, self.cursor.col)?;
                if self.controller.dragged().is_some() {
                    self.controller.drop_on(square)
                } else {
                    self.controller.begin_drag(square);
                    None
                }
            }
            UiAction::Cancel => {
                self.controller.cancel_drag();
                None
            }
            UiAction::Press { column, row } => {
                let (display_row, display_col) = self.geometry?.hit(column, row)?;
                self.cursor = Cursor {
                    row: display_row,
                    col: display_col,
                };
                let square = self
                    .controller
                    .model()
                    .square_at_display(display_row, display_col)?;
                self.controller.begin_drag(square);
                None
            }
            UiAction::Release { column, row } => {
                let target = self
                    .geometry
                    .and_then(|geometry| geometry.hit(column, row))
                    .and_then(|(r, c)| self.controller.model().square_at_display(r, c));
                match target {
                    Some(square) => self.controller.drop_on(square),
                    None => {
                        self.controller.cancel_drag();
                        None
                    }
                }
            }
        }
    }

    /// Text for the status line.
    pub fn status_line(&self) -> String {
        let model = self.controller.model();
        let mut parts = Vec::new();

        match (model.role(), model.side_to_move()) {
            (Role::Unassigned, None) => parts.push("Waiting for server".to_string()),
            (role, _) => parts.push(format!("Role: {}", role.label())),
        }
        if let Some(color) = model.side_to_move() {
            parts.push(format!("{} to move", color.label()));
        }
        if let Some(square) = self.controller.dragged() {
            parts.push(format!("Dragging {}", square));
        }
        if let Some(diagnostic) = self.controller.diagnostic() {
            parts.push(diagnostic.to_string());
        }
        parts.push("q to quit".to_string());

        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::{Color, Move, STARTING_FEN};
    use crossterm::event::KeyCode;

    fn white_at_start() -> App {
        let mut app = App::new();
        app.handle_inbound(Ok(InboundEvent::RoleAssigned(Color::White)));
        app.handle_inbound(Ok(InboundEvent::PositionSnapshot(STARTING_FEN.to_string())));
        app
    }

    #[test]
    fn keyboard_drag_proposes_move() {
        let mut app = white_at_start();
        // Default cursor is a1; walk to e2.
        app.handle_action(UiAction::MoveCursor(KeyCode::Up));
        for _ in 0..4 {
            app.handle_action(UiAction::MoveCursor(KeyCode::Right));
        }
        assert_eq!(app.handle_action(UiAction::Activate), None);
        assert!(app.controller().dragged().is_some());

        app.handle_action(UiAction::MoveCursor(KeyCode::Up));
        app.handle_action(UiAction::MoveCursor(KeyCode::Up));
        let sent = app.handle_action(UiAction::Activate);

        let expected = Move::from_algebraic("e2", "e4").expect("valid squares");
        assert_eq!(sent, Some(OutboundEvent::MoveProposed(expected)));
        assert_eq!(app.controller().dragged(), None);
    }

    #[test]
    fn mouse_release_off_board_cancels_drag() {
        let mut app = white_at_start();
        app.set_geometry(BoardGeometry::new(0, 0));

        // e2 is display row 6, col 4 for white.
        app.handle_action(UiAction::Press { column: 20, row: 12 });
        assert!(app.controller().dragged().is_some());

        assert_eq!(app.handle_action(UiAction::Release { column: 90, row: 40 }), None);
        assert_eq!(app.controller().dragged(), None);
    }

    #[test]
    fn mouse_without_geometry_is_ignored() {
        let mut app = white_at_start();
        assert_eq!(app.handle_action(UiAction::Press { column: 20, row: 12 }), None);
        assert_eq!(app.controller().dragged(), None);
    }

    #[test]
    fn status_line_reports_waiting_then_role() {
        let mut app = App::new();
        assert!(app.status_line().starts_with("Waiting for server"));

        app.handle_inbound(Ok(InboundEvent::RoleAssigned(Color::Black)));
        app.handle_inbound(Ok(InboundEvent::PositionSnapshot(STARTING_FEN.to_string())));
        let status = app.status_line();
        assert!(status.contains("Black"), "{status}");
        assert!(status.contains("White to move"), "{status}");
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new();
        assert!(!app.should_quit());
        app.handle_action(UiAction::Quit);
        assert!(app.should_quit());
    }
}
