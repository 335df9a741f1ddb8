//! Keyboard and mouse translation.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Keyboard cursor in display coordinates (row 0 is the top of the screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Display row.
    pub row: u8,
    /// Display column.
    pub col: u8,
}

impl Default for Cursor {
    fn default() -> Self {
        // Bottom-left corner: a1 for white, h8 for black.
        Self { row: 7, col: 0 }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Leave the client.
    Quit,
    /// Move the keyboard cursor.
    MoveCursor(KeyCode),
    /// Pick up or drop at the cursor.
    Activate,
    /// Abandon the current drag.
    Cancel,
    /// Mouse button pressed at a terminal cell.
    Press {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
    /// Mouse button released at a terminal cell.
    Release {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Cursor, key: KeyCode) -> Cursor {
    match key {
        KeyCode::Up => Cursor {
            row: cursor.row.saturating_sub(1),
            ..cursor
        },
        KeyCode::Down => Cursor {
            row: (cursor.row + 1).min(7),
            ..cursor
        },
        KeyCode::Left => Cursor {
            col: cursor.col.saturating_sub(1),
            ..cursor
        },
        KeyCode::Right => Cursor {
            col: (cursor.col + 1).min(7),
            ..cursor
        },
        _ => cursor,
    }
}

/// Translates a terminal event into an action, if it means anything here.
pub fn translate(event: &Event) -> Option<UiAction> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiAction::Quit)
        }
        KeyCode::Char('q') => Some(UiAction::Quit),
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            Some(UiAction::MoveCursor(code))
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Activate),
        KeyCode::Esc => Some(UiAction::Cancel),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Option<UiAction> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UiAction::Press { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(UiAction::Release { column, row }),
        _ => None,
    }
}
