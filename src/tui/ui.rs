//! Stateless UI rendering for the chessboard.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::input::Cursor;
use crate::config::{Theme, ThemeColor};
use crate::games::chess::Square;
use crate::render::{RenderModel, Shade};

/// Terminal columns per board square.
pub const CELL_WIDTH: u16 = 5;
/// Terminal rows per board square.
pub const CELL_HEIGHT: u16 = 2;
/// Columns reserved for rank labels.
const LABEL_WIDTH: u16 = 2;
/// Full board width including rank labels.
pub const BOARD_WIDTH: u16 = LABEL_WIDTH + 8 * CELL_WIDTH;
/// Full board height including the file label row.
pub const BOARD_HEIGHT: u16 = 8 * CELL_HEIGHT + 1;

/// Where the 8x8 grid landed on screen during the last draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    x: u16,
    y: u16,
}

impl BoardGeometry {
    /// Grid whose top-left square starts at terminal cell (`x`, `y`).
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Display `(row, col)` under a terminal cell, if it is on the grid.
    pub fn hit(&self, column: u16, row: u16) -> Option<(u8, u8)> {
        let dx = column.checked_sub(self.x)?;
        let dy = row.checked_sub(self.y)?;
        let (col, row) = (dx / CELL_WIDTH, dy / CELL_HEIGHT);
        if col < 8 && row < 8 {
            Some((row as u8, col as u8))
        } else {
            None
        }
    }

    /// Screen area of a display cell.
    pub fn cell_rect(&self, display_row: u8, display_col: u8) -> Rect {
        Rect::new(
            self.x + u16::from(display_col) * CELL_WIDTH,
            self.y + u16::from(display_row) * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }
}

/// Maps a configured color name onto a terminal color.
pub fn theme_color(color: ThemeColor) -> Color {
    match color {
        ThemeColor::Black => Color::Black,
        ThemeColor::Red => Color::Red,
        ThemeColor::Green => Color::Green,
        ThemeColor::Yellow => Color::Yellow,
        ThemeColor::Blue => Color::Blue,
        ThemeColor::Magenta => Color::Magenta,
        ThemeColor::Cyan => Color::Cyan,
        ThemeColor::Gray => Color::Gray,
        ThemeColor::DarkGray => Color::DarkGray,
        ThemeColor::LightYellow => Color::LightYellow,
        ThemeColor::LightGreen => Color::LightGreen,
        ThemeColor::LightBlue => Color::LightBlue,
        ThemeColor::White => Color::White,
    }
}

/// Renders title, board and status line. Returns where the board was drawn.
pub fn draw(
    frame: &mut Frame,
    model: &RenderModel,
    dragged: Option<Square>,
    cursor: Cursor,
    status: &str,
    theme: &Theme,
) -> BoardGeometry {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Min(BOARD_HEIGHT),     // Board
            Constraint::Length(3),             // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Chess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let geometry = draw_board(frame, chunks[1], model, dragged, cursor, theme);

    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    geometry
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    model: &RenderModel,
    dragged: Option<Square>,
    cursor: Cursor,
    theme: &Theme,
) -> BoardGeometry {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let geometry = BoardGeometry::new(board_area.x + LABEL_WIDTH, board_area.y);
    let visible = frame.area();

    for (display_row, row) in model.display_rows().into_iter().enumerate() {
        for (display_col, cell) in row.into_iter().enumerate() {
            let rect = geometry
                .cell_rect(display_row as u8, display_col as u8)
                .intersection(visible);
            if rect.is_empty() {
                continue;
            }

            let background = match cell.shade {
                Shade::Light => theme_color(*theme.light_square()),
                Shade::Dark => theme_color(*theme.dark_square()),
            };
            let mut style = Style::default().bg(background).fg(Color::Black);
            if dragged == Some(cell.square) {
                style = style.bg(Color::Cyan);
            }
            if cursor.row == display_row as u8 && cursor.col == display_col as u8 {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let symbol = match cell.piece {
                Some(piece) => {
                    if piece.draggable {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    piece.glyph.to_string()
                }
                None => String::new(),
            };

            let paragraph = Paragraph::new(vec![Line::from(symbol), Line::from("")])
                .style(style)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, rect);
        }
    }

    draw_labels(frame, geometry, model, visible);
    geometry
}

fn draw_labels(frame: &mut Frame, geometry: BoardGeometry, model: &RenderModel, visible: Rect) {
    let label_style = Style::default().fg(Color::DarkGray);

    for (row, rank) in model.rank_labels().into_iter().enumerate() {
        let cell = geometry.cell_rect(row as u8, 0);
        let rect = Rect::new(cell.x.saturating_sub(LABEL_WIDTH), cell.y, LABEL_WIDTH, 1)
            .intersection(visible);
        if !rect.is_empty() {
            frame.render_widget(Paragraph::new(rank.to_string()).style(label_style), rect);
        }
    }

    for (col, file) in model.file_labels().into_iter().enumerate() {
        let cell = geometry.cell_rect(8, col as u8);
        let rect = Rect::new(cell.x, cell.y, CELL_WIDTH, 1).intersection(visible);
        if !rect.is_empty() {
            frame.render_widget(
                Paragraph::new(file.to_string())
                    .style(label_style)
                    .alignment(Alignment::Center),
                rect,
            );
        }
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
