//! Pure derivation of the visual board from session state.
//!
//! A [`RenderModel`] is rebuilt from scratch on every state change and is
//! never patched. Display placement depends on the role's orientation;
//! engine coordinates never do.

use crate::games::chess::{Color, Piece, PositionStore, RulesEngine, Square, glyph};
use crate::session::{Orientation, Role, RoleState};
use tracing::{instrument, trace};

/// Square colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    /// Light square.
    Light,
    /// Dark square.
    Dark,
}

/// A piece as drawn on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedPiece {
    /// The underlying piece.
    pub piece: Piece,
    /// Display symbol.
    pub glyph: char,
    /// Whether local input may pick this piece up.
    pub draggable: bool,
}

/// One of the 64 board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedSquare {
    /// Engine coordinate, used for move computation.
    pub square: Square,
    /// Row on screen (0 = top).
    pub display_row: u8,
    /// Column on screen (0 = left).
    pub display_col: u8,
    /// Light or dark.
    pub shade: Shade,
    /// Occupant, if any.
    pub piece: Option<RenderedPiece>,
    /// Accepts drops. Every square does, empty or not.
    pub drop_target: bool,
}

/// Full visual description of the board at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    squares: Vec<RenderedSquare>,
    orientation: Orientation,
    role: Role,
    side_to_move: Option<Color>,
}

impl RenderModel {
    /// All squares in engine order.
    pub fn squares(&self) -> &[RenderedSquare] {
        &self.squares
    }

    /// The cell for an engine square.
    pub fn square(&self, square: Square) -> &RenderedSquare {
        &self.squares[square.index()]
    }

    /// Orientation used for this render.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Role this render was derived for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Side to move, when a position is loaded.
    pub fn side_to_move(&self) -> Option<Color> {
        self.side_to_move
    }

    /// Whether a position was loaded when rendering.
    pub fn is_loaded(&self) -> bool {
        self.side_to_move.is_some()
    }

    /// Whether the piece on `square` may be picked up.
    pub fn is_draggable(&self, square: Square) -> bool {
        self.square(square).piece.is_some_and(|piece| piece.draggable)
    }

    /// Maps a screen cell back to the engine square it shows.
    pub fn square_at_display(&self, display_row: u8, display_col: u8) -> Option<Square> {
        let shown = Square::new(display_row, display_col)?;
        Some(match self.orientation {
            Orientation::Standard => shown,
            Orientation::Flipped => shown.mirrored(),
        })
    }

    /// Rows in screen order, each with its cells left to right.
    pub fn display_rows(&self) -> Vec<Vec<&RenderedSquare>> {
        (0..8)
            .map(|row| {
                (0..8)
                    .filter_map(|col| self.square_at_display(row, col))
                    .map(|square| self.square(square))
                    .collect()
            })
            .collect()
    }

    /// File letters in screen order.
    pub fn file_labels(&self) -> Vec<char> {
        (0..8)
            .filter_map(|col| self.square_at_display(0, col))
            .map(Square::file)
            .collect()
    }

    /// Rank numbers in screen order.
    pub fn rank_labels(&self) -> Vec<u8> {
        (0..8)
            .filter_map(|row| self.square_at_display(row, 0))
            .map(Square::rank)
            .collect()
    }
}

/// Renders the board for the given position and role.
#[instrument(skip_all, fields(role = ?role.current()))]
pub fn render<E: RulesEngine>(position: &PositionStore<E>, role: &RoleState) -> RenderModel {
    let orientation = role.orientation();
    let occupants = position.occupants();

    let squares = Square::all()
        .map(|square| {
            let displayed = match orientation {
                Orientation::Standard => square,
                Orientation::Flipped => square.mirrored(),
            };
            let shade = if (square.row() + square.col()) % 2 == 0 {
                Shade::Light
            } else {
                Shade::Dark
            };
            let piece = occupants[square.index()].map(|piece| RenderedPiece {
                piece,
                glyph: glyph(piece),
                draggable: role.may_drag(piece.color),
            });

            RenderedSquare {
                square,
                display_row: displayed.row(),
                display_col: displayed.col(),
                shade,
                piece,
                drop_target: true,
            }
        })
        .collect::<Vec<_>>();

    trace!(
        pieces = squares.iter().filter(|s| s.piece.is_some()).count(),
        "Rendered board"
    );

    RenderModel {
        squares,
        orientation,
        role: role.current(),
        side_to_move: position.side_to_move(),
    }
}
