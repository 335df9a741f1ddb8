//! Position store backed by a pluggable rules engine.
//!
//! The store owns at most one authoritative position. Loads and moves are
//! all-or-nothing: on any failure the previous position is kept as it was.

use super::error::PositionError;
use super::types::{Color, Move, Piece, PieceKind, Square};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Position as _, Rank, Role};
use tracing::{debug, instrument, warn};

/// Board occupancy in engine order (`Square::index`).
pub type Occupants = [Option<Piece>; Square::COUNT];

/// Capability the store needs from a chess rules engine.
///
/// Implementations own a complete position. `apply` must leave the position
/// untouched when it returns an error.
pub trait RulesEngine: Clone + std::fmt::Debug {
    /// Builds a position from its serialized (FEN) form.
    fn load(serialized: &str) -> Result<Self, PositionError>
    where
        Self: Sized;

    /// Validates and plays a move.
    fn apply(&mut self, mv: &Move) -> Result<(), PositionError>;

    /// Returns the piece on a square, if any.
    fn occupant_at(&self, square: Square) -> Option<Piece>;

    /// Serializes the position (FEN).
    fn export(&self) -> String;

    /// Side whose turn it is.
    fn side_to_move(&self) -> Color;
}

// ─────────────────────────────────────────────────────────────
//  shakmaty engine
// ─────────────────────────────────────────────────────────────

/// Rules engine implemented with `shakmaty`.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyEngine {
    position: Chess,
}

impl ShakmatyEngine {
    /// Engine holding the standard starting position.
    pub fn starting() -> Self {
        Self::default()
    }
}

fn to_engine_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.col())),
        Rank::new(u32::from(7 - square.row())),
    )
}

fn from_engine_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn from_engine_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

/// Destination of the king for a castling move.
///
/// shakmaty encodes castling as king-takes-rook; authorities usually send the
/// king's landing square instead (`e1g1`).
fn castling_king_target(mv: &shakmaty::Move) -> Option<shakmaty::Square> {
    match mv {
        shakmaty::Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Some(shakmaty::Square::from_coords(file, king.rank()))
        }
        _ => None,
    }
}

impl RulesEngine for ShakmatyEngine {
    #[instrument(skip(serialized))]
    fn load(serialized: &str) -> Result<Self, PositionError> {
        let invalid = |reason: String| PositionError::InvalidSnapshot {
            fen: serialized.to_string(),
            reason,
        };

        let fen: Fen = serialized
            .trim()
            .parse()
            .map_err(|e| invalid(format!("{}", e)))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{}", e)))?;

        debug!(fen = %serialized.trim(), "Loaded position");
        Ok(Self { position })
    }

    #[instrument(skip(self, mv), fields(mv = %mv))]
    fn apply(&mut self, mv: &Move) -> Result<(), PositionError> {
        let from = to_engine_square(mv.from);
        let to = to_engine_square(mv.to);
        let promotion = mv.promotion.unwrap_or(PieceKind::Queen);

        let legal = self.position.legal_moves();
        let chosen = legal
            .iter()
            .filter(|candidate| candidate.from() == Some(from))
            .filter(|candidate| {
                candidate.to() == to || castling_king_target(candidate) == Some(to)
            })
            .find(|candidate| {
                candidate
                    .promotion()
                    .is_none_or(|role| from_engine_role(role) == promotion)
            })
            .cloned();

        match chosen {
            Some(engine_move) => {
                self.position.play_unchecked(&engine_move);
                debug!("Move applied");
                Ok(())
            }
            None => {
                warn!(legal_count = legal.len(), "Rules engine refused move");
                Err(PositionError::IllegalMove { mv: *mv })
            }
        }
    }

    fn occupant_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_engine_square(square))
            .map(|piece| Piece::new(from_engine_color(piece.color), from_engine_role(piece.role)))
    }

    fn export(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn side_to_move(&self) -> Color {
        from_engine_color(self.position.turn())
    }
}

// ─────────────────────────────────────────────────────────────
//  Store
// ─────────────────────────────────────────────────────────────

/// Holds the single authoritative position, if one has been received.
#[derive(Debug, Clone)]
pub struct PositionStore<E: RulesEngine = ShakmatyEngine> {
    current: Option<E>,
}

impl<E: RulesEngine> Default for PositionStore<E> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<E: RulesEngine> PositionStore<E> {
    /// Creates an empty store (no position loaded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the position wholesale from a serialized snapshot.
    ///
    /// On error the previous position is retained.
    #[instrument(skip(self, serialized))]
    pub fn load(&mut self, serialized: &str) -> Result<(), PositionError> {
        let next = E::load(serialized)?;
        self.current = Some(next);
        Ok(())
    }

    /// Applies a move through the rules engine.
    ///
    /// The move is played on a copy that only replaces the current position
    /// once the engine accepts it.
    #[instrument(skip(self, mv), fields(mv = %mv))]
    pub fn apply(&mut self, mv: &Move) -> Result<(), PositionError> {
        let current = self.current.as_mut().ok_or(PositionError::NoPosition)?;
        let mut next = current.clone();
        next.apply(mv)?;
        *current = next;
        Ok(())
    }

    /// Piece on a square, or `None` if empty or nothing is loaded.
    pub fn occupant_at(&self, square: Square) -> Option<Piece> {
        self.current
            .as_ref()
            .and_then(|engine| engine.occupant_at(square))
    }

    /// Occupancy of every square in engine order.
    pub fn occupants(&self) -> Occupants {
        let mut occupants = [None; Square::COUNT];
        for square in Square::all() {
            occupants[square.index()] = self.occupant_at(square);
        }
        occupants
    }

    /// Serialized form of the current position.
    pub fn export(&self) -> Option<String> {
        self.current.as_ref().map(RulesEngine::export)
    }

    /// Side to move in the current position.
    pub fn side_to_move(&self) -> Option<Color> {
        self.current.as_ref().map(RulesEngine::side_to_move)
    }

    /// Whether a position has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Drops the current position.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
