//! Core domain types for the chessboard.
//!
//! Coordinates follow the engine-native layout: row 0 is rank 8 and
//! column 0 is the a-file, so iterating rows top to bottom walks the board
//! as White sees it.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Side of the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Color {
    /// White pieces (move first).
    #[serde(rename = "w")]
    White,
    /// Black pieces.
    #[serde(rename = "b")]
    Black,
}

impl Color {
    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Kind of chess piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum PieceKind {
    /// Pawn.
    #[serde(rename = "p")]
    Pawn,
    /// Knight.
    #[serde(rename = "n")]
    Knight,
    /// Bishop.
    #[serde(rename = "b")]
    Bishop,
    /// Rook.
    #[serde(rename = "r")]
    Rook,
    /// Queen.
    #[serde(rename = "q")]
    Queen,
    /// King.
    #[serde(rename = "k")]
    King,
}

impl PieceKind {
    /// Lowercase letter used on the wire and in FEN.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Piece {
    /// Owning side.
    pub color: Color,
    /// Piece kind.
    pub kind: PieceKind,
}

// ─────────────────────────────────────────────────────────────
//  Squares
// ─────────────────────────────────────────────────────────────

/// Error returned when an algebraic square string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid square {:?}", input)]
pub struct SquareParseError {
    /// The rejected input.
    pub input: String,
}

/// A board coordinate in engine-native orientation.
///
/// Both components are always within `0..8`; construction goes through
/// [`Square::new`] or [`Square::from_algebraic`], which reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a square from row and column, each in `0..8`.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Creates a square from its engine-order index (`row * 8 + col`).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then(|| Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        })
    }

    /// Row, 0 being rank 8.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column, 0 being the a-file.
    pub fn col(self) -> u8 {
        self.col
    }

    /// Index in engine order (`row * 8 + col`).
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// File letter (`a`..`h`).
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number (1..8).
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Square reflected through the board centre (both axes).
    pub fn mirrored(self) -> Self {
        Self {
            row: 7 - self.row,
            col: 7 - self.col,
        }
    }

    /// Parses algebraic notation such as `"e2"`.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.trim().chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank)
        {
            return None;
        }
        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Self::new(row, col)
    }

    /// Formats the square in algebraic notation.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// All 64 squares in engine order (row 0 first).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s).ok_or_else(|| SquareParseError {
            input: s.to_string(),
        })
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_algebraic()
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves
// ─────────────────────────────────────────────────────────────

/// A move as a (from, to) pair.
///
/// Castling, en passant and promotion are resolved by the rules engine.
/// `promotion` is only ever filled in from authority events; local intents
/// never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source square.
    pub from: Square,
    /// Target square.
    pub to: Square,
    /// Promotion piece chosen by the authority, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a plain (from, to) move.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns this move with a promotion piece attached.
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    /// Parses a move from two algebraic squares.
    pub fn from_algebraic(from: &str, to: &str) -> Option<Self> {
        Some(Self::new(
            Square::from_algebraic(from)?,
            Square::from_algebraic(to)?,
        ))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_follows_engine_orientation() {
        let e2 = Square::new(6, 4).unwrap();
        assert_eq!(e2.to_algebraic(), "e2");
        assert_eq!(Square::from_algebraic("a8"), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("h1"), Square::new(7, 7));
    }

    #[test]
    fn rejects_out_of_range_squares() {
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a10"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn mirrored_is_an_involution() {
        for square in Square::all() {
            assert_eq!(square.mirrored().mirrored(), square);
        }
        assert_eq!(Square::from_algebraic("e2").unwrap().mirrored().to_algebraic(), "d7");
    }

    #[test]
    fn move_display_appends_promotion() {
        let mv = Move::from_algebraic("e7", "e8").unwrap().with_promotion(PieceKind::Knight);
        assert_eq!(mv.to_string(), "e7e8n");
    }
}
