use crate::chess::{Color, Role};
use std::fmt::{self, Display, Formatter, Write};

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Color`] and [`Role`].
    pub fn new(color: Color, role: Role) -> Self {
        Piece { color, role }
    }

    /// The figurine denoting this piece.
    pub fn figurine(&self) -> &'static str {
        use {Color::*, Role::*};
        match (self.color, self.role) {
            (White, Pawn) => "♙",
            (White, Knight) => "♘",
            (White, Bishop) => "♗",
            (White, Rook) => "♖",
            (White, Queen) => "♕",
            (White, King) => "♔",
            (Black, Pawn) => "♟",
            (Black, Knight) => "♞",
            (Black, Bishop) => "♝",
            (Black, Rook) => "♜",
            (Black, Queen) => "♛",
            (Black, King) => "♚",
        }
    }
}

/// The letter denoting this piece in FEN notation, uppercase for white.
impl From<Piece> for char {
    fn from(p: Piece) -> Self {
        match p.color {
            Color::White => char::from(p.role).to_ascii_uppercase(),
            Color::Black => char::from(p.role),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char((*self).into())
    }
}
