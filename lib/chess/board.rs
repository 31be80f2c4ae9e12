use crate::chess::{Color, File, Move, Piece, Rank, Role, Square};
use std::fmt::{self, Display, Formatter};
use std::ops::Index;

/// The chess board and the pieces on it.
///
/// The grid is stored row by row from the top of the rendered board down, so
/// row 0 holds black's home rank and row 7 white's. This type does not
/// validate whether the arrangement of pieces it holds abides by any set of
/// chess rules.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    turn: Color,
    log: Vec<(Move, Option<Piece>)>,
}

// We provide a custom implementation of Arbitrary rather than deriving,
// otherwise proptest overflows the stack generating large arrays.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*};

        (vec(any::<Option<Piece>>(), 64), any::<Color>())
            .prop_map(|(pieces, turn)| {
                let mut board = Board {
                    squares: [[None; 8]; 8],
                    turn,
                    log: Vec::new(),
                };

                board
                    .squares
                    .iter_mut()
                    .flatten()
                    .zip(pieces)
                    .for_each(|(s, p)| *s = p);

                board
            })
            .boxed()
    }
}

impl Board {
    /// The side to move next.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The grid of squares, row by row from the top of the rendered board.
    pub fn squares(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    /// The moves applied so far, oldest first, paired with the piece moved.
    ///
    /// The record only ever grows; no operation on this type reads it back.
    pub fn log(&self) -> &[(Move, Option<Piece>)] {
        &self.log
    }

    /// Relocates whatever sits on the starting square to the destination.
    ///
    /// The move is applied unconditionally, whether or not it abides by any
    /// set of chess rules. The starting square is emptied after the copy, so
    /// a move onto itself clears the square. Every application extends the
    /// [log][`Board::log`] and passes the [turn][`Board::turn`] to the other
    /// side.
    pub fn apply(&mut self, m: Move) {
        let piece = self[m.whence()];
        *self.square_mut(m.whither()) = piece;
        *self.square_mut(m.whence()) = None;
        self.log.push((m, piece));
        self.turn = !self.turn;
    }

    fn square_mut(&mut self, s: Square) -> &mut Option<Piece> {
        &mut self.squares[s.rank.index() as usize][s.file.index() as usize]
    }
}

/// The standard starting arrangement, white to move.
impl Default for Board {
    fn default() -> Self {
        use {Color::*, Role::*};

        let home = |color| {
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
                .map(|role| Some(Piece::new(color, role)))
        };

        let pawns = |color| [Some(Piece::new(color, Pawn)); 8];

        Board {
            squares: [
                home(Black),
                pawns(Black),
                [None; 8],
                [None; 8],
                [None; 8],
                [None; 8],
                pawns(White),
                home(White),
            ],
            turn: White,
            log: Vec::new(),
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, s: Square) -> &Self::Output {
        &self.squares[s.rank.index() as usize][s.file.index() as usize]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for file in File::iter() {
            write!(f, "  {} ", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        for (rank, row) in Rank::iter().rev().zip(&self.squares) {
            write!(f, " {} |", rank)?;

            for square in row {
                match square {
                    Some(piece) => write!(f, " {} |", piece.figurine())?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "   ")?;
        for file in File::iter() {
            write!(f, "  {} ", file)?;
        }

        Ok(())
    }
}
