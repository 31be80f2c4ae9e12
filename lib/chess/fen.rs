use crate::chess::Board;
use derive_more::Display;

/// A chess position serialized in [Forsyth–Edwards Notation].
///
/// The board field reflects the grid faithfully, row 0 first. The remaining
/// fields are frozen at ` w KQkq - 0 1`: the record always claims it is
/// white's turn and that both sides retain full castling rights, no matter
/// how many moves have been applied.
///
/// [Forsyth–Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}", _0)]
pub struct Fen(String);

impl From<&Board> for Fen {
    fn from(board: &Board) -> Self {
        let mut fen = String::new();

        for (i, row) in board.squares().iter().enumerate() {
            if i > 0 {
                fen.push('/');
            }

            let mut empty = 0;
            for square in row {
                match square {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }

                        fen.push((*piece).into());
                    }
                }
            }

            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
        }

        fen.push_str(" w KQkq - 0 1");

        Fen(fen)
    }
}
