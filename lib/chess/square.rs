use crate::chess::{File, FileOutOfRange, ParseFileError, ParseRankError, Rank, RankOutOfRange};
use derive_more::{Display, Error, From};
use std::str::FromStr;

/// A square on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", file, rank)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    pub fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }
}

/// The reason why converting [`Square`] from a pair of grid indices failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "expected row and column indices in the range `(0..=7)`")]
pub enum SquareOutOfRange {
    RankOutOfRange(RankOutOfRange),
    FileOutOfRange(FileOutOfRange),
}

/// Converts a `(row, col)` pair of grid indices to the [`Square`] whose
/// [`Rank`] has index `row` and whose [`File`] has index `col`.
impl TryFrom<(u8, u8)> for Square {
    type Error = SquareOutOfRange;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Ok(Square {
            file: col.try_into()?,
            rank: row.try_into()?,
        })
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse square")]
pub enum ParseSquareError {
    InvalidFile(ParseFileError),
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}
