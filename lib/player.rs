use crate::chess::{Board, Move};
use futures_util::future::BoxFuture;
use std::fmt::Debug;

/// Trait for types that know how to reply to a chess move.
#[cfg_attr(test, mockall::automock(type Error = String;))]
pub trait Player {
    /// The reason why the player failed to produce a move.
    type Error: Debug;

    /// Decides what move to play next, if any, given the current position.
    fn play<'a, 'b, 'c>(
        &'a mut self,
        board: &'b Board,
    ) -> BoxFuture<'c, Result<Option<Move>, Self::Error>>
    where
        'a: 'c,
        'b: 'c;
}
