use crate::chess::{Board, Move, SquareOutOfRange};
use crate::player::Player;
use derive_more::{Constructor, Display, Error};
use tracing::{field::display, instrument, warn, Span};

/// The reason why the [`Game`] was interrupted.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum GameInterrupted<E> {
    #[display(fmt = "received a coordinate that is outside of the board")]
    InvalidCoordinate(SquareOutOfRange),

    #[display(fmt = "the engine encountered an error")]
    Engine(E),
}

impl<E> From<SquareOutOfRange> for GameInterrupted<E> {
    fn from(e: SquareOutOfRange) -> Self {
        GameInterrupted::InvalidCoordinate(e)
    }
}

/// Holds the state of a game of chess between the user and an engine.
#[derive(Debug, Constructor)]
pub struct Game<P> {
    board: Board,
    player: P,
}

impl<P: Player> Game<P> {
    /// The current state of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays one round of the game.
    ///
    /// The user's piece is relocated from `whence` to `whither` and the engine
    /// is asked for a move in reply. Rounds are played one at a time, the
    /// engine is never consulted about a position it has already replied to.
    #[instrument(level = "debug", skip(self), err, fields(reply))]
    pub async fn round(
        &mut self,
        whence: (u8, u8),
        whither: (u8, u8),
    ) -> Result<Option<Move>, GameInterrupted<P::Error>> {
        use GameInterrupted::*;

        let m = Move(whence.try_into()?, whither.try_into()?);
        self.board.apply(m);

        match self.player.play(&self.board).await.map_err(Engine)? {
            None => {
                warn!("the engine did not reply with a move");
                Ok(None)
            }

            Some(reply) => {
                Span::current().record("reply", display(reply));
                self.board.apply(reply);
                Ok(Some(reply))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, Piece, Role, Square};
    use crate::player::MockPlayer;
    use futures_util::FutureExt;
    use std::future::ready;
    use test_strategy::proptest;
    use tokio::runtime;

    #[proptest]
    fn round_applies_the_move_and_the_engines_reply(
        board: Board,
        #[strategy((0..8u8, 0..8u8))] whence: (u8, u8),
        #[strategy((0..8u8, 0..8u8))] whither: (u8, u8),
        reply: Move,
    ) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut expected = board.clone();
        expected.apply(Move(whence.try_into()?, whither.try_into()?));

        let mut player = MockPlayer::new();

        let pos = expected.clone();
        player
            .expect_play()
            .once()
            .withf(move |board| board == &pos)
            .return_once(move |_| ready(Ok(Some(reply))).boxed());

        expected.apply(reply);

        let mut game = Game::new(board, player);
        assert_eq!(rt.block_on(game.round(whence, whither)), Ok(Some(reply)));
        assert_eq!(game.board(), &expected);
    }

    #[proptest]
    fn round_proceeds_if_the_engine_claims_no_move(
        board: Board,
        #[strategy((0..8u8, 0..8u8))] whence: (u8, u8),
        #[strategy((0..8u8, 0..8u8))] whither: (u8, u8),
    ) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut expected = board.clone();
        expected.apply(Move(whence.try_into()?, whither.try_into()?));

        let mut player = MockPlayer::new();
        player
            .expect_play()
            .once()
            .return_once(|_| ready(Ok(None)).boxed());

        let mut game = Game::new(board, player);
        assert_eq!(rt.block_on(game.round(whence, whither)), Ok(None));
        assert_eq!(game.board(), &expected);
    }

    #[proptest]
    fn round_rejects_coordinates_outside_of_the_board(
        board: Board,
        whence: (u8, u8),
        #[filter(#whence.0 > 7 || #whence.1 > 7 || #whither.0 > 7 || #whither.1 > 7)]
        whither: (u8, u8),
    ) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let before = board.clone();
        let mut game = Game::new(board, MockPlayer::new());

        assert!(matches!(
            rt.block_on(game.round(whence, whither)),
            Err(GameInterrupted::InvalidCoordinate(_))
        ));

        assert_eq!(game.board(), &before);
    }

    #[proptest]
    fn round_interrupts_the_game_if_the_engine_fails(
        board: Board,
        #[strategy((0..8u8, 0..8u8))] whence: (u8, u8),
        #[strategy((0..8u8, 0..8u8))] whither: (u8, u8),
        e: String,
    ) {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let mut player = MockPlayer::new();

        let err = Err(e.clone());
        player
            .expect_play()
            .return_once(move |_| ready(err).boxed());

        let mut game = Game::new(board, player);

        assert_eq!(
            rt.block_on(game.round(whence, whither)),
            Err(GameInterrupted::Engine(e))
        );
    }

    #[proptest]
    fn the_engines_reply_is_applied_by_its_rank_digits() {
        let rt = runtime::Builder::new_multi_thread().build()?;

        let reply = "e2e4".parse::<Move>()?;

        let mut player = MockPlayer::new();
        player
            .expect_play()
            .return_once(move |_| ready(Ok(Some(reply))).boxed());

        let mut game = Game::new(Board::default(), player);
        assert_eq!(rt.block_on(game.round((6, 4), (4, 4))), Ok(Some(reply)));

        let pawn = Piece::new(Color::Black, Role::Pawn);
        assert_eq!(game.board()["e2".parse::<Square>()?], None);
        assert_eq!(game.board()["e4".parse::<Square>()?], Some(pawn));
    }
}
