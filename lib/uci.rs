use crate::chess::{Board, Fen, Move};
use crate::io::Io;
use crate::player::Player;
use anyhow::{Context, Error as Anyhow};
use derive_more::{Display, Error, From};
use futures_util::future::BoxFuture;
use std::{io, time::Duration};
use tokio::time::{timeout, Instant};
use tokio::{runtime, task::block_in_place};
use tracing::{error, instrument, warn};
use vampirc_uci::{UciFen, UciMessage, UciSearchControl};

/// The reason why communicating with the engine failed.
#[derive(Debug, Display, Error, From)]
#[display(fmt = "the communication with the engine failed")]
pub struct UciError(#[from(forward)] io::Error);

/// A remote chess engine controlled through the UCI protocol.
#[derive(Debug)]
pub struct Uci<T: Io> {
    io: T,
    depth: u8,
    timeout: Duration,
}

impl<T: Io> Uci<T> {
    /// The default depth searched per move, in plies.
    pub const DEPTH: u8 = 15;

    /// How long to wait for the engine to reply with its best move.
    pub const TIMEOUT: Duration = Duration::from_secs(5);

    /// Constructs [`Uci`] that searches to `depth` and waits for a reply at most `timeout`.
    pub fn new(io: T, depth: u8, timeout: Duration) -> Self {
        Uci { io, depth, timeout }
    }

    /// Directs the engine to analyze a position.
    #[instrument(level = "debug", skip(self), err)]
    async fn go(&mut self, fen: &Fen) -> Result<(), UciError> {
        let position = UciMessage::Position {
            startpos: false,
            fen: Some(UciFen(fen.to_string())),
            moves: Vec::new(),
        };

        let go = UciMessage::Go {
            time_control: None,
            search_control: Some(UciSearchControl::depth(self.depth)),
        };

        self.io.send(&position.to_string()).await?;
        self.io.send(&go.to_string()).await?;
        self.io.flush().await?;

        Ok(())
    }

    /// Waits for the engine to announce the best move it found.
    ///
    /// Returns [`None`] if the engine does not reply with a move in time.
    #[instrument(level = "debug", skip(self), err)]
    async fn best_move(&mut self) -> Result<Option<Move>, UciError> {
        let timer = Instant::now();

        loop {
            let limit = self.timeout.saturating_sub(timer.elapsed());

            let line = match timeout(limit, self.io.recv()).await {
                Err(_) => break Ok(None),
                Ok(line) => line?,
            };

            match line.trim() {
                cmd if cmd.starts_with("bestmove") => match cmd.split_whitespace().nth(1) {
                    None => {
                        warn!("the engine announced an empty best move");
                        break Ok(None);
                    }

                    Some(token) => match token.parse() {
                        Ok(m) => break Ok(Some(m)),
                        Err(e) => {
                            warn!("ignored the engine's unintelligible best move, {}", e);
                            break Ok(None);
                        }
                    },
                },

                _ => continue,
            }
        }
    }
}

/// Directs the engine to stop searching and to quit before [`Uci`] is dropped.
impl<T: Io> Drop for Uci<T> {
    #[instrument(level = "trace", skip(self))]
    fn drop(&mut self) {
        let result: Result<(), Anyhow> = block_in_place(|| {
            runtime::Handle::try_current()?.block_on(async {
                self.io.send(&UciMessage::Stop.to_string()).await?;
                self.io.send(&UciMessage::Quit.to_string()).await?;
                self.io.flush().await?;
                Ok(())
            })
        });

        if let Err(e) = result.context("failed to gracefully shutdown the engine") {
            error!("{:?}", e);
        }
    }
}

impl<T: Io + Send> Player for Uci<T> {
    type Error = UciError;

    /// Asks the engine for the best move in the given position.
    fn play<'a, 'b, 'c>(
        &'a mut self,
        board: &'b Board,
    ) -> BoxFuture<'c, Result<Option<Move>, Self::Error>>
    where
        'a: 'c,
        'b: 'c,
    {
        Box::pin(async move {
            self.go(&Fen::from(board)).await?;
            self.best_move().await
        })
    }
}
