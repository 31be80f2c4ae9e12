use crate::engine::EngineConfig;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Square};
use lib::game::Game;
use lib::io::Process;
use lib::uci::Uci;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{instrument, warn};

/// Maps a square to the row and column of the grid as rendered.
fn coordinates(s: Square) -> (u8, u8) {
    (7 - s.rank.index(), s.file.index())
}

/// A game of chess against a UCI compatible engine.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The engine to play against.
    #[clap(default_value_t)]
    engine: EngineConfig,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let process = Process::spawn(&self.engine.path)?;
        let player = Uci::new(process, self.engine.depth, self.engine.timeout);
        let mut game = Game::new(Board::default(), player);
        let mut lines = BufReader::new(stdin()).lines();

        println!("{}", game.board());

        loop {
            let line = match lines.next_line().await? {
                None => break Ok(()),
                Some(line) => line,
            };

            let mut words = line.split_whitespace();

            let (whence, whither) = match (words.next(), words.next(), words.next()) {
                (None, ..) => continue,
                (Some("quit"), ..) => break Ok(()),

                (Some(from), Some(to), None) => match (from.parse(), to.parse()) {
                    (Ok(from), Ok(to)) => (coordinates(from), coordinates(to)),
                    _ => {
                        warn!("expected a pair of squares, e.g. `e2 e4`");
                        continue;
                    }
                },

                _ => {
                    warn!("expected a pair of squares, e.g. `e2 e4`");
                    continue;
                }
            };

            match game.round(whence, whither).await? {
                Some(reply) => println!("{}", reply),
                None => println!("the engine has no reply"),
            }

            println!("{}", game.board());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn squares_map_to_the_grid_as_rendered() {
        assert_eq!(coordinates("a8".parse()?), (0, 0));
        assert_eq!(coordinates("e2".parse()?), (6, 4));
        assert_eq!(coordinates("h1".parse()?), (7, 7));
    }
}
