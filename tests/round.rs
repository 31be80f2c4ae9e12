use lib::chess::{Board, Color, Piece, Role, Square};
use lib::{game::Game, io::Pipe, uci::Uci};
use proptest::test_runner::TestCaseError;
use std::time::Duration;
use test_strategy::proptest;
use tokio::io::{duplex, split, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime;

#[proptest(cases = 1)]
fn one_round_against_a_scripted_engine() {
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;

    rt.block_on(async {
        let (near, far) = duplex(512);

        let script = tokio::spawn(async move {
            let (r, mut w) = split(far);
            let mut lines = BufReader::new(r).lines();
            let mut log = Vec::new();

            while let Some(line) = lines.next_line().await? {
                log.push(line.clone());

                if line.starts_with("go") {
                    w.write_all(b"info string thinking\n").await?;
                    w.write_all(b"bestmove d2d4 ponder d7d5\n").await?;
                    w.flush().await?;
                } else if line == "quit" {
                    break;
                }
            }

            Ok::<_, std::io::Error>(log)
        });

        let (r, w) = split(near);
        let player = Uci::new(Pipe::from((w, r)), 1, Duration::from_secs(5));
        let mut game = Game::new(Board::default(), player);

        // The square the user sees labeled e2 sits on row 6 of the grid.
        let reply = game.round((6, 4), (4, 4)).await?;
        assert_eq!(reply, Some("d2d4".parse()?));

        // The reply relocates pieces by its rank digits, so it lands on
        // black's side of the grid.
        let pawn = Piece::new(Color::Black, Role::Pawn);
        assert_eq!(game.board()["d2".parse::<Square>()?], None);
        assert_eq!(game.board()["d4".parse::<Square>()?], Some(pawn));

        drop(game);

        let log = script.await??;

        assert_eq!(
            log.first().map(|l| l.trim_end()),
            Some("position fen rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1")
        );

        assert_eq!(log.get(1).map(|l| l.trim_end()), Some("go depth 1"));
        assert_eq!(log.get(2).map(String::as_str), Some("stop"));
        assert_eq!(log.get(3).map(String::as_str), Some("quit"));

        Ok::<_, TestCaseError>(())
    })?;
}
