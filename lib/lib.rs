/// Chess domain types.
pub mod chess;
/// The state of a game of chess.
pub mod game;
/// Line-oriented communication channels.
pub mod io;
/// Trait for types that know how to play chess.
pub mod player;
/// A client for UCI compatible chess engines.
pub mod uci;
