use derive_more::{Display, Error, From};
use lib::io::Process;
use lib::uci::Uci;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};
use test_strategy::Arbitrary;

/// Runtime configuration for the chess engine.
#[derive(Debug, Display, Clone, Eq, PartialEq, Arbitrary, Deserialize, Serialize)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, rename = "engine", default)]
pub struct EngineConfig {
    /// The path to the engine's executable.
    pub path: String,

    /// The depth searched per move, in plies.
    pub depth: u8,

    /// How long to wait for the engine to reply with its best move.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            depth: Uci::<Process>::DEPTH,
            timeout: Uci::<Process>::TIMEOUT,
        }
    }
}

/// The reason why parsing [`EngineConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse engine configuration")]
pub struct ParseEngineConfigError(ron::de::SpannedError);

impl FromStr for EngineConfig {
    type Err = ParseEngineConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
