//! Error type shared by every mutator.
//!
//! A mutator that returns `Err` has left all state untouched, so callers at
//! the UI boundary are free to log and ignore it.

use thiserror::Error;

use super::player::{PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::ledgers::MAX_COUNTER_STEP;

/// Errors raised by table-state operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("player count {0} is outside {min}..={max}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    InvalidPlayerCount(usize),

    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("counter change of {0} exceeds the per-call limit of {limit}", limit = MAX_COUNTER_STEP)]
    CounterDeltaTooLarge(i32),

    #[error("turn order needs at least one player")]
    EmptyRoster,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("snapshot version {found} is newer than supported version {supported}")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },

    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("snapshot storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TrackerError>;
