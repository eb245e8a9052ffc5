//! Core types: players, RNG, clock, configuration, errors, and the table
//! aggregate.
//!
//! Everything outside `core` is a single-purpose ledger; `GameState` is
//! where they are composed.

pub mod clock;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use clock::{DeadlineQueue, Timestamp};
pub use config::{
    StartingLife, StartingLifeKind, TrackerConfig, TurnOrderConfig, MAX_TURN_ORDER_LOOPS,
};
pub use error::{Result, TrackerError};
pub use player::{is_valid_player_count, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::GameRng;
pub use state::{AdvanceReport, GameState};
