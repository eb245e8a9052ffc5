//! # life-tracker
//!
//! Table state for a tabletop card game companion: life totals, commander
//! damage, named counters and a randomized turn-order reveal.
//!
//! ## Design Principles
//!
//! 1. **Owned state**: one [`GameState`] per table, passed to whoever needs
//!    it. Ledgers never reach into each other; cross-ledger effects are
//!    sequenced by `GameState`.
//!
//! 2. **Host-driven time**: nothing sleeps or spawns. Timed behaviour (delta
//!    auto-clear, turn-order ticks, auto-dismiss) is a set of deadlines the
//!    host fires with [`GameState::advance`].
//!
//! 3. **Reject, don't half-apply**: every mutator either applies fully or
//!    returns a [`TrackerError`] with state untouched.
//!
//! ## Example
//!
//! ```
//! use life_tracker::{GameState, PlayerId, Timestamp, TrackerConfig};
//!
//! let mut table = GameState::new(TrackerConfig::new().with_player_count(2).with_seed(1)).unwrap();
//! let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
//!
//! table.change_commander_damage(p0, p1, 5, Timestamp(0)).unwrap();
//! assert_eq!(table.player(p0).unwrap().life, 15);
//! assert_eq!(table.player(p0).unwrap().delta, -5);
//!
//! table.advance(Timestamp(3_000));
//! assert_eq!(table.player(p0).unwrap().delta, 0);
//! ```
//!
//! ## Modules
//!
//! - `core`: ids, RNG, clock, configuration, errors, `GameState`
//! - `roster`: players, palette, life and delta debounce
//! - `ledgers`: commander damage and counters
//! - `turn_order`: shuffle-and-reveal sequencer
//! - `persist`: versioned snapshots and storage

pub mod core;
pub mod ledgers;
pub mod persist;
pub mod roster;
pub mod turn_order;

// Re-export commonly used types
pub use crate::core::{
    AdvanceReport, DeadlineQueue, GameRng, GameState, PlayerId, PlayerMap, Result,
    StartingLife, StartingLifeKind, Timestamp, TrackerConfig, TrackerError, TurnOrderConfig,
};

pub use crate::ledgers::{
    CommanderDamageLedger, CounterKind, CounterLedger, CounterRow, LETHAL_COMMANDER_DAMAGE,
};

pub use crate::roster::{Artwork, Color, Player, PlayerRoster};

pub use crate::turn_order::{SpinPhase, TurnOrderEvent, TurnOrderSequencer};

pub use crate::persist::{KeyValueStore, MemoryStore, Snapshot};
