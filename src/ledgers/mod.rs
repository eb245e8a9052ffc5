//! Per-player ledgers: commander damage and named counters.
//!
//! Both ledgers create entries lazily and read absent entries as 0. Neither
//! validates player ids against the roster; [`GameState`](crate::GameState)
//! checks seats before delegating.

pub mod commander;
pub mod counters;

pub use commander::{CommanderDamageLedger, LETHAL_COMMANDER_DAMAGE};
pub use counters::{CounterKind, CounterLedger, CounterRow, MAX_COUNTER_STEP, MAX_COUNTER_VALUE};
