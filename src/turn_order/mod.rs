//! Random turn order with a timed reveal.

pub mod sequencer;

pub use sequencer::{Permutation, SpinPhase, TurnOrderEvent, TurnOrderSequencer};
