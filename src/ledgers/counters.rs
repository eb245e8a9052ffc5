//! Named per-player counters.
//!
//! ## Counter kinds
//!
//! [`CounterKind`] is an open set: any string names a counter. The usual
//! ones (tax, charge, poison, storm, the mana colours) have constructors.
//!
//! ## Values
//!
//! Values are clamped to `0..=MAX_COUNTER_VALUE`. A single change larger
//! than [`MAX_COUNTER_STEP`] is rejected without touching the row.
//!
//! ## Rows
//!
//! A row is an `im::OrdMap`, so handing one to a renderer is an O(1) clone
//! and kinds iterate in a stable order. Players without a row all read the
//! same empty row owned by the ledger.

use im::OrdMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Result, TrackerError};

/// Highest value a counter can hold.
pub const MAX_COUNTER_VALUE: u8 = 100;

/// Largest change accepted in one call.
pub const MAX_COUNTER_STEP: i32 = 100;

/// Name of a per-player counter.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterKind(String);

impl CounterKind {
    /// Create a counter kind from any name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Commander tax.
    #[must_use]
    pub fn tax() -> Self {
        Self::new("tax")
    }

    /// Charge counters.
    #[must_use]
    pub fn charge() -> Self {
        Self::new("charge")
    }

    /// Poison counters.
    #[must_use]
    pub fn poison() -> Self {
        Self::new("poison")
    }

    /// Storm count.
    #[must_use]
    pub fn storm() -> Self {
        Self::new("storm")
    }

    /// Experience counters.
    #[must_use]
    pub fn experience() -> Self {
        Self::new("experience")
    }

    /// Energy counters.
    #[must_use]
    pub fn energy() -> Self {
        Self::new("energy")
    }

    /// Mana pool counters: white, blue, black, red, green, colorless.
    #[must_use]
    pub fn mana() -> [Self; 6] {
        ["white", "blue", "black", "red", "green", "colorless"].map(Self::new)
    }

    /// The counter's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CounterKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One player's active counters.
pub type CounterRow = OrdMap<CounterKind, u8>;

/// Player → counter kind → value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterLedger {
    rows: FxHashMap<PlayerId, CounterRow>,
    empty: CounterRow,
}

impl CounterLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `player`'s `kind` counter, clamped to
    /// `0..=MAX_COUNTER_VALUE`. Creates the entry if absent.
    ///
    /// Returns the new value, or [`TrackerError::CounterDeltaTooLarge`] for
    /// `amount > MAX_COUNTER_STEP`, in which case nothing changes.
    pub fn change_counter(&mut self, player: PlayerId, kind: CounterKind, amount: i32) -> Result<u8> {
        if amount > MAX_COUNTER_STEP {
            return Err(TrackerError::CounterDeltaTooLarge(amount));
        }

        let row = self.rows.entry(player).or_default();
        let old = row.get(&kind).copied().unwrap_or(0);
        let new = i32::from(old)
            .saturating_add(amount)
            .clamp(0, i32::from(MAX_COUNTER_VALUE)) as u8;
        row.insert(kind, new);

        Ok(new)
    }

    /// Add one to `player`'s `kind` counter.
    pub fn increment(&mut self, player: PlayerId, kind: CounterKind) -> Result<u8> {
        self.change_counter(player, kind, 1)
    }

    /// Start tracking `kind` for `player` at 0. Returns `false` if it was
    /// already tracked, leaving its value alone.
    pub fn add_counter(&mut self, player: PlayerId, kind: CounterKind) -> bool {
        let row = self.rows.entry(player).or_default();
        if row.contains_key(&kind) {
            return false;
        }
        row.insert(kind, 0);
        true
    }

    /// Stop tracking `kind` for `player`. Returns `false` if it was not
    /// tracked.
    pub fn remove_counter(&mut self, player: PlayerId, kind: &CounterKind) -> bool {
        self.rows
            .get_mut(&player)
            .and_then(|row| row.remove(kind))
            .is_some()
    }

    /// `player`'s active counters. Players without a row all get the same
    /// shared empty row.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &CounterRow {
        self.rows.get(&player).unwrap_or(&self.empty)
    }

    /// Value of one counter, 0 when absent.
    #[must_use]
    pub fn value(&self, player: PlayerId, kind: &CounterKind) -> u8 {
        self.get(player).get(kind).copied().unwrap_or(0)
    }

    /// Delete `player`'s row.
    pub fn reset_player(&mut self, player: PlayerId) {
        self.rows.remove(&player);
    }

    /// Delete every row, then seed each of `players` with `defaults` at 0.
    pub fn reset_all(
        &mut self,
        players: impl IntoIterator<Item = PlayerId>,
        defaults: &[CounterKind],
    ) {
        self.rows.clear();
        for player in players {
            let row: CounterRow = defaults.iter().cloned().map(|kind| (kind, 0)).collect();
            self.rows.insert(player, row);
        }
    }
}
