//! Commander damage: defender → source → damage taken.
//!
//! Damage never drops below zero. [`CommanderDamageLedger::change`] reports
//! the delta that was actually applied after clamping, and that applied
//! delta is what the caller mirrors onto the defender's life total.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Damage from a single commander that knocks a player out.
pub const LETHAL_COMMANDER_DAMAGE: u32 = 21;

/// Per-defender, per-source damage matrix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderDamageLedger {
    rows: FxHashMap<PlayerId, FxHashMap<PlayerId, u32>>,
}

impl CommanderDamageLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` (may be negative) to the damage `source` has dealt
    /// `defender`, clamping at zero.
    ///
    /// Returns the applied change, `new - old`. Decrementing an entry that
    /// is already 0 applies nothing and returns 0.
    pub fn change(&mut self, defender: PlayerId, source: PlayerId, amount: i64) -> i64 {
        let entry = self.rows.entry(defender).or_default().entry(source).or_insert(0);
        let old = i64::from(*entry);
        let new = old.saturating_add(amount).clamp(0, i64::from(u32::MAX));
        *entry = new as u32;

        new - old
    }

    /// Damage `source` has dealt `defender`.
    #[must_use]
    pub fn get(&self, defender: PlayerId, source: PlayerId) -> u32 {
        self.rows
            .get(&defender)
            .and_then(|row| row.get(&source))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of commander damage `defender` has taken.
    #[must_use]
    pub fn total_for(&self, defender: PlayerId) -> u64 {
        self.rows
            .get(&defender)
            .map(|row| row.values().map(|&d| u64::from(d)).sum())
            .unwrap_or(0)
    }

    /// Every recorded `(source, damage)` for `defender`, ordered by source.
    #[must_use]
    pub fn sources(&self, defender: PlayerId) -> Vec<(PlayerId, u32)> {
        let mut sources: Vec<_> = self
            .rows
            .get(&defender)
            .map(|row| row.iter().map(|(&s, &d)| (s, d)).collect())
            .unwrap_or_default();
        sources.sort_unstable_by_key(|&(source, _)| source);
        sources
    }

    /// Sources whose damage to `defender` has reached
    /// [`LETHAL_COMMANDER_DAMAGE`].
    #[must_use]
    pub fn lethal_sources(&self, defender: PlayerId) -> Vec<PlayerId> {
        self.sources(defender)
            .into_iter()
            .filter(|&(_, damage)| damage >= LETHAL_COMMANDER_DAMAGE)
            .map(|(source, _)| source)
            .collect()
    }

    /// Delete `defender`'s whole row.
    pub fn reset_defender(&mut self, defender: PlayerId) {
        self.rows.remove(&defender);
    }

    /// Empty the ledger.
    pub fn reset_all(&mut self) {
        self.rows.clear();
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
