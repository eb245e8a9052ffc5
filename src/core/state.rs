//! Table state: every ledger for one running table.
//!
//! ## GameState
//!
//! Owns the configuration, RNG streams, [`PlayerRoster`],
//! [`CommanderDamageLedger`], [`CounterLedger`] and
//! [`TurnOrderSequencer`]. Cross-ledger operations (commander damage moving
//! life) are sequenced here so no ledger holds a reference to another.
//!
//! Every mutator validates its player ids first. A mutator that returns
//! `Err` has changed nothing.
//!
//! ## Time
//!
//! Mutators that arm timers take the host's `now`. The host calls
//! [`GameState::advance`] once [`GameState::next_deadline`] is reached.

use super::clock::Timestamp;
use super::config::{StartingLifeKind, TrackerConfig};
use super::error::{Result, TrackerError};
use super::player::PlayerId;
use super::rng::GameRng;
use crate::ledgers::{CommanderDamageLedger, CounterKind, CounterLedger, CounterRow};
use crate::persist::Snapshot;
use crate::roster::{Artwork, Player, PlayerRoster};
use crate::turn_order::{TurnOrderEvent, TurnOrderSequencer};

/// What fired during one [`GameState::advance`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Players whose delta was cleared, in deadline order.
    pub cleared_deltas: Vec<PlayerId>,
    /// Turn-order transition, if any.
    pub turn_order: Option<TurnOrderEvent>,
}

impl AdvanceReport {
    /// Whether nothing fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cleared_deltas.is_empty() && self.turn_order.is_none()
    }
}

/// Complete state of one table.
#[derive(Clone, Debug)]
pub struct GameState {
    config: TrackerConfig,
    palette_rng: GameRng,
    turn_rng: GameRng,
    roster: PlayerRoster,
    commander: CommanderDamageLedger,
    counters: CounterLedger,
    turn_order: TurnOrderSequencer,
}

impl GameState {
    /// Seat a new table from `config`.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut palette_rng = rng.for_context("palette");
        let turn_rng = rng.for_context("turn-order");

        let roster = PlayerRoster::create(
            config.player_count,
            config.starting_life,
            config.delta_clear_delay(),
            &mut palette_rng,
        )?;

        let mut counters = CounterLedger::new();
        counters.reset_all(roster.player_ids(), &config.default_counters);

        tracing::debug!(player_count = config.player_count, seed = rng.seed(), "table created");

        Ok(Self {
            turn_order: TurnOrderSequencer::new(config.turn_order),
            config,
            palette_rng,
            turn_rng,
            roster,
            commander: CommanderDamageLedger::new(),
            counters,
        })
    }

    /// Rebuild a table from a stored snapshot.
    pub fn from_snapshot(config: TrackerConfig, snapshot: Snapshot) -> Result<Self> {
        let mut state = Self::new(config)?;
        state.restore(snapshot)?;
        Ok(state)
    }

    // === Accessors ===

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Seated players.
    #[must_use]
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    /// Commander damage matrix.
    #[must_use]
    pub fn commander_damage(&self) -> &CommanderDamageLedger {
        &self.commander
    }

    /// Counter ledger.
    #[must_use]
    pub fn counters(&self) -> &CounterLedger {
        &self.counters
    }

    /// Turn-order sequencer.
    #[must_use]
    pub fn turn_order(&self) -> &TurnOrderSequencer {
        &self.turn_order
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.player_count()
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.roster.player(player)
    }

    fn seat(&self, player: PlayerId) -> Result<()> {
        if self.roster.contains(player) {
            Ok(())
        } else {
            tracing::warn!(%player, "rejected unknown player");
            Err(TrackerError::UnknownPlayer(player))
        }
    }

    // === Roster ===

    /// Reseat the table with `count` fresh players.
    ///
    /// Commander damage is cleared, counters are reseeded for the new seats
    /// and any turn-order reveal is dismissed, since old ids no longer name
    /// the same players.
    pub fn set_player_count(&mut self, count: usize) -> Result<()> {
        self.roster.resize(count, &mut self.palette_rng)?;
        self.config.player_count = count;

        self.commander.reset_all();
        self.counters
            .reset_all(self.roster.player_ids(), &self.config.default_counters);
        self.turn_order.reset();
        Ok(())
    }

    /// Add `amount` to `player`'s life. Returns the new life total.
    pub fn change_life(&mut self, player: PlayerId, amount: i64, now: Timestamp) -> Result<i64> {
        self.seat(player)?;
        self.roster.change_life(player, amount, now)
    }

    /// Store a starting-life preference, resetting life if it governs the
    /// current table size. Returns whether life was reset.
    pub fn set_starting_life(&mut self, kind: StartingLifeKind, value: i64) -> bool {
        self.config.starting_life.set(kind, value);
        self.roster.set_starting_life(kind, value)
    }

    /// Put every player back at starting life.
    pub fn reset_life(&mut self) {
        self.roster.reset_life();
    }

    /// Flip `player`'s dead flag.
    pub fn toggle_dead(&mut self, player: PlayerId) -> Result<bool> {
        self.seat(player)?;
        self.roster.toggle_dead(player)
    }

    /// Attach card art to `player`'s panel.
    pub fn set_artwork(&mut self, player: PlayerId, artwork: Artwork) -> Result<()> {
        self.seat(player)?;
        self.roster.set_artwork(player, artwork)
    }

    /// Remove card art from `player`'s panel.
    pub fn clear_artwork(&mut self, player: PlayerId) -> Result<Option<Artwork>> {
        self.seat(player)?;
        self.roster.clear_artwork(player)
    }

    // === Commander damage ===

    /// Record `amount` commander damage from `source` to `defender` and move
    /// the defender's life by the negated applied change.
    ///
    /// Damage clamps at zero, so removing more damage than was recorded only
    /// gives back what was recorded. Returns the applied damage change.
    pub fn change_commander_damage(
        &mut self,
        defender: PlayerId,
        source: PlayerId,
        amount: i64,
        now: Timestamp,
    ) -> Result<i64> {
        self.seat(defender)?;
        self.seat(source)?;

        let applied = self.commander.change(defender, source, amount);
        if applied != 0 {
            self.roster.change_life(defender, -applied, now)?;
        }

        tracing::debug!(
            %defender,
            %source,
            requested = amount,
            applied,
            damage = self.commander.get(defender, source),
            "commander damage changed"
        );
        Ok(applied)
    }

    /// Clear the commander damage `defender` has taken. Life is untouched.
    pub fn reset_commander_damage(&mut self, defender: PlayerId) -> Result<()> {
        self.seat(defender)?;
        self.commander.reset_defender(defender);
        Ok(())
    }

    /// Clear all commander damage. Life is untouched.
    pub fn reset_all_commander_damage(&mut self) {
        self.commander.reset_all();
    }

    // === Counters ===

    /// Add `amount` to one of `player`'s counters. Returns the new value.
    pub fn change_counter(&mut self, player: PlayerId, kind: CounterKind, amount: i32) -> Result<u8> {
        self.seat(player)?;
        let value = self.counters.change_counter(player, kind, amount).map_err(|err| {
            tracing::warn!(%player, amount, "rejected counter change");
            err
        })?;
        tracing::debug!(%player, amount, value, "counter changed");
        Ok(value)
    }

    /// Start tracking `kind` for `player`.
    pub fn add_counter(&mut self, player: PlayerId, kind: CounterKind) -> Result<bool> {
        self.seat(player)?;
        Ok(self.counters.add_counter(player, kind))
    }

    /// Stop tracking `kind` for `player`.
    pub fn remove_counter(&mut self, player: PlayerId, kind: &CounterKind) -> Result<bool> {
        self.seat(player)?;
        Ok(self.counters.remove_counter(player, kind))
    }

    /// `player`'s active counters.
    #[must_use]
    pub fn counters_for(&self, player: PlayerId) -> &CounterRow {
        self.counters.get(player)
    }

    /// Delete all of `player`'s counters.
    pub fn reset_counters(&mut self, player: PlayerId) -> Result<()> {
        self.seat(player)?;
        self.counters.reset_player(player);
        Ok(())
    }

    /// Delete every counter and reseed the default kinds for each seat.
    pub fn reset_all_counters(&mut self) {
        self.counters
            .reset_all(self.roster.player_ids(), &self.config.default_counters);
    }

    // === Whole table ===

    /// Start a new game with the same seats: life, commander damage,
    /// counters and turn order all return to their initial state.
    pub fn new_game(&mut self) {
        self.roster.reset_life();
        self.commander.reset_all();
        self.reset_all_counters();
        self.turn_order.reset();
        tracing::debug!(player_count = self.player_count(), "new game");
    }

    // === Turn order ===

    /// Shuffle the seats and start the reveal. Returns the winner.
    pub fn start_turn_order(&mut self, now: Timestamp) -> Result<PlayerId> {
        let players: Vec<PlayerId> = self.roster.player_ids().collect();
        self.turn_order.start(&players, &mut self.turn_rng, now)
    }

    /// Dismiss the reveal, cancelling any pending tick.
    pub fn dismiss_turn_order(&mut self) {
        self.turn_order.reset();
    }

    // === Time ===

    /// Fire every deadline due by `now`.
    pub fn advance(&mut self, now: Timestamp) -> AdvanceReport {
        AdvanceReport {
            cleared_deltas: self.roster.advance(now),
            turn_order: self.turn_order.advance(now),
        }
    }

    /// Earliest pending deadline across the table.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        [self.roster.next_deadline(), self.turn_order.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    // === Persistence ===

    /// Plain-data view of the roster for storage.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_count: self.player_count(),
            starting_life: self.roster.starting_life(),
            players: self.roster.players().to_vec(),
        }
    }

    /// Replace the roster with `snapshot`. Deltas start at 0, commander
    /// damage is cleared and counters are reseeded.
    ///
    /// The snapshot is validated before anything changes.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;

        let players = snapshot
            .players
            .into_iter()
            .map(|player| Player { delta: 0, ..player })
            .collect();
        self.roster = PlayerRoster::from_players(
            players,
            snapshot.starting_life,
            self.config.delta_clear_delay(),
        )?;
        self.config.player_count = snapshot.player_count;
        self.config.starting_life = snapshot.starting_life;

        self.commander.reset_all();
        self.reset_all_counters();
        self.turn_order.reset();

        tracing::debug!(player_count = self.player_count(), "table restored");
        Ok(())
    }
}
