//! Table configuration.
//!
//! Hosts configure a table at startup with a [`TrackerConfig`], either
//! through the builder methods or by parsing TOML:
//!
//! ```
//! use life_tracker::core::TrackerConfig;
//!
//! let config = TrackerConfig::from_toml_str(
//!     r#"
//!     player_count = 2
//!
//!     [starting_life]
//!     two_player = 25
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.player_count, 2);
//! assert_eq!(config.starting_life.two_player, 25);
//! assert_eq!(config.starting_life.multiplayer, 40);
//! ```
//!
//! Every field is optional in TOML and falls back to its default.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{Result, TrackerError};
use super::player::is_valid_player_count;
use crate::ledgers::CounterKind;

/// Upper bound on `turn_order.loops`.
pub const MAX_TURN_ORDER_LOOPS: usize = 10;

/// Which starting-life preference a value applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartingLifeKind {
    /// Applies to tables of exactly two players.
    TwoPlayer,
    /// Applies to tables of three or more players.
    Multiplayer,
}

impl StartingLifeKind {
    /// The kind that governs a table of `player_count` players.
    #[must_use]
    pub const fn for_count(player_count: usize) -> Self {
        if player_count == 2 {
            Self::TwoPlayer
        } else {
            Self::Multiplayer
        }
    }
}

/// Starting life totals, separately configurable for two-player and
/// larger tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingLife {
    /// Life for two-player tables.
    pub two_player: i64,
    /// Life for tables of three or more.
    pub multiplayer: i64,
}

impl Default for StartingLife {
    fn default() -> Self {
        Self {
            two_player: 20,
            multiplayer: 40,
        }
    }
}

impl StartingLife {
    /// Starting life for a table of `player_count` players.
    #[must_use]
    pub const fn for_count(&self, player_count: usize) -> i64 {
        self.get(StartingLifeKind::for_count(player_count))
    }

    /// Value stored for `kind`.
    #[must_use]
    pub const fn get(&self, kind: StartingLifeKind) -> i64 {
        match kind {
            StartingLifeKind::TwoPlayer => self.two_player,
            StartingLifeKind::Multiplayer => self.multiplayer,
        }
    }

    /// Store `value` for `kind`.
    pub fn set(&mut self, kind: StartingLifeKind, value: i64) {
        match kind {
            StartingLifeKind::TwoPlayer => self.two_player = value,
            StartingLifeKind::Multiplayer => self.multiplayer = value,
        }
    }
}

/// Timing of the turn-order reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnOrderConfig {
    /// Interval between highlight ticks.
    pub tick_ms: u64,
    /// Full passes over the permutation before the winner is revealed.
    pub loops: usize,
    /// Auto-dismiss delay after the winner is revealed. `None` waits for
    /// an explicit dismissal.
    pub auto_reset_ms: Option<u64>,
}

impl Default for TurnOrderConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            loops: 3,
            auto_reset_ms: Some(2_000),
        }
    }
}

impl TurnOrderConfig {
    /// Interval between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Auto-dismiss delay, if any.
    #[must_use]
    pub fn auto_reset_after(&self) -> Option<Duration> {
        self.auto_reset_ms.map(Duration::from_millis)
    }

    /// Number of highlight ticks for `player_count` players:
    /// `loops` full passes plus the final tick. Saturates for
    /// configurations that never went through [`TrackerConfig::validate`].
    #[must_use]
    pub fn total_ticks(&self, player_count: usize) -> usize {
        player_count.saturating_mul(self.loops).saturating_add(1)
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of seats (2-6).
    pub player_count: usize,

    /// Starting life totals.
    pub starting_life: StartingLife,

    /// Debounce window after which a player's delta clears.
    pub delta_clear_ms: u64,

    /// Turn-order reveal timing.
    pub turn_order: TurnOrderConfig,

    /// Counter kinds reseeded at 0 for every player on a full counter reset.
    pub default_counters: Vec<CounterKind>,

    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_life: StartingLife::default(),
            delta_clear_ms: 3_000,
            turn_order: TurnOrderConfig::default(),
            default_counters: vec![CounterKind::tax(), CounterKind::charge()],
            seed: None,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the starting life for one kind of table.
    #[must_use]
    pub fn with_starting_life(mut self, kind: StartingLifeKind, value: i64) -> Self {
        self.starting_life.set(kind, value);
        self
    }

    /// Set the delta debounce window.
    #[must_use]
    pub fn with_delta_clear(mut self, delay: Duration) -> Self {
        self.delta_clear_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the turn-order timing.
    #[must_use]
    pub fn with_turn_order(mut self, turn_order: TurnOrderConfig) -> Self {
        self.turn_order = turn_order;
        self
    }

    /// Set the counter kinds reseeded on a full reset.
    #[must_use]
    pub fn with_default_counters(mut self, kinds: Vec<CounterKind>) -> Self {
        self.default_counters = kinds;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Delta debounce window.
    #[must_use]
    pub fn delta_clear_delay(&self) -> Duration {
        Duration::from_millis(self.delta_clear_ms)
    }

    /// Check the configuration can build a table.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_player_count(self.player_count) {
            return Err(TrackerError::InvalidPlayerCount(self.player_count));
        }
        if self.turn_order.tick_ms == 0 {
            return Err(TrackerError::InvalidConfig(
                "turn_order.tick_ms must be positive".into(),
            ));
        }
        if !(1..=MAX_TURN_ORDER_LOOPS).contains(&self.turn_order.loops) {
            return Err(TrackerError::InvalidConfig(format!(
                "turn_order.loops must be between 1 and {MAX_TURN_ORDER_LOOPS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();

        assert_eq!(config.player_count, 4);
        assert_eq!(config.starting_life.two_player, 20);
        assert_eq!(config.starting_life.multiplayer, 40);
        assert_eq!(config.delta_clear_delay(), Duration::from_secs(3));
        assert_eq!(config.turn_order.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.turn_order.loops, 3);
        assert_eq!(config.turn_order.auto_reset_after(), Some(Duration::from_secs(2)));
        assert_eq!(
            config.default_counters,
            vec![CounterKind::tax(), CounterKind::charge()]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_starting_life_for_count() {
        let life = StartingLife::default();

        assert_eq!(life.for_count(2), 20);
        assert_eq!(life.for_count(3), 40);
        assert_eq!(life.for_count(6), 40);
        assert_eq!(StartingLifeKind::for_count(2), StartingLifeKind::TwoPlayer);
        assert_eq!(StartingLifeKind::for_count(5), StartingLifeKind::Multiplayer);
    }

    #[test]
    fn test_builder() {
        let config = TrackerConfig::new()
            .with_player_count(2)
            .with_starting_life(StartingLifeKind::TwoPlayer, 30)
            .with_delta_clear(Duration::from_millis(1_500))
            .with_seed(9);

        assert_eq!(config.player_count, 2);
        assert_eq!(config.starting_life.two_player, 30);
        assert_eq!(config.delta_clear_ms, 1_500);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_total_ticks() {
        let turn_order = TurnOrderConfig::default();
        assert_eq!(turn_order.total_ticks(4), 13);
        assert_eq!(turn_order.total_ticks(2), 7);

        let unbounded = TurnOrderConfig {
            loops: usize::MAX,
            ..TurnOrderConfig::default()
        };
        assert_eq!(unbounded.total_ticks(6), usize::MAX);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            TrackerConfig::new().with_player_count(7).validate(),
            Err(TrackerError::InvalidPlayerCount(7))
        ));

        let zero_tick = TrackerConfig::new().with_turn_order(TurnOrderConfig {
            tick_ms: 0,
            ..TurnOrderConfig::default()
        });
        assert!(matches!(
            zero_tick.validate(),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = TrackerConfig::from_toml_str(
            r#"
            player_count = 5
            delta_clear_ms = 2000
            default_counters = ["poison"]

            [turn_order]
            loops = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.player_count, 5);
        assert_eq!(config.delta_clear_ms, 2_000);
        assert_eq!(config.turn_order.loops, 2);
        assert_eq!(config.turn_order.tick_ms, 100);
        assert_eq!(config.default_counters, vec![CounterKind::poison()]);
    }

    #[test]
    fn test_validate_bounds_loops() {
        let with_loops = |loops| {
            TrackerConfig::new().with_turn_order(TurnOrderConfig {
                loops,
                ..TurnOrderConfig::default()
            })
        };

        assert!(matches!(with_loops(0).validate(), Err(TrackerError::InvalidConfig(_))));
        assert!(with_loops(MAX_TURN_ORDER_LOOPS).validate().is_ok());
        assert!(matches!(
            with_loops(MAX_TURN_ORDER_LOOPS + 1).validate(),
            Err(TrackerError::InvalidConfig(_))
        ));
        assert!(matches!(
            TrackerConfig::from_toml_str("player_count = 4\n[turn_order]\nloops = 9223372036854775807"),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            TrackerConfig::from_toml_str("player_count = \"four\""),
            Err(TrackerError::ConfigParse(_))
        ));
        assert!(matches!(
            TrackerConfig::from_toml_str("player_count = 1"),
            Err(TrackerError::InvalidPlayerCount(1))
        ));
    }
}
