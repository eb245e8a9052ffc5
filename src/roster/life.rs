//! Life totals and the delta debounce.

use std::time::Duration;

use super::palette::assign_colors;
use super::player::{Artwork, Player};
use crate::core::{
    is_valid_player_count, DeadlineQueue, GameRng, PlayerId, PlayerMap, Result, StartingLife,
    StartingLifeKind, Timestamp, TrackerError,
};

/// The seated players and their life totals.
///
/// Every life change re-arms that player's delta clear, so `delta` always
/// shows the net change since the player's last quiet period of
/// `delta_clear_delay`.
#[derive(Clone, Debug)]
pub struct PlayerRoster {
    players: PlayerMap<Player>,
    starting_life: StartingLife,
    delta_clear_delay: Duration,
    delta_clears: DeadlineQueue<PlayerId>,
}

impl PlayerRoster {
    /// Seat `count` fresh players.
    ///
    /// Fails with [`TrackerError::InvalidPlayerCount`] outside 2..=6.
    pub fn create(
        count: usize,
        starting_life: StartingLife,
        delta_clear_delay: Duration,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let players = build_players(count, &starting_life, rng)?;

        Ok(Self {
            players,
            starting_life,
            delta_clear_delay,
            delta_clears: DeadlineQueue::new(),
        })
    }

    /// Rebuild a roster from stored players. Deltas start at 0.
    pub(crate) fn from_players(
        players: Vec<Player>,
        starting_life: StartingLife,
        delta_clear_delay: Duration,
    ) -> Result<Self> {
        if !is_valid_player_count(players.len()) {
            return Err(TrackerError::InvalidPlayerCount(players.len()));
        }

        Ok(Self {
            players: PlayerMap::from_vec(players),
            starting_life,
            delta_clear_delay,
            delta_clears: DeadlineQueue::new(),
        })
    }

    /// Replace every player with `count` fresh ones. Nothing carries over.
    ///
    /// On an invalid count the roster is left as it was.
    pub fn resize(&mut self, count: usize, rng: &mut GameRng) -> Result<()> {
        self.players = build_players(count, &self.starting_life, rng)?;
        self.delta_clears.clear();
        tracing::debug!(count, "roster regenerated");
        Ok(())
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Whether `player` is seated.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.try_get(player)
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.players.as_slice()
    }

    /// Seat ids in order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    /// Stored starting-life preferences.
    #[must_use]
    pub fn starting_life(&self) -> StartingLife {
        self.starting_life
    }

    /// Starting life for the current table size.
    #[must_use]
    pub fn current_starting_life(&self) -> i64 {
        self.starting_life.for_count(self.player_count())
    }

    /// Add `amount` to `player`'s life and delta, and restart the delta
    /// clear from `now`.
    ///
    /// Returns the new life total.
    pub fn change_life(&mut self, player: PlayerId, amount: i64, now: Timestamp) -> Result<i64> {
        let seat = self
            .players
            .try_get_mut(player)
            .ok_or(TrackerError::UnknownPlayer(player))?;

        seat.life = seat.life.saturating_add(amount);
        seat.delta = seat.delta.saturating_add(amount);
        let life = seat.life;
        let delta = seat.delta;

        let clear_at = now.after(self.delta_clear_delay);
        self.delta_clears.arm(player, clear_at);

        tracing::debug!(%player, amount, life, delta, %clear_at, "life changed");
        Ok(life)
    }

    /// Store a starting-life preference. If it governs the current table
    /// size, every player is reset to `value` with delta 0.
    ///
    /// Returns whether the current players were reset.
    pub fn set_starting_life(&mut self, kind: StartingLifeKind, value: i64) -> bool {
        self.starting_life.set(kind, value);

        if StartingLifeKind::for_count(self.player_count()) != kind {
            return false;
        }

        self.reset_life();
        true
    }

    /// Put every player back at the starting life for the current table
    /// size with delta 0. Ids, colours, dead flags and art are kept.
    pub fn reset_life(&mut self) {
        let life = self.current_starting_life();
        for seat in self.players.values_mut() {
            seat.life = life;
            seat.delta = 0;
        }
        self.delta_clears.clear();
        tracing::debug!(life, "life totals reset");
    }

    /// Flip `player`'s dead flag. Returns the new flag.
    pub fn toggle_dead(&mut self, player: PlayerId) -> Result<bool> {
        let seat = self
            .players
            .try_get_mut(player)
            .ok_or(TrackerError::UnknownPlayer(player))?;

        seat.is_dead = !seat.is_dead;
        tracing::debug!(%player, is_dead = seat.is_dead, "dead flag toggled");
        Ok(seat.is_dead)
    }

    /// Attach card art to `player`'s panel.
    pub fn set_artwork(&mut self, player: PlayerId, artwork: Artwork) -> Result<()> {
        let seat = self
            .players
            .try_get_mut(player)
            .ok_or(TrackerError::UnknownPlayer(player))?;
        seat.artwork = Some(artwork);
        Ok(())
    }

    /// Remove card art from `player`'s panel, returning it.
    pub fn clear_artwork(&mut self, player: PlayerId) -> Result<Option<Artwork>> {
        let seat = self
            .players
            .try_get_mut(player)
            .ok_or(TrackerError::UnknownPlayer(player))?;
        Ok(seat.artwork.take())
    }

    /// Clear the delta of every player whose debounce window has elapsed
    /// by `now`. Returns them in the order their windows closed.
    pub fn advance(&mut self, now: Timestamp) -> Vec<PlayerId> {
        let cleared = self.delta_clears.expire(now);
        for &player in &cleared {
            if let Some(seat) = self.players.try_get_mut(player) {
                seat.delta = 0;
                tracing::trace!(%player, %now, "delta cleared");
            }
        }
        cleared
    }

    /// When the next delta clear is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.delta_clears.next_deadline()
    }

    /// Pending delta clear for `player`.
    #[must_use]
    pub fn delta_clear_at(&self, player: PlayerId) -> Option<Timestamp> {
        self.delta_clears.deadline(player)
    }
}

fn build_players(
    count: usize,
    starting_life: &StartingLife,
    rng: &mut GameRng,
) -> Result<PlayerMap<Player>> {
    if !is_valid_player_count(count) {
        tracing::warn!(count, "rejected player count");
        return Err(TrackerError::InvalidPlayerCount(count));
    }

    let life = starting_life.for_count(count);
    let colors = assign_colors(count, rng);

    Ok(PlayerMap::new(count, |id| Player::new(id, life, colors[id.index()])))
}
