//! Shuffle-and-reveal state machine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId, Result, Timestamp, TrackerError, TurnOrderConfig, MAX_PLAYERS};

/// A shuffled seating order.
pub type Permutation = SmallVec<[PlayerId; MAX_PLAYERS]>;

/// Where the sequencer is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinPhase {
    /// Nothing shown.
    Idle,
    /// Highlight is cycling through the permutation.
    Spinning,
    /// Winner revealed, waiting for dismissal.
    Finished,
}

/// Transition reported by [`TurnOrderSequencer::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOrderEvent {
    /// The final tick landed on the winner.
    Finished(PlayerId),
    /// The revealed winner was auto-dismissed.
    Reset,
}

/// Picks who goes first with a timed highlight animation.
///
/// ## Lifecycle
///
/// `start` shuffles the seats and enters `Spinning`. Every `tick_interval`
/// after the start the highlight moves to `order[tick % len]`, for
/// `len * loops + 1` ticks. The last seat of the permutation is the
/// winner; after the final tick it is fixed as the highlight and the phase
/// becomes `Finished`. `reset` returns to `Idle` and cancels any pending
/// tick or auto-dismiss.
///
/// The `set`/`start_spin`/`finish_spin`/`reset` primitives are public for
/// hosts that drive the animation themselves.
#[derive(Clone, Debug)]
pub struct TurnOrderSequencer {
    config: TurnOrderConfig,
    highlighted: Option<PlayerId>,
    spinning: bool,
    finished: bool,
    winner: Option<PlayerId>,
    order: Permutation,
    ticks_elapsed: usize,
    next_tick_at: Option<Timestamp>,
    reset_at: Option<Timestamp>,
}

impl TurnOrderSequencer {
    /// Create an idle sequencer.
    #[must_use]
    pub fn new(config: TurnOrderConfig) -> Self {
        Self {
            config,
            highlighted: None,
            spinning: false,
            finished: false,
            winner: None,
            order: Permutation::new(),
            ticks_elapsed: 0,
            next_tick_at: None,
            reset_at: None,
        }
    }

    /// Shuffle `players` and begin spinning at `now`.
    ///
    /// Returns the winner, the last seat of the permutation. Fails with
    /// [`TrackerError::EmptyRoster`] when `players` is empty. Starting
    /// while a spin is already running restarts it.
    pub fn start(&mut self, players: &[PlayerId], rng: &mut GameRng, now: Timestamp) -> Result<PlayerId> {
        let mut order: Permutation = players.iter().copied().collect();
        rng.shuffle(&mut order[..]);
        let winner = *order.last().ok_or(TrackerError::EmptyRoster)?;

        self.reset();
        self.order = order;
        self.winner = Some(winner);
        self.next_tick_at = Some(now.after(self.config.tick_interval()));
        self.start_spin();

        tracing::debug!(order = ?self.order, %winner, "turn order spin started");
        Ok(winner)
    }

    /// Run every tick and auto-dismiss due by `now`.
    pub fn advance(&mut self, now: Timestamp) -> Option<TurnOrderEvent> {
        let mut event = None;

        while let Some(at) = self.next_tick_at.filter(|at| *at <= now) {
            if let Some(winner) = self.tick(at) {
                event = Some(TurnOrderEvent::Finished(winner));
            }
        }

        if self.reset_at.is_some_and(|at| at <= now) {
            self.reset();
            event = Some(TurnOrderEvent::Reset);
        }

        event
    }

    fn tick(&mut self, at: Timestamp) -> Option<PlayerId> {
        let len = self.order.len();
        let total = self.total_ticks();
        if len == 0 {
            self.next_tick_at = None;
            return None;
        }

        self.set(self.order[self.ticks_elapsed % len]);
        self.ticks_elapsed += 1;
        tracing::trace!(tick = self.ticks_elapsed, highlighted = ?self.highlighted, "turn order tick");

        if self.ticks_elapsed < total {
            self.next_tick_at = Some(at.after(self.config.tick_interval()));
            return None;
        }

        self.next_tick_at = None;
        let winner = self.winner?;
        self.finish_spin(winner);
        self.reset_at = self.config.auto_reset_after().map(|delay| at.after(delay));
        Some(winner)
    }

    /// Highlight `player`.
    pub fn set(&mut self, player: PlayerId) {
        self.highlighted = Some(player);
    }

    /// Enter the spinning phase.
    pub fn start_spin(&mut self) {
        self.spinning = true;
        self.finished = false;
    }

    /// Fix `winner` as the highlight and enter the finished phase.
    pub fn finish_spin(&mut self, winner: PlayerId) {
        self.highlighted = Some(winner);
        self.winner = Some(winner);
        self.spinning = false;
        self.finished = true;
        tracing::debug!(%winner, "turn order decided");
    }

    /// Return to idle, cancelling any pending tick or auto-dismiss.
    pub fn reset(&mut self) {
        self.highlighted = None;
        self.spinning = false;
        self.finished = false;
        self.winner = None;
        self.order.clear();
        self.ticks_elapsed = 0;
        self.next_tick_at = None;
        self.reset_at = None;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SpinPhase {
        if self.finished {
            SpinPhase::Finished
        } else if self.spinning {
            SpinPhase::Spinning
        } else {
            SpinPhase::Idle
        }
    }

    /// Currently highlighted seat.
    #[must_use]
    pub fn highlighted(&self) -> Option<PlayerId> {
        self.highlighted
    }

    /// Whether the highlight is cycling.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Whether a winner is on display.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Winner of the current spin, known from `start` onwards.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Permutation of the current spin.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Ticks run so far in the current spin.
    #[must_use]
    pub fn ticks_elapsed(&self) -> usize {
        self.ticks_elapsed
    }

    /// Ticks the current spin runs in total.
    #[must_use]
    pub fn total_ticks(&self) -> usize {
        if self.order.is_empty() {
            0
        } else {
            self.config.total_ticks(self.order.len())
        }
    }

    /// Next tick or auto-dismiss.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.next_tick_at.or(self.reset_at)
    }
}
