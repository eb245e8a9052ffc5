//! Turn-order sequencer tests.

use std::collections::HashSet;

use proptest::prelude::*;

use life_tracker::{
    GameRng, GameState, PlayerId, SpinPhase, Timestamp, TrackerConfig, TurnOrderConfig,
    TurnOrderEvent, TurnOrderSequencer,
};

/// Drive the sequencer tick by tick, recording every highlight.
fn run_to_finish(sequencer: &mut TurnOrderSequencer, start: u64) -> Vec<PlayerId> {
    let mut highlights = Vec::new();
    let mut now = start;

    while sequencer.is_spinning() {
        now += 100;
        sequencer.advance(Timestamp(now));
        highlights.extend(sequencer.highlighted());
    }

    highlights
}

/// Four players: bijective permutation, last element wins, 13 ticks.
#[test]
fn test_four_player_spin() {
    let mut state = GameState::new(TrackerConfig::new().with_player_count(4).with_seed(21)).unwrap();

    let winner = state.start_turn_order(Timestamp(0)).unwrap();
    let order = state.turn_order().order().to_vec();

    let unique: HashSet<_> = order.iter().copied().collect();
    assert_eq!(order.len(), 4);
    assert_eq!(unique, PlayerId::all(4).collect::<HashSet<_>>());
    assert_eq!(winner, order[3]);
    assert_eq!(state.turn_order().total_ticks(), 13);
    assert_eq!(state.turn_order().phase(), SpinPhase::Spinning);

    let report = state.advance(Timestamp(1_300));
    assert_eq!(report.turn_order, Some(TurnOrderEvent::Finished(winner)));
    assert_eq!(state.turn_order().ticks_elapsed(), 13);
    assert_eq!(state.turn_order().highlighted(), Some(winner));
    assert_eq!(state.turn_order().phase(), SpinPhase::Finished);
}

/// Each tick highlights `order[tick % len]` until the final one shows the winner.
#[test]
fn test_highlight_sequence() {
    let mut sequencer = TurnOrderSequencer::new(TurnOrderConfig::default());
    let players: Vec<_> = PlayerId::all(5).collect();
    let winner = sequencer.start(&players, &mut GameRng::new(4), Timestamp(0)).unwrap();
    let order = sequencer.order().to_vec();

    let highlights = run_to_finish(&mut sequencer, 0);

    assert_eq!(highlights.len(), 16);
    for (tick, highlighted) in highlights.iter().enumerate().take(15) {
        assert_eq!(*highlighted, order[tick % 5]);
    }
    assert_eq!(highlights[15], winner);
}

/// A late host call catches up on every missed tick at once.
#[test]
fn test_advance_catches_up() {
    let mut sequencer = TurnOrderSequencer::new(TurnOrderConfig {
        auto_reset_ms: None,
        ..TurnOrderConfig::default()
    });
    let players: Vec<_> = PlayerId::all(3).collect();
    let winner = sequencer.start(&players, &mut GameRng::new(4), Timestamp(500)).unwrap();

    let event = sequencer.advance(Timestamp(60_000));

    assert_eq!(event, Some(TurnOrderEvent::Finished(winner)));
    assert_eq!(sequencer.ticks_elapsed(), 10);
    assert_eq!(sequencer.phase(), SpinPhase::Finished);
}

/// Dismissing mid-spin cancels the schedule; no zombie tick lands later.
#[test]
fn test_dismiss_mid_spin() {
    let mut state = GameState::new(TrackerConfig::new().with_player_count(3).with_seed(2)).unwrap();
    state.start_turn_order(Timestamp(0)).unwrap();
    state.advance(Timestamp(250));
    assert!(state.turn_order().highlighted().is_some());

    state.dismiss_turn_order();

    let report = state.advance(Timestamp(5_000));
    assert!(report.turn_order.is_none());
    assert_eq!(state.turn_order().highlighted(), None);
    assert_eq!(state.turn_order().phase(), SpinPhase::Idle);
    assert_eq!(state.next_deadline(), None);
}

/// With auto-dismiss configured the reveal clears itself.
#[test]
fn test_auto_dismiss() {
    let mut state = GameState::new(TrackerConfig::new().with_player_count(2).with_seed(2)).unwrap();
    state.start_turn_order(Timestamp(1_000)).unwrap();

    let report = state.advance(Timestamp(1_700));
    assert!(matches!(report.turn_order, Some(TurnOrderEvent::Finished(_))));
    assert_eq!(state.next_deadline(), Some(Timestamp(3_700)));

    let report = state.advance(Timestamp(3_700));
    assert_eq!(report.turn_order, Some(TurnOrderEvent::Reset));
    assert_eq!(state.turn_order().phase(), SpinPhase::Idle);
}

/// Same seed, same turn order.
#[test]
fn test_seeded_turn_order_is_reproducible() {
    let config = TrackerConfig::new().with_player_count(6).with_seed(99);
    let mut a = GameState::new(config.clone()).unwrap();
    let mut b = GameState::new(config).unwrap();

    for round in 0..5 {
        let now = Timestamp(round * 10_000);
        assert_eq!(a.start_turn_order(now).unwrap(), b.start_turn_order(now).unwrap());
        assert_eq!(a.turn_order().order(), b.turn_order().order());
    }
}

proptest! {
    /// Every spin is a permutation of the seats and ends on its last element.
    #[test]
    fn prop_spin_is_permutation(count in 2usize..=6, seed in any::<u64>()) {
        let mut sequencer = TurnOrderSequencer::new(TurnOrderConfig::default());
        let players: Vec<_> = PlayerId::all(count).collect();
        let winner = sequencer.start(&players, &mut GameRng::new(seed), Timestamp(0)).unwrap();

        let mut sorted = sequencer.order().to_vec();
        sorted.sort();
        prop_assert_eq!(&sorted, &players);
        prop_assert_eq!(sequencer.order().last(), Some(&winner));

        let highlights = run_to_finish(&mut sequencer, 0);
        prop_assert_eq!(highlights.len(), count * 3 + 1);
        prop_assert_eq!(sequencer.winner(), Some(winner));
    }
}
