//! Snapshot save/restore through a key-value store.

use life_tracker::persist::{load_snapshot, save_state, STORAGE_KEY};
use life_tracker::{
    Artwork, CounterKind, GameState, KeyValueStore, MemoryStore, PlayerId, Snapshot,
    StartingLifeKind, Timestamp, TrackerConfig, TrackerError,
};

fn table(count: usize, seed: u64) -> GameState {
    GameState::new(TrackerConfig::new().with_player_count(count).with_seed(seed)).unwrap()
}

#[test]
fn test_save_and_restore_roster() {
    let mut state = table(3, 5);
    state.set_starting_life(StartingLifeKind::TwoPlayer, 25);
    state.change_life(PlayerId::new(1), -13, Timestamp(0)).unwrap();
    state.toggle_dead(PlayerId::new(2)).unwrap();
    state
        .set_artwork(PlayerId::new(0), Artwork::new("https://img.example/a.jpg", "Terese Nielsen"))
        .unwrap();

    let mut store = MemoryStore::new();
    save_state(&mut store, &state).unwrap();
    assert!(store.load(STORAGE_KEY).unwrap().is_some());

    let snapshot = load_snapshot(&store).unwrap().unwrap();
    let restored = GameState::from_snapshot(TrackerConfig::new().with_seed(1), snapshot).unwrap();

    assert_eq!(restored.player_count(), 3);
    assert_eq!(restored.config().starting_life.two_player, 25);
    assert_eq!(restored.player(PlayerId::new(1)).unwrap().life, 27);
    assert_eq!(restored.player(PlayerId::new(1)).unwrap().delta, 0);
    assert!(restored.player(PlayerId::new(2)).unwrap().is_dead);
    assert_eq!(
        restored.player(PlayerId::new(0)).unwrap().artwork.as_ref().map(|a| a.artist.as_str()),
        Some("Terese Nielsen")
    );
    for (original, restored) in state.roster().players().iter().zip(restored.roster().players()) {
        assert_eq!(original.color, restored.color);
    }
    // No timers survive a restore.
    assert_eq!(restored.next_deadline(), None);
}

#[test]
fn test_restore_reseeds_ledgers() {
    let mut state = table(2, 5);
    let snapshot = state.snapshot();
    state.change_commander_damage(PlayerId::new(0), PlayerId::new(1), 4, Timestamp(0)).unwrap();
    state.change_counter(PlayerId::new(1), CounterKind::poison(), 2).unwrap();

    state.restore(snapshot).unwrap();

    assert!(state.commander_damage().is_empty());
    assert_eq!(state.counters_for(PlayerId::new(1)).len(), 2);
    assert_eq!(state.player(PlayerId::new(0)).unwrap().life, 20);
}

#[test]
fn test_invalid_snapshot_leaves_state() {
    let mut state = table(4, 5);
    state.change_life(PlayerId::new(0), -1, Timestamp(0)).unwrap();

    let mut snapshot = state.snapshot();
    snapshot.players.pop();

    assert!(matches!(state.restore(snapshot), Err(TrackerError::CorruptSnapshot(_))));
    assert_eq!(state.player_count(), 4);
    assert_eq!(state.player(PlayerId::new(0)).unwrap().life, 39);
}

#[test]
fn test_snapshot_resize_round_trip() {
    let mut state = table(2, 8);
    state.set_player_count(6).unwrap();

    let bytes = state.snapshot().encode().unwrap();
    let snapshot = Snapshot::decode(&bytes).unwrap();

    assert_eq!(snapshot.player_count, 6);
    assert_eq!(snapshot.players.len(), 6);
    assert!(snapshot.players.iter().all(|p| p.life == 40));
}

#[test]
fn test_corrupt_blob_is_reported() {
    let mut store = MemoryStore::new();
    store.save(STORAGE_KEY, vec![1, 2, 3]).unwrap();

    assert!(matches!(load_snapshot(&store), Err(TrackerError::Codec(_))));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let state = table(2, 3);
    let json = serde_json::to_string(&state.snapshot()).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, state.snapshot());
}
