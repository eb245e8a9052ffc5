//! Roster persistence.
//!
//! The crate produces and consumes plain snapshots; the actual storage is a
//! [`KeyValueStore`] supplied by the host.

pub mod snapshot;
pub mod store;

pub use snapshot::{migrate, Envelope, Snapshot, SNAPSHOT_VERSION};
pub use store::{load_snapshot, save_state, KeyValueStore, MemoryStore, STORAGE_KEY};
