//! Versioned roster snapshots.
//!
//! ## Encoding
//!
//! A stored blob is a bincode [`Envelope`]: the schema version plus the
//! bincode payload for that version. Older payloads are migrated to the
//! current [`Snapshot`] on decode; newer ones are refused.
//!
//! | version | payload |
//! |---|---|
//! | 1 | players without dead flag or artwork, flat starting-life fields |
//! | 2 | [`Snapshot`] |

use serde::{Deserialize, Serialize};

use crate::core::{is_valid_player_count, PlayerId, Result, StartingLife, TrackerError};
use crate::roster::{Color, Player};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Roster state worth keeping across restarts. Holds no timers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of seats.
    pub player_count: usize,
    /// Starting-life preferences.
    pub starting_life: StartingLife,
    /// Players in seat order.
    pub players: Vec<Player>,
}

impl Snapshot {
    /// Check the snapshot describes a seatable roster with ids 0..N-1.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_player_count(self.player_count) {
            return Err(TrackerError::InvalidPlayerCount(self.player_count));
        }
        if self.players.len() != self.player_count {
            return Err(TrackerError::CorruptSnapshot(format!(
                "{} players stored for a table of {}",
                self.players.len(),
                self.player_count
            )));
        }
        for (seat, player) in self.players.iter().enumerate() {
            if player.id.index() != seat {
                return Err(TrackerError::CorruptSnapshot(format!(
                    "seat {seat} holds {}",
                    player.id
                )));
            }
        }
        Ok(())
    }

    /// Encode as a versioned blob.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let envelope = Envelope {
            version: SNAPSHOT_VERSION,
            payload: bincode::serialize(self)?,
        };
        Ok(bincode::serialize(&envelope)?)
    }

    /// Decode a versioned blob, migrating older schemas.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let envelope: Envelope = bincode::deserialize(bytes)?;
        migrate(envelope.version, &envelope.payload)
    }
}

/// Stored wrapper around a snapshot payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Schema version of `payload`.
    pub version: u32,
    /// bincode-encoded snapshot for `version`.
    pub payload: Vec<u8>,
}

/// Decode `payload` written with schema `version` into the current
/// [`Snapshot`].
pub fn migrate(version: u32, payload: &[u8]) -> Result<Snapshot> {
    match version {
        SNAPSHOT_VERSION => Ok(bincode::deserialize(payload)?),
        1 => {
            let legacy: SnapshotV1 = bincode::deserialize(payload)?;
            tracing::warn!(from = 1, to = SNAPSHOT_VERSION, "migrating stored roster");
            Ok(legacy.into())
        }
        found if found > SNAPSHOT_VERSION => Err(TrackerError::UnsupportedSnapshotVersion {
            found,
            supported: SNAPSHOT_VERSION,
        }),
        found => Err(TrackerError::CorruptSnapshot(format!(
            "unknown snapshot version {found}"
        ))),
    }
}

/// Version 1 schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotV1 {
    pub total_players: usize,
    pub starting_life_two_players: i64,
    pub starting_life_multi_players: i64,
    pub players: Vec<PlayerV1>,
}

/// Version 1 player record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerV1 {
    pub id: PlayerId,
    pub life: i64,
    pub delta: i64,
    pub color: Color,
}

impl From<SnapshotV1> for Snapshot {
    fn from(legacy: SnapshotV1) -> Self {
        Self {
            player_count: legacy.total_players,
            starting_life: StartingLife {
                two_player: legacy.starting_life_two_players,
                multiplayer: legacy.starting_life_multi_players,
            },
            players: legacy
                .players
                .into_iter()
                .map(|p| Player {
                    delta: p.delta,
                    ..Player::new(p.id, p.life, p.color)
                })
                .collect(),
        }
    }
}
