//! A seated player.

use serde::{Deserialize, Serialize};

use super::palette::Color;
use crate::core::PlayerId;

/// Card art chosen for a player's panel. Stored as received from the card
/// lookup service and never interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artwork {
    /// Image URL.
    pub url: String,
    /// Credited artist.
    pub artist: String,
}

impl Artwork {
    /// Create an artwork record.
    pub fn new(url: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            artist: artist.into(),
        }
    }
}

/// One seat's life state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat id, fixed for the roster's lifetime.
    pub id: PlayerId,
    /// Life total; may go negative.
    pub life: i64,
    /// Net life change since the last auto-clear.
    pub delta: i64,
    /// Marked out of the game. Does not affect life.
    pub is_dead: bool,
    /// Panel background.
    pub color: Color,
    /// Panel art, if the player picked one.
    pub artwork: Option<Artwork>,
}

impl Player {
    /// A fresh player at `life`.
    #[must_use]
    pub fn new(id: PlayerId, life: i64, color: Color) -> Self {
        Self {
            id,
            life,
            delta: 0,
            is_dead: false,
            color,
            artwork: None,
        }
    }
}
