//! The seated players.
//!
//! - `player`: the per-seat record and its card art
//! - `palette`: background colours dealt to seats
//! - `life`: [`PlayerRoster`], life totals and the delta debounce

pub mod life;
pub mod palette;
pub mod player;

pub use life::PlayerRoster;
pub use palette::{assign_colors, Color, PALETTE};
pub use player::{Artwork, Player};
