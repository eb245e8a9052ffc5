//! Seat background colours.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Build a colour from its components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

/// The fixed seat palette.
pub const PALETTE: [Color; 5] = [
    Color::rgb(0xE5, 0x73, 0x73),
    Color::rgb(0x64, 0xB5, 0xF6),
    Color::rgb(0x81, 0xC7, 0x84),
    Color::rgb(0xFF, 0xD5, 0x4F),
    Color::rgb(0xBA, 0x68, 0xC8),
];

/// One colour per seat from a shuffled copy of [`PALETTE`], wrapping when
/// there are more seats than colours.
pub fn assign_colors(player_count: usize, rng: &mut GameRng) -> Vec<Color> {
    let mut shuffled = PALETTE;
    rng.shuffle(&mut shuffled[..]);

    (0..player_count)
        .map(|seat| shuffled[seat % shuffled.len()])
        .collect()
}
