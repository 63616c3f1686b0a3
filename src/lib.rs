//! Octo Recall - A Simon-says memory game on an octagonal board
//!
//! Core modules:
//! - `sim`: Deterministic game engine (board geometry, sequence, playback, input, phases)
//! - `renderer`: Drawing adapter the engine talks to
//! - `settings`: Tunable timings and board shape

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::Renderer;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Number of wedges on the board
    pub const TILE_COUNT: usize = 8;

    /// Board placement in canvas-local coordinates
    pub const BOARD_CENTER_X: f32 = 200.0;
    pub const BOARD_CENTER_Y: f32 = 200.0;
    pub const BOARD_OUTER_RADIUS: f32 = 200.0;

    /// Time slot per flashed step (ms). A flash stays lit for half of it.
    pub const FLASH_DELAY_MS: u64 = 1000;
    /// Pause between a cleared round and the next playback (ms)
    pub const ROUND_PAUSE_MS: u64 = 1000;

    /// Neutral tile outline
    pub const NEUTRAL_STROKE: &str = "black";
    pub const NEUTRAL_STROKE_WIDTH: f32 = 2.0;
    /// Highlighted tile outline
    pub const FLASH_STROKE: &str = "white";
    pub const FLASH_STROKE_WIDTH: f32 = 5.0;
}

/// Fixed tile palette, in tile index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
    Orange,
    Brown,
}

impl TileColor {
    pub const ALL: [TileColor; 8] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Pink,
        TileColor::Purple,
        TileColor::Orange,
        TileColor::Brown,
    ];

    /// Palette entry for a tile index (wraps for boards larger than the palette)
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Yellow => "yellow",
            TileColor::Pink => "pink",
            TileColor::Purple => "purple",
            TileColor::Orange => "orange",
            TileColor::Brown => "brown",
        }
    }
}

/// Board center as a vector
#[inline]
pub fn board_center() -> Vec2 {
    Vec2::new(consts::BOARD_CENTER_X, consts::BOARD_CENTER_Y)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_order() {
        let names: Vec<_> = TileColor::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            ["red", "blue", "green", "yellow", "pink", "purple", "orange", "brown"]
        );
        assert_eq!(TileColor::for_index(9), TileColor::Blue);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }
}
