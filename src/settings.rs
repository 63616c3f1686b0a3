//! Game settings
//!
//! Persisted as JSON in LocalStorage on the web; read from an optional file
//! natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Smallest and largest supported boards
pub const MIN_TILES: usize = 3;
pub const MAX_TILES: usize = 16;
/// A flash needs a non-empty half slot
pub const MIN_FLASH_DELAY_MS: u64 = 2;
/// Longest flash slot or round pause accepted from stored settings
pub const MAX_DELAY_MS: u64 = 60_000;

/// Tunable timings and board shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time slot per flashed step (ms)
    pub flash_delay_ms: u64,
    /// Pause between a cleared round and the next playback (ms)
    pub round_pause_ms: u64,
    /// Number of wedges on the board
    pub tile_count: usize,
    /// Board radius in canvas pixels
    pub outer_radius: f32,
    /// Fixed RNG seed (random per start when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flash_delay_ms: FLASH_DELAY_MS,
            round_pause_ms: ROUND_PAUSE_MS,
            tile_count: TILE_COUNT,
            outer_radius: BOARD_OUTER_RADIUS,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "octo_recall_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(|s| s.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values the engine cannot honor
    pub fn sanitized(mut self) -> Self {
        self.tile_count = self.tile_count.clamp(MIN_TILES, MAX_TILES);
        // Even so the lit half of a slot is exact
        self.flash_delay_ms = self.flash_delay_ms.clamp(MIN_FLASH_DELAY_MS, MAX_DELAY_MS) & !1;
        self.round_pause_ms = self.round_pause_ms.min(MAX_DELAY_MS);
        if !(self.outer_radius.is_finite() && self.outer_radius > 0.0) {
            log::warn!("Invalid board radius {}, using default", self.outer_radius);
            self.outer_radius = BOARD_OUTER_RADIUS;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings in {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.flash_delay_ms, 1000);
        assert_eq!(s.round_pause_ms, 1000);
        assert_eq!(s.tile_count, 8);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "flash_delay_ms": 600, "seed": 42 }"#).unwrap();
        assert_eq!(s.flash_delay_ms, 600);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.tile_count, 8);
        assert_eq!(s.round_pause_ms, 1000);
    }

    #[test]
    fn test_sanitize_clamps() {
        let s = Settings {
            flash_delay_ms: 1,
            tile_count: 40,
            outer_radius: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.flash_delay_ms, 2);
        assert_eq!(s.tile_count, MAX_TILES);
        assert_eq!(s.outer_radius, BOARD_OUTER_RADIUS);

        let odd = Settings {
            flash_delay_ms: 751,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(odd.flash_delay_ms, 750);
    }

    #[test]
    fn test_sanitize_caps_timings() {
        let s = Settings {
            flash_delay_ms: u64::MAX / 2 + 1,
            round_pause_ms: u64::MAX,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.flash_delay_ms, MAX_DELAY_MS);
        assert_eq!(s.round_pause_ms, MAX_DELAY_MS);

        let stored = Settings::from_json(r#"{ "flash_delay_ms": 18446744073709551615 }"#).unwrap();
        assert_eq!(stored.flash_delay_ms, MAX_DELAY_MS);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            seed: Some(7),
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load_from(Some(std::path::Path::new("/nonexistent/octo.json")));
        assert_eq!(s, Settings::default());
    }
}
