//! Engine configuration
//!
//! Host-facing knobs persisted as JSON. Loading never fails the caller:
//! a missing or malformed file logs and falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FPS;
use crate::surface::Color;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logic ticks per second
    pub fps: f64,
    /// Background fill for the draw pass
    pub clear_color: Color,
    /// Camera dimensions filled in at `start()` when the caller leaves the
    /// camera unsized
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            clear_color: Color::BLACK,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl EngineConfig {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("loaded engine config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("malformed engine config {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no engine config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let path = std::env::temp_dir().join(format!("playfield-config-{}.json", std::process::id()));

        let config = EngineConfig {
            fps: 30.0,
            clear_color: Color::rgb(29, 35, 48),
            ..EngineConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = EngineConfig::load(&path);
        assert_eq!(loaded.fps, 30.0);
        assert_eq!(loaded.clear_color, Color::rgb(29, 35, 48));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_and_malformed_files_fall_back() {
        let missing = EngineConfig::load("/definitely/not/a/real/path.json");
        assert_eq!(missing.fps, DEFAULT_FPS);

        let path = std::env::temp_dir().join(format!("playfield-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();
        let malformed = EngineConfig::load(&path);
        assert_eq!(malformed.fps, DEFAULT_FPS);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"fps": 120.0}"#).unwrap();
        assert_eq!(config.fps, 120.0);
        assert_eq!(config.clear_color, Color::BLACK);
    }
}
