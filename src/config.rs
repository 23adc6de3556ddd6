//! Runtime game configuration loaded from `assets/slingshot.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup `main` calls [`GameConfig::load_or_default`],
//! which reads `assets/slingshot.toml` and overwrites the defaults with any
//! values present in the file.  Missing keys fall back to the compile-time
//! defaults, so a minimal TOML can override just the values you care about.
//!
//! Unlike a parse failure, a value that parses but is out of range is fatal:
//! [`GameConfig::validate`] runs before the window opens.

use crate::constants::*;
use crate::error::{validate_bounds, validate_non_negative, validate_positive, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime-tunable world, camera, and presentation configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ─────────────────────────────────────────────────────────────────
    pub planet_count: usize,
    pub player_count: usize,
    pub world_width: f32,
    pub world_height: f32,
    pub max_planet_diameter: f32,
    /// Fixed world-generation seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,

    // ── Ships ─────────────────────────────────────────────────────────────────
    pub initial_power: f32,
    pub angle_spread: f32,
    pub angle_step: f32,
    pub power_step: f32,
    /// Optional lower clamp for ship power.  Unset leaves power unbounded.
    pub min_power: Option<f32>,
    pub max_power: Option<f32>,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Optional zoom clamp.  Unset leaves zoom unbounded (but always positive).
    pub min_zoom: Option<f32>,
    pub max_zoom: Option<f32>,

    // ── Frame Loop ────────────────────────────────────────────────────────────
    pub tick_interval_ms: u64,

    // ── Window & Rendering ────────────────────────────────────────────────────
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub hud_font_size: f32,

    // ── Assets ────────────────────────────────────────────────────────────────
    pub asset_root: PathBuf,
    pub planet_image_dir: PathBuf,
    pub ship_image_dir: PathBuf,
    /// Font path relative to `asset_root`.  Unset uses Bevy's built-in font.
    pub font_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World
            planet_count: PLANET_COUNT,
            player_count: PLAYER_COUNT,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            max_planet_diameter: MAX_PLANET_DIAMETER,
            seed: None,
            // Ships
            initial_power: INITIAL_POWER,
            angle_spread: ANGLE_SPREAD,
            angle_step: ANGLE_STEP,
            power_step: POWER_STEP,
            min_power: None,
            max_power: None,
            // Camera
            pan_speed: PAN_SPEED,
            zoom_speed: ZOOM_SPEED,
            min_zoom: None,
            max_zoom: None,
            // Frame Loop
            tick_interval_ms: TICK_INTERVAL_MS,
            // Window & Rendering
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),
            hud_font_size: HUD_FONT_SIZE,
            // Assets
            asset_root: PathBuf::from(ASSET_ROOT),
            planet_image_dir: PathBuf::from(PLANET_IMAGE_DIR),
            ship_image_dir: PathBuf::from(SHIP_IMAGE_DIR),
            font_path: None,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; keys not present keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read `path` and parse it, falling back to defaults.
    ///
    /// A missing file is not an error.  A malformed file is reported on stderr
    /// (the log subscriber is not installed yet) and also yields defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(loaded) => {
                    eprintln!("[SETUP] Loaded game config from {}", path.display());
                    loaded
                }
                Err(e) => {
                    eprintln!(
                        "[SETUP] Failed to parse {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!(
                    "[SETUP] No {} found; using compiled defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Apply a seed taken from the environment, if it parses as `u64`.
    ///
    /// Returns the seed that was applied.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) -> Option<u64> {
        let seed = raw.and_then(|s| s.trim().parse::<u64>().ok())?;
        self.seed = Some(seed);
        Some(seed)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        if self.player_count == 0 {
            return Err(GameError::NoPlayers);
        }
        if !(self.world_width.is_finite()
            && self.world_height.is_finite()
            && self.world_width > 0.0
            && self.world_height > 0.0)
        {
            return Err(GameError::InvalidWorldBounds {
                width: self.world_width,
                height: self.world_height,
            });
        }
        validate_positive("max_planet_diameter", f64::from(self.max_planet_diameter))?;
        validate_non_negative("pan_speed", f64::from(self.pan_speed))?;
        validate_positive("zoom_speed", f64::from(self.zoom_speed))?;
        validate_positive("hud_font_size", f64::from(self.hud_font_size))?;
        // Precision loss is irrelevant for a range check on milliseconds.
        validate_positive("tick_interval_ms", self.tick_interval_ms as f64)?;
        if let Some(min) = self.min_zoom {
            validate_positive("min_zoom", f64::from(min))?;
        }
        if let Some(max) = self.max_zoom {
            validate_positive("max_zoom", f64::from(max))?;
        }
        validate_bounds("min_zoom", self.min_zoom, self.max_zoom)?;
        validate_bounds("min_power", self.min_power, self.max_power)?;
        Ok(())
    }

    /// Duration of one game tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Centre of the window in screen units; the camera starts looking here.
    pub fn viewport_center(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32) * 0.5
    }

    /// Zoom clamp as a pair, when both bounds are configured; otherwise the
    /// missing side is open.
    pub fn zoom_limits(&self) -> Option<(f32, f32)> {
        bounds_pair(self.min_zoom, self.max_zoom)
    }

    pub fn power_limits(&self) -> Option<(f32, f32)> {
        bounds_pair(self.min_power, self.max_power)
    }
}

fn bounds_pair(min: Option<f32>, max: Option<f32>) -> Option<(f32, f32)> {
    match (min, max) {
        (None, None) => None,
        (lo, hi) => Some((lo.unwrap_or(f32::NEG_INFINITY), hi.unwrap_or(f32::INFINITY))),
    }
}
