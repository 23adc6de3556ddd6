//! Centralised gameplay, camera, and window constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig::default`] mirrors
//! these values; `assets/slingshot.toml` can override any of them at startup.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Width of the region entities are placed in at world creation (world units).
///
/// Matches the default viewport width so the whole field is visible at zoom 1.
pub const WORLD_WIDTH: f32 = 1024.0;

/// Height of the initial placement region (world units).
pub const WORLD_HEIGHT: f32 = 768.0;

/// Number of planets created at startup.
pub const PLANET_COUNT: usize = 5;

/// Number of players (and therefore ships) created at startup.
pub const PLAYER_COUNT: usize = 2;

/// Upper bound of the planet diameter draw; diameters fall in `(0, MAX_PLANET_DIAMETER]`.
pub const MAX_PLANET_DIAMETER: f32 = 100.0;

// ── Ships ─────────────────────────────────────────────────────────────────────

/// Power every ship starts with.
pub const INITIAL_POWER: f32 = 10.0;

/// Degrees between the starting headings of consecutive players.
///
/// Player `i` starts at `(ANGLE_SPREAD * i) mod 360`.
pub const ANGLE_SPREAD: f32 = 90.0;

/// Degrees added or removed per tick while a rotate key is held.
pub const ANGLE_STEP: f32 = 10.0;

/// Power added or removed per tick while a power key is held.
pub const POWER_STEP: f32 = 10.0;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Camera pan speed in world units per second while a pan key is held.
pub const PAN_SPEED: f32 = 500.0;

/// Multiplicative zoom factor per scroll line: `zoom' = zoom * ZOOM_SPEED^scroll`.
///
/// Values above 1.0 zoom in on positive scroll; 1.0 disables zooming.
pub const ZOOM_SPEED: f32 = 1.2;

/// Pixels reported by a high-resolution scroll device that count as one scroll line.
pub const SCROLL_PIXELS_PER_LINE: f32 = 100.0;

// ── Frame Loop ────────────────────────────────────────────────────────────────

/// Interval between game ticks in milliseconds.
///
/// Rotation and power change once per tick, so at 100 ms a held rotate key
/// turns the ship 100°/s.
pub const TICK_INTERVAL_MS: u64 = 100;

// ── Window & Rendering ────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const WINDOW_TITLE: &str = "Slingshot";

/// Font size of the player score lines.
pub const HUD_FONT_SIZE: f32 = 18.0;

// ── Assets ────────────────────────────────────────────────────────────────────

/// Root directory Bevy's asset server resolves asset paths against.
pub const ASSET_ROOT: &str = "assets";

/// Planet sprite directory, relative to [`ASSET_ROOT`].
pub const PLANET_IMAGE_DIR: &str = "img/planets";

/// Ship sprite directory, relative to [`ASSET_ROOT`].
pub const SHIP_IMAGE_DIR: &str = "img/ships";

/// Location of the optional TOML override file.
pub const CONFIG_PATH: &str = "assets/slingshot.toml";

/// Environment variable that pins the world-generation seed.
pub const SEED_ENV_VAR: &str = "SLINGSHOT_SEED";
