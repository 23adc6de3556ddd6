//! Game-specific error types.
//!
//! Every startup step (config validation, asset discovery, font loading,
//! world creation) returns these types so `main` can report a descriptive
//! message and exit instead of panicking.
//!
//! ## Usage
//!
//! ```rust
//! use slingshot::error::{GameError, GameResult};
//!
//! fn require_players(count: usize) -> GameResult<()> {
//!     if count == 0 {
//!         return Err(GameError::NoPlayers);
//!     }
//!     Ok(())
//! }
//! # assert!(require_players(0).is_err());
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The two sprite pools the world is textured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Planet,
    Ship,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Planet => f.write_str("planet"),
            AssetCategory::Ship => f.write_str("ship"),
        }
    }
}

/// Top-level error enum for the slingshot game.
#[derive(Debug)]
pub enum GameError {
    /// An asset list handed to the world factory was empty, so round-robin
    /// assignment has nothing to cycle through.
    NoAssets {
        /// Which pool was empty.
        category: AssetCategory,
    },

    /// An asset directory exists and is readable but contains no files.
    AssetDirEmpty {
        category: AssetCategory,
        dir: PathBuf,
    },

    /// An asset directory is missing or could not be listed.
    AssetDirUnreadable {
        category: AssetCategory,
        dir: PathBuf,
        source: io::Error,
    },

    /// The world factory was asked for zero players; the turn controller
    /// needs at least one.
    NoPlayers,

    /// Placement bounds must be strictly positive and finite.
    InvalidWorldBounds { width: f32, height: f32 },

    /// The configured font file could not be read.
    FontUnreadable { path: PathBuf, source: io::Error },

    /// The configured font file was read but is not a usable TrueType/OpenType face.
    FontInvalid { path: PathBuf, reason: String },

    /// A configuration value is outside its accepted range.
    InvalidConfig {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoAssets { category } => {
                write!(f, "no {} images available to assign", category)
            }
            GameError::AssetDirEmpty { category, dir } => write!(
                f,
                "no {} images found in '{}'",
                category,
                dir.display()
            ),
            GameError::AssetDirUnreadable { category, dir, source } => write!(
                f,
                "cannot read {} image directory '{}': {}",
                category,
                dir.display(),
                source
            ),
            GameError::NoPlayers => f.write_str("a game needs at least one player"),
            GameError::InvalidWorldBounds { width, height } => write!(
                f,
                "world bounds must be positive, got {} x {}",
                width, height
            ),
            GameError::FontUnreadable { path, source } => {
                write!(f, "cannot read font '{}': {}", path.display(), source)
            }
            GameError::FontInvalid { path, reason } => {
                write!(f, "font '{}' is not usable: {}", path.display(), reason)
            }
            GameError::InvalidConfig {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config '{}' = {} is outside accepted range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::AssetDirUnreadable { source, .. } | GameError::FontUnreadable { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error when both bounds are set and `min > max`.
///
/// The reported value is the offending minimum.
pub fn validate_bounds(
    name: &'static str,
    min: Option<f32>,
    max: Option<f32>,
) -> GameResult<()> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi || lo.is_nan() || hi.is_nan() => {
            Err(GameError::InvalidConfig {
                name,
                value: f64::from(lo),
                safe_range: "min <= max",
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert!(validate_positive("zoom_speed", 1.2).is_ok());
        assert!(validate_positive("zoom_speed", 0.0).is_err());
        assert!(validate_positive("zoom_speed", -1.0).is_err());
        assert!(validate_positive("zoom_speed", f64::NAN).is_err());
        assert!(validate_positive("zoom_speed", f64::INFINITY).is_err());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(validate_non_negative("pan_speed", 0.0).is_ok());
        assert!(validate_non_negative("pan_speed", -0.5).is_err());
    }

    #[test]
    fn bounds_reject_inverted_range_only() {
        assert!(validate_bounds("power", None, Some(5.0)).is_ok());
        assert!(validate_bounds("power", Some(0.0), Some(100.0)).is_ok());
        assert!(validate_bounds("power", Some(10.0), Some(10.0)).is_ok());
        assert!(validate_bounds("power", Some(50.0), Some(10.0)).is_err());
    }

    #[test]
    fn unreadable_dir_exposes_io_source() {
        let err = GameError::AssetDirUnreadable {
            category: AssetCategory::Ship,
            dir: PathBuf::from("img/ships"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("ship image directory"));
        assert!(GameError::NoPlayers.source().is_none());
    }
}
