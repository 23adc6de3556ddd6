//! Asset discovery and startup font validation.
//!
//! Both run before the window opens, so every failure here is fatal and
//! reported through [`GameError`].

use crate::config::GameConfig;
use crate::error::{AssetCategory, GameError, GameResult};
use crate::world::ImageRef;
use std::path::{Path, PathBuf};

/// Image pools and font path resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct GameAssets {
    pub planet_images: Vec<ImageRef>,
    pub ship_images: Vec<ImageRef>,
    /// Font path relative to the asset root, already validated.
    pub font: Option<PathBuf>,
}

impl GameAssets {
    /// Discover both image pools and validate the configured font.
    pub fn discover(config: &GameConfig) -> GameResult<Self> {
        let planet_images =
            discover_images(&config.asset_root, &config.planet_image_dir, AssetCategory::Planet)?;
        let ship_images =
            discover_images(&config.asset_root, &config.ship_image_dir, AssetCategory::Ship)?;
        if let Some(font) = &config.font_path {
            validate_font(&config.asset_root.join(font))?;
        }
        Ok(Self {
            planet_images,
            ship_images,
            font: config.font_path.clone(),
        })
    }
}

/// List the regular files in `asset_root/dir`, sorted by file name.
///
/// The returned references are relative to `asset_root`, which is how the
/// Bevy asset server expects them.
pub fn discover_images(
    asset_root: &Path,
    dir: &Path,
    category: AssetCategory,
) -> GameResult<Vec<ImageRef>> {
    let full = asset_root.join(dir);
    let unreadable = |source: std::io::Error| GameError::AssetDirUnreadable {
        category,
        dir: full.clone(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&full).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_type().map_err(unreadable)?.is_file() {
            names.push(entry.file_name());
        }
    }
    if names.is_empty() {
        return Err(GameError::AssetDirEmpty {
            category,
            dir: full,
        });
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            // Asset paths always use forward slashes, whatever the host OS.
            let path = dir.join(name);
            ImageRef::new(path.to_string_lossy().replace('\\', "/"))
        })
        .collect())
}

/// Read and parse a TrueType/OpenType font so a bad file fails at startup.
pub fn validate_font(path: &Path) -> GameResult<()> {
    let bytes = std::fs::read(path).map_err(|source| GameError::FontUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    ttf_parser::Face::parse(&bytes, 0).map_err(|e| GameError::FontInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(files: &[&str]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("img/planets");
        fs::create_dir_all(&dir).unwrap();
        for name in files {
            fs::write(dir.join(name), b"png").unwrap();
        }
        root
    }

    #[test]
    fn images_are_sorted_and_relative_to_root() {
        let root = fixture(&["mars.png", "earth.png", "venus.png"]);
        let images =
            discover_images(root.path(), Path::new("img/planets"), AssetCategory::Planet).unwrap();
        let names: Vec<&str> = images.iter().map(ImageRef::as_str).collect();
        assert_eq!(
            names,
            vec!["img/planets/earth.png", "img/planets/mars.png", "img/planets/venus.png"]
        );
    }

    #[test]
    fn subdirectories_are_skipped() {
        let root = fixture(&["moon.png"]);
        fs::create_dir(root.path().join("img/planets/nested")).unwrap();
        let images =
            discover_images(root.path(), Path::new("img/planets"), AssetCategory::Planet).unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn empty_dir_and_missing_dir_are_distinct_errors() {
        let root = fixture(&[]);
        assert!(matches!(
            discover_images(root.path(), Path::new("img/planets"), AssetCategory::Planet),
            Err(GameError::AssetDirEmpty {
                category: AssetCategory::Planet,
                ..
            })
        ));
        assert!(matches!(
            discover_images(root.path(), Path::new("img/ships"), AssetCategory::Ship),
            Err(GameError::AssetDirUnreadable {
                category: AssetCategory::Ship,
                ..
            })
        ));
    }

    #[test]
    fn discover_reports_missing_ship_pool() {
        let root = fixture(&["a.png"]);
        let config = GameConfig {
            asset_root: root.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            GameAssets::discover(&config),
            Err(GameError::AssetDirUnreadable {
                category: AssetCategory::Ship,
                ..
            })
        ));

        fs::create_dir_all(root.path().join("img/ships")).unwrap();
        fs::write(root.path().join("img/ships/x.png"), b"png").unwrap();
        let assets = GameAssets::discover(&config).unwrap();
        assert_eq!(assets.planet_images, vec![ImageRef::new("img/planets/a.png")]);
        assert_eq!(assets.ship_images, vec![ImageRef::new("img/ships/x.png")]);
        assert_eq!(assets.font, None);
    }

    #[test]
    fn font_errors_distinguish_missing_from_corrupt() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope.ttf");
        assert!(matches!(
            validate_font(&missing),
            Err(GameError::FontUnreadable { .. })
        ));

        let corrupt = root.path().join("bad.ttf");
        fs::write(&corrupt, b"definitely not a font").unwrap();
        assert!(matches!(
            validate_font(&corrupt),
            Err(GameError::FontInvalid { .. })
        ));
    }
}
