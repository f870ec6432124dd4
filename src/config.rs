/// Application settings
///
/// Settings are read from `settings.json` in the user's config directory:
/// - Linux: ~/.config/dungeon-explorer/settings.json
/// - macOS: ~/Library/Application Support/dungeon-explorer/settings.json
/// - Windows: %APPDATA%\dungeon-explorer\settings.json
///
/// A missing file means defaults. Nothing is written back at runtime.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::data::Dimensions;

const APP_DIR: &str = "dungeon-explorer";
const CONFIG_FILE: &str = "settings.json";

/// Box used when the "Resize to" fields are blank or invalid
pub const FALLBACK_WIDTH: u32 = 1200;
pub const FALLBACK_HEIGHT: u32 = 800;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Managed maps folder: the "Default" listing and the import target
    pub maps_dir: PathBuf,
    pub fallback_width: u32,
    pub fallback_height: u32,
    /// Initial size of the control window
    pub control_width: u32,
    pub control_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maps_dir: default_maps_dir(),
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
            control_width: 1024,
            control_height: 720,
        }
    }
}

impl Settings {
    /// Load from the default location, or defaults when there is no file
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("⚙️  Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Create the maps folder (and its parents) if it does not exist yet
    pub fn ensure_maps_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.maps_dir)
    }

    /// Fallback bounding box for presenting a selection
    pub fn fallback_box(&self) -> Dimensions {
        Dimensions::new(self.fallback_width, self.fallback_height).unwrap_or(Dimensions {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
        })
    }

    pub fn control_size(&self) -> Dimensions {
        Dimensions::new(self.control_width, self.control_height)
            .unwrap_or(Dimensions { width: 1024, height: 720 })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

fn default_maps_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push("maps");
    path
}
