//! User settings file (`~/.config/mame2batocera/settings.toml`).
//!
//! Every key is optional. Values here sit between command-line flags and the
//! built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use mame2batocera_core::MediaCategory;

use crate::error::SettingsError;

/// Canonical path to the settings file: `~/.config/mame2batocera/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("mame2batocera").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub extras: ExtrasSettings,
    pub mapping: MappingSettings,
}

/// `[paths]`: fallbacks for the directory flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub dat_zip: Option<PathBuf>,
    pub extras_dir: Option<PathBuf>,
    pub roms_dir: Option<PathBuf>,
    pub extract_temp: Option<PathBuf>,
}

/// `[extras]`: archive file names inside the extras directory.
///
/// A name set here is explicit: if the archive is missing the run warns
/// instead of silently skipping the category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtrasSettings {
    pub snap: Option<String>,
    pub flyers: Option<String>,
    pub artwork: Option<String>,
}

impl ExtrasSettings {
    /// Configured archive name for a category, if any.
    pub fn archive_for(&self, category: MediaCategory) -> Option<&str> {
        let name = match category {
            MediaCategory::Screenshot => &self.snap,
            MediaCategory::Cover => &self.flyers,
            MediaCategory::Marquee => &self.artwork,
        };
        name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// `[mapping]`: knobs for the field mapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    /// Genre written when the DAT has none
    pub default_genre: String,
    /// Also hide BIOS, device and mechanical sets
    pub hide_system_entries: bool,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            default_genre: "Arcade".to_string(),
            hide_system_entries: false,
        }
    }
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings file at {}", path.display());
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let settings = toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
