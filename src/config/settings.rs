//! Persisted personalization settings.
//!
//! Stored as TOML in `~/.config/glasscalc/settings.toml` (platform config
//! directory). A missing file means defaults; a malformed one is an error so
//! a typo never silently resets the user's choices.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::ui::{FrameStyle, ThemeName, UnknownTheme};

const APP_DIR: &str = "glasscalc";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Failed to read settings {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write settings {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    UnknownTheme(#[from] UnknownTheme),

    #[error("Invalid background image {path}: {reason}")]
    InvalidBackground { path: PathBuf, reason: String },
}

/// User-chosen appearance, shared by every session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeName,
    pub translucent: bool,
    pub background: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            translucent: false,
            background: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn set_theme(&mut self, name: &str) -> Result<(), SettingsError> {
        self.theme = name.parse()?;
        Ok(())
    }

    /// Point the background at an image file.
    ///
    /// The file must be readable and decodable far enough to report its
    /// dimensions. The stored path is canonical so it survives a change of
    /// working directory.
    pub fn set_background(&mut self, path: &Path) -> Result<(u32, u32), SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidBackground {
            path: path.to_path_buf(),
            reason,
        };

        let canonical = path.canonicalize().map_err(|e| invalid(e.to_string()))?;
        let dimensions = image::image_dimensions(&canonical).map_err(|e| invalid(e.to_string()))?;

        debug!(
            "background {} is {}x{}",
            canonical.display(),
            dimensions.0,
            dimensions.1
        );
        self.background = Some(canonical);
        Ok(dimensions)
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// File name of the background image, for captions.
    pub fn background_name(&self) -> Option<String> {
        self.background
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Renderer styling for these settings.
    pub fn frame_style(&self, plain: bool) -> FrameStyle {
        FrameStyle::new(self.theme, self.translucent)
            .plain(plain)
            .with_background(self.background_name())
    }
}

/// Location of the settings file and the load/save operations on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn default_location() -> Result<Self, SettingsError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR).join(SETTINGS_FILE)))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings, SettingsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write settings through a temporary sibling so readers never observe
    /// a half-written file.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let contents = toml::to_string_pretty(settings)?;
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Load, modify and save in one step.
    pub fn update<F>(&self, change: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings) -> Result<(), SettingsError>,
    {
        let mut settings = self.load()?;
        change(&mut settings)?;
        self.save(&settings)?;
        Ok(settings)
    }
}
