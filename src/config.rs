//! Game settings and the data directory
//!
//! Settings live in `settings.json` inside the data directory:
//! - Linux: ~/.local/share/lingle/
//! - macOS: ~/Library/Application Support/org.lingle.Lingle/
//! - Windows: %APPDATA%/lingle/Lingle/data/
//!
//! Command-line flags override whatever the file says.

use crate::error::ValidationError;
use crate::game::{DEFAULT_MAX_GUESSES, DateKey, Rules};
use crate::storage::{StorageError, write_atomic};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "lingle";
const APP_NAME: &str = "Lingle";
const SETTINGS_FILE: &str = "settings.json";

/// Player-adjustable settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_guesses: usize,
    pub hard_mode: bool,
    /// First day of the daily schedule (puzzle #0)
    pub epoch: DateKey,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            hard_mode: false,
            epoch: DateKey::DEFAULT_EPOCH,
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn rules(&self) -> Rules {
        Rules {
            max_guesses: self.max_guesses,
            hard_mode: self.hard_mode,
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::ZeroGuesses` if no guesses are allowed.
    pub const fn validate(&self) -> Result<(), ValidationError> {
        if self.max_guesses == 0 {
            Err(ValidationError::ZeroGuesses)
        } else {
            Ok(())
        }
    }
}

/// Platform data directory, or `.lingle` in the working directory when the
/// platform has none
#[must_use]
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map_or_else(
        || PathBuf::from(".lingle"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

#[must_use]
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

/// Load settings from `data_dir`
///
/// Returns defaults if the file is missing, unreadable, unparsable or
/// invalid.
#[must_use]
pub fn load_settings(data_dir: &Path) -> Settings {
    let path = settings_path(data_dir);

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => {
                if let Err(e) = settings.validate() {
                    tracing::warn!("Ignoring settings in {}: {e}", path.display());
                    return Settings::default();
                }
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {e}, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {e}, using defaults");
            Settings::default()
        }
    }
}

/// Save settings to `data_dir`, creating it if needed
///
/// # Errors
///
/// Returns `StorageError` if the file could not be written.
pub fn save_settings(data_dir: &Path, settings: &Settings) -> Result<(), StorageError> {
    let path = settings_path(data_dir);
    let content = serde_json::to_vec_pretty(settings).map_err(|source| StorageError::Json {
        path: path.clone(),
        source,
    })?;
    write_atomic(&path, &content)?;
    tracing::info!("Saved settings to {}", path.display());
    Ok(())
}
