//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AutocamResult;

/// Default auto-zoom intensity for new projects.
pub const DEFAULT_AUTO_ZOOM_INTENSITY: f64 = 0.55;

/// Default minimum spacing between generated camera keyframes (seconds).
pub const DEFAULT_MINIMUM_KEYFRAME_INTERVAL: f64 = 0.15;

/// Smallest keyframe interval a project may persist (seconds).
pub const MINIMUM_KEYFRAME_INTERVAL_FLOOR: f64 = 0.0001;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Auto-zoom defaults applied to new projects.
    pub auto_zoom: AutoZoomSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "autocam=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

/// Persisted auto-zoom settings, stored alongside a project.
///
/// Serialized in camelCase to match the project state document
/// (`{"isEnabled": .., "intensity": .., "minimumKeyframeInterval": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoZoomSettings {
    /// Whether the virtual camera is applied at preview/export time.
    pub is_enabled: bool,

    /// How aggressively to zoom, in `[0.0, 1.0]`.
    pub intensity: f64,

    /// Debounce window between keyframes, in seconds.
    pub minimum_keyframe_interval: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl Default for AutoZoomSettings {
    fn default() -> Self {
        Self {
            is_enabled: false,
            intensity: DEFAULT_AUTO_ZOOM_INTENSITY,
            minimum_keyframe_interval: DEFAULT_MINIMUM_KEYFRAME_INTERVAL,
        }
    }
}

impl AutoZoomSettings {
    /// Return a copy with values forced into their valid ranges.
    ///
    /// Intensity is clamped to `[0, 1]` and the keyframe interval is floored
    /// at [`MINIMUM_KEYFRAME_INTERVAL_FLOOR`]. Non-finite values fall back to
    /// the defaults.
    pub fn sanitized(&self) -> Self {
        let intensity = if self.intensity.is_finite() {
            self.intensity.clamp(0.0, 1.0)
        } else {
            DEFAULT_AUTO_ZOOM_INTENSITY
        };
        let minimum_keyframe_interval = if self.minimum_keyframe_interval.is_finite() {
            self.minimum_keyframe_interval
                .max(MINIMUM_KEYFRAME_INTERVAL_FLOOR)
        } else {
            DEFAULT_MINIMUM_KEYFRAME_INTERVAL
        };
        Self {
            is_enabled: self.is_enabled,
            intensity,
            minimum_keyframe_interval,
        }
    }
}

impl AppConfig {
    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        Self::try_load_from(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
            Self::default()
        })
    }

    /// Load config from the standard location, reporting unreadable files.
    pub fn try_load() -> AutocamResult<Self> {
        Self::try_load_from(&config_file_path())
    }

    /// Load config from an explicit path.
    ///
    /// A missing file yields the defaults; a file that cannot be read or
    /// parsed is an error.
    pub fn try_load_from(config_path: &Path) -> AutocamResult<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("autocam").join("config.json")
}
