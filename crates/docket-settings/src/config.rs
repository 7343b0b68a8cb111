//! Application configuration
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files, picked by extension, stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Data refresh polling
//! - Snapping thresholds
//! - Global move and scale steps
//! - Defaults for newly drawn lines and paths
//! - Print rendering options

use std::path::{Path, PathBuf};

use docket_designer::{DesignerState, DrawSettings, GlobalOpsConfig, SnapConfig};
use docket_render::RenderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "docket";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data-source poll period in milliseconds.
    pub poll_interval_ms: u64,
    pub snap: SnapConfig,
    pub global_ops: GlobalOpsConfig,
    pub draw: DrawSettings,
    pub print: RenderOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            snap: SnapConfig::default(),
            global_ops: GlobalOpsConfig::default(),
            draw: DrawSettings::default(),
            print: RenderOptions::default(),
        }
    }
}

/// NaN is not positive.
fn positive(value: f64) -> bool {
    value > 0.0
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/docket/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        path.push(APP_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be > 0"));
        }

        let snap = &self.snap;
        for (key, value) in [
            ("snap.align_threshold", snap.align_threshold),
            ("snap.line_center_threshold", snap.line_center_threshold),
            ("snap.intersection_entrance", snap.intersection_entrance),
            ("snap.intersection_exit", snap.intersection_exit),
            ("snap.axis_guide_threshold", snap.axis_guide_threshold),
        ] {
            if !positive(value) {
                return Err(invalid(key, "must be > 0"));
            }
        }
        if snap.intersection_exit <= snap.intersection_entrance {
            return Err(invalid(
                "snap.intersection_exit",
                "must be greater than snap.intersection_entrance",
            ));
        }

        let ops = &self.global_ops;
        if !positive(ops.move_step) {
            return Err(invalid("global_ops.move_step", "must be > 0"));
        }
        if !positive(ops.scale_step) {
            return Err(invalid("global_ops.scale_step", "must be > 0"));
        }
        if !positive(ops.min_scale) {
            return Err(invalid("global_ops.min_scale", "must be > 0"));
        }

        if !positive(self.draw.stroke_width) {
            return Err(invalid("draw.stroke_width", "must be > 0"));
        }

        if self.print.qr_endpoint.trim().is_empty() {
            return Err(invalid("print.qr_endpoint", "must not be empty"));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }

    /// Pushes the editing sections into a designer.
    pub fn apply_to(&self, state: &mut DesignerState) {
        state.ops = self.global_ops.clone();
        let canvas = state.canvas_mut();
        canvas.snap = self.snap.clone();
        canvas.draw = self.draw.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.snap.intersection_entrance, 15.0);
        assert_eq!(config.snap.intersection_exit, 50.0);
        assert_eq!(config.global_ops.move_step, 10.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.poll_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "poll_interval_ms"
        ));

        let mut config = AppConfig::default();
        config.snap.intersection_exit = config.snap.intersection_entrance;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.snap.align_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.global_ops.scale_step = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.snap.axis_guide_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AppConfig::default().save_to_file(Path::new("config.yaml"));
        assert!(matches!(result, Err(SettingsError::UnsupportedFormat(ref ext)) if ext == "yaml"));
    }

    #[test]
    fn test_apply_to_designer() {
        let mut config = AppConfig::default();
        config.global_ops.move_step = 3.0;
        config.snap.align_threshold = 8.0;
        config.draw.stroke_width = 5.0;

        let mut state = DesignerState::default();
        config.apply_to(&mut state);
        assert_eq!(state.ops.move_step, 3.0);
        assert_eq!(state.canvas().snap.align_threshold, 8.0);
        assert_eq!(state.canvas().draw.stroke_width, 5.0);
    }
}
