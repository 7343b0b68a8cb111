//! Backup export and import.
//!
//! A backup is one JSON document holding every template plus the settings
//! of the workspace at export time. Import checks the shape before
//! deserializing anything so a foreign file is rejected as a whole.

use std::path::Path;

use chrono::{DateTime, Local, TimeZone, Utc};
use docket_designer::{Action, DesignerState, GlobalSettings, Template};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{BackupError, BackupResult};

pub const BACKUP_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    #[serde(default)]
    pub version: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
    pub templates: Vec<Template>,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

impl BackupPayload {
    pub fn new(templates: Vec<Template>, global_settings: GlobalSettings) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            templates,
            global_settings,
        }
    }

    /// Snapshot of a designer: its saved templates and workspace settings.
    pub fn from_state(state: &DesignerState) -> Self {
        Self::new(state.templates().templates().to_vec(), state.settings().clone())
    }

    /// Parses a payload, requiring `templates` to be an array.
    pub fn parse(json: &str) -> BackupResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.get("templates").is_some_and(Value::is_array) {
            return Err(BackupError::MissingTemplates);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> BackupResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    /// `backup-YYYY-MM-DD_HH-MM-SS.json` in local time.
    pub fn file_name(&self) -> String {
        let at = self
            .created_at()
            .map(|t| t.with_timezone(&Local))
            .unwrap_or_else(Local::now);
        format!("backup-{}.json", at.format("%Y-%m-%d_%H-%M-%S"))
    }

    /// The designer action that replaces the template store.
    pub fn into_action(self) -> Action {
        Action::ImportTemplates(self.templates)
    }
}

/// Writes `payload` as pretty JSON.
pub fn export_backup(path: &Path, payload: &BackupPayload) -> BackupResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, payload.to_json()?)?;
    info!(
        path = %path.display(),
        templates = payload.templates.len(),
        "Exported backup"
    );
    Ok(())
}

/// Reads and validates a backup file.
pub fn import_backup(path: &Path) -> BackupResult<BackupPayload> {
    let content = std::fs::read_to_string(path)?;
    let payload = BackupPayload::parse(&content).inspect_err(|e| {
        warn!(error = %e, path = %path.display(), "Rejected backup file");
    })?;
    if payload.version != BACKUP_VERSION {
        warn!(version = %payload.version, "Backup written by another version");
    }
    info!(templates = payload.templates.len(), "Read backup");
    Ok(payload)
}
