//! Template store persistence
//!
//! The whole template collection, with its current id, is kept in one
//! JSON file. A missing file means first start; an unreadable one is
//! reported so the caller can decide whether to fall back to defaults.

use std::path::{Path, PathBuf};

use docket_designer::TemplateStore;
use tracing::{info, warn};

use crate::config::APP_DIR_NAME;
use crate::error::{PersistenceError, PersistenceResult};

/// Default store file name.
pub const TEMPLATES_FILE_NAME: &str = "templates.json";

/// Reads and writes the template store at a fixed path.
#[derive(Debug, Clone)]
pub struct TemplatePersistence {
    path: PathBuf,
}

impl TemplatePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn default_location() -> PersistenceResult<Self> {
        let mut path = dirs::data_dir()
            .or_else(dirs::config_dir)
            .ok_or(PersistenceError::NoStorageDirectory)?;
        path.push(APP_DIR_NAME);
        path.push(TEMPLATES_FILE_NAME);
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the store. A missing file yields the default store.
    pub fn load(&self) -> PersistenceResult<TemplateStore> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No template store yet, using defaults");
            return Ok(TemplateStore::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let mut store: TemplateStore = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::Corrupted(e.to_string()))?;
        if store.ensure_default() {
            warn!("Template store repaired on load");
        }
        info!(count = store.len(), "Loaded template store");
        Ok(store)
    }

    /// Like [`load`](Self::load) but falls back to the default store when
    /// the file cannot be read.
    pub fn load_or_default(&self) -> TemplateStore {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, path = %self.path.display(), "Failed to load template store");
            TemplateStore::new()
        })
    }

    /// Writes the store, replacing the previous file only once the new
    /// content is fully written.
    pub fn save(&self, store: &TemplateStore) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(store)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
