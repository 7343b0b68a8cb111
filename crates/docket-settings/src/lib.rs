//! Docket Settings Crate
//!
//! Handles the application config file, persistence of the template
//! store, and backup export/import.

pub mod backup;
pub mod config;
pub mod error;
pub mod persistence;

pub use backup::{export_backup, import_backup, BackupPayload, BACKUP_VERSION};
pub use config::{AppConfig, APP_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{
    BackupError, BackupResult, PersistenceError, PersistenceResult, SettingsError,
    SettingsResult,
};
pub use persistence::{TemplatePersistence, TEMPLATES_FILE_NAME};
