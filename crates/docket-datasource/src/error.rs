//! Error types for data-source access.

use thiserror::Error;

/// Failure reported by a data source or while loading a record dump.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Table id is unknown to the source
    #[error("Table not found: {table_id}")]
    TableNotFound {
        /// The table id that was looked up.
        table_id: String,
    },

    /// Record id is unknown within its table
    #[error("Record not found: {record_id}")]
    RecordNotFound {
        /// The record id that was looked up.
        record_id: String,
    },

    /// The source could not be reached
    #[error("Data source unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },

    /// Record dump could not be parsed
    #[error("Invalid record dump: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataSourceError>;
