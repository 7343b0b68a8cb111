//! The read-only data-source collaborator.

use async_trait::async_trait;
use docket_core::{Field, RecordFields};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A table offered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub id: String,
    pub name: String,
}

impl TableInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The table and view the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub table_id: String,
    pub view_id: String,
}

impl Selection {
    pub fn new(table_id: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            view_id: view_id.into(),
        }
    }
}

/// A record as fetched by id: field id to raw cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "recordId", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub fields: RecordFields,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Host bridge enumerating tables, fields and the selected records.
///
/// Every call may suspend. Implementations report failures as errors;
/// callers log them and keep whatever data they already had.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// All tables of the base.
    async fn tables(&self) -> Result<Vec<TableInfo>>;

    /// Current selection, `None` when no table is active.
    async fn selection(&self) -> Result<Option<Selection>>;

    /// Field metadata of a table in display order.
    async fn fields(&self, table_id: &str) -> Result<Vec<Field>>;

    /// Ids of the records selected in a view, in selection order.
    async fn selected_record_ids(&self, table_id: &str, view_id: &str) -> Result<Vec<String>>;

    /// One record's field map.
    async fn record(&self, table_id: &str, record_id: &str) -> Result<Record>;
}
