//! In-process data source backed by a JSON record dump.
//!
//! Used by the command line renderer and by tests that need to drive the
//! refresh path without a host.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docket_core::Field;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataSourceError, Result};
use crate::source::{DataSource, Record, Selection, TableInfo};

const DEFAULT_TABLE_ID: &str = "tbl";
const DEFAULT_VIEW_ID: &str = "view";

/// On-disk shape of an exported table: fields plus records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordDump {
    pub table_id: Option<String>,
    pub table_name: Option<String>,
    pub view_id: Option<String>,
    pub fields: Vec<Field>,
    pub records: Vec<Record>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    info: Option<TableInfo>,
    fields: Vec<Field>,
    records: Vec<Record>,
    /// Selected record ids keyed by view id.
    selected: HashMap<String, Vec<String>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: Vec<MemoryTable>,
    selection: Option<Selection>,
    failure: Option<String>,
}

impl MemoryState {
    fn table(&self, table_id: &str) -> Result<&MemoryTable> {
        self.tables
            .iter()
            .find(|t| t.info.as_ref().is_some_and(|i| i.id == table_id))
            .ok_or_else(|| DataSourceError::TableNotFound {
                table_id: table_id.to_string(),
            })
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(reason) => Err(DataSourceError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Thread-safe in-memory [`DataSource`].
#[derive(Debug, Default)]
pub struct MemorySource {
    state: RwLock<MemoryState>,
    record_fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with one table holding the dump, every record selected.
    pub fn from_dump(dump: RecordDump) -> Self {
        let table_id = dump.table_id.unwrap_or_else(|| DEFAULT_TABLE_ID.to_string());
        let view_id = dump.view_id.unwrap_or_else(|| DEFAULT_VIEW_ID.to_string());
        let name = dump.table_name.unwrap_or_else(|| table_id.clone());
        let ids: Vec<String> = dump.records.iter().map(|r| r.id.clone()).collect();

        let source = Self::new();
        source.add_table(TableInfo::new(&table_id, name), dump.fields, dump.records);
        source.select(&table_id, &view_id, ids);
        source
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let dump: RecordDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(dump))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Adds a table, replacing an existing one with the same id.
    pub fn add_table(&self, info: TableInfo, fields: Vec<Field>, records: Vec<Record>) {
        let mut state = self.state.write();
        state
            .tables
            .retain(|t| t.info.as_ref().map(|i| i.id.as_str()) != Some(info.id.as_str()));
        state.tables.push(MemoryTable {
            info: Some(info),
            fields,
            records,
            selected: HashMap::new(),
        });
    }

    /// Makes `view_id` of `table_id` the active selection with the given
    /// records selected.
    pub fn select(&self, table_id: &str, view_id: &str, record_ids: Vec<String>) {
        let mut state = self.state.write();
        if let Some(table) = state
            .tables
            .iter_mut()
            .find(|t| t.info.as_ref().is_some_and(|i| i.id == table_id))
        {
            table.selected.insert(view_id.to_string(), record_ids);
        }
        state.selection = Some(Selection::new(table_id, view_id));
    }

    pub fn clear_selection(&self) {
        self.state.write().selection = None;
    }

    /// While set, every call fails with [`DataSourceError::Unavailable`].
    pub fn set_failure(&self, reason: Option<&str>) {
        self.state.write().failure = reason.map(str::to_string);
    }

    /// Number of successful single-record fetches so far.
    pub fn record_fetches(&self) -> usize {
        self.record_fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn tables(&self) -> Result<Vec<TableInfo>> {
        let state = self.state.read();
        state.check()?;
        Ok(state.tables.iter().filter_map(|t| t.info.clone()).collect())
    }

    async fn selection(&self) -> Result<Option<Selection>> {
        let state = self.state.read();
        state.check()?;
        Ok(state.selection.clone())
    }

    async fn fields(&self, table_id: &str) -> Result<Vec<Field>> {
        let state = self.state.read();
        state.check()?;
        Ok(state.table(table_id)?.fields.clone())
    }

    async fn selected_record_ids(&self, table_id: &str, view_id: &str) -> Result<Vec<String>> {
        let state = self.state.read();
        state.check()?;
        Ok(state
            .table(table_id)?
            .selected
            .get(view_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record(&self, table_id: &str, record_id: &str) -> Result<Record> {
        let state = self.state.read();
        state.check()?;
        let record = state
            .table(table_id)?
            .records
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| DataSourceError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;
        self.record_fetches.fetch_add(1, Ordering::Relaxed);
        debug!(table_id, record_id, "Fetched record");
        Ok(record)
    }
}
