//! Refresh controller: pulls the current selection from a [`DataSource`]
//! and commits a grouped record set.
//!
//! Overlapping refreshes are dropped, not queued. Staleness is detected by
//! comparing the last seen view id and record-id list; a refresh that sees
//! nothing new returns without fetching records. Failures are logged and
//! leave the previous snapshot in place.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use docket_core::{event_bus, AppEvent, DataEvent, FieldCatalog, RecordGroup};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::grouping::group_records;
use crate::source::{DataSource, TableInfo};

/// Latest committed data.
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub tables: Vec<TableInfo>,
    pub table_id: Option<String>,
    pub view_id: Option<String>,
    pub fields: FieldCatalog,
    pub groups: Vec<RecordGroup>,
}

impl DataSnapshot {
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

/// What a refresh call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Another refresh was in flight; this one was dropped.
    Busy,
    /// Selection unchanged since the last commit.
    Unchanged,
    /// Nothing selected; the record set was emptied.
    Cleared,
    /// A new record set was committed.
    Updated { groups: usize, records: usize },
    /// The source failed; the previous snapshot is kept.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub status: RefreshStatus,
    /// Set when this refresh noticed a switch to another view.
    pub view_changed: Option<String>,
}

impl RefreshReport {
    fn new(status: RefreshStatus) -> Self {
        Self {
            status,
            view_changed: None,
        }
    }
}

#[derive(Debug, Default)]
struct Cursor {
    last_view_id: Option<String>,
    last_record_ids: Vec<String>,
}

/// Resets the in-flight flag when the refresh ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Refresher {
    source: Arc<dyn DataSource>,
    in_flight: AtomicBool,
    cursor: Mutex<Cursor>,
    grouping_field_ids: RwLock<Vec<String>>,
    snapshot: Arc<RwLock<DataSnapshot>>,
}

impl std::fmt::Debug for Refresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher")
            .field("in_flight", &self.in_flight)
            .field("cursor", &self.cursor)
            .field("grouping_field_ids", &self.grouping_field_ids)
            .finish_non_exhaustive()
    }
}

impl Refresher {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            in_flight: AtomicBool::new(false),
            cursor: Mutex::new(Cursor::default()),
            grouping_field_ids: RwLock::new(Vec::new()),
            snapshot: Arc::new(RwLock::new(DataSnapshot::default())),
        }
    }

    pub fn with_grouping(self, grouping_field_ids: Vec<String>) -> Self {
        *self.grouping_field_ids.write() = grouping_field_ids;
        self
    }

    /// Shared handle to the committed data, for readers on other tasks.
    pub fn shared_snapshot(&self) -> Arc<RwLock<DataSnapshot>> {
        Arc::clone(&self.snapshot)
    }

    pub fn snapshot(&self) -> DataSnapshot {
        self.snapshot.read().clone()
    }

    pub fn groups(&self) -> Vec<RecordGroup> {
        self.snapshot.read().groups.clone()
    }

    pub fn fields(&self) -> FieldCatalog {
        self.snapshot.read().fields.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Loads the table list, then performs a forced refresh. The first
    /// refresh always reports the active view as changed.
    pub async fn initialize(&self) -> RefreshReport {
        match self.source.tables().await {
            Ok(tables) => {
                info!(count = tables.len(), "Loaded table list");
                self.snapshot.write().tables = tables;
            }
            Err(e) => warn!(error = %e, "Failed to load table list"),
        }
        self.refresh(true).await
    }

    /// Replaces the grouping fields and regroups from fresh data.
    pub async fn set_grouping(&self, grouping_field_ids: Vec<String>) -> RefreshReport {
        *self.grouping_field_ids.write() = grouping_field_ids;
        self.refresh(true).await
    }

    /// Pulls the current selection and commits it when it changed or
    /// `force` is set.
    pub async fn refresh(&self, force: bool) -> RefreshReport {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Refresh already in flight, dropping request");
            return RefreshReport::new(RefreshStatus::Busy);
        };

        let mut view_changed = None;
        let status = match self.load(force, &mut view_changed).await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Failed to load data");
                event_bus().publish(AppEvent::Data(DataEvent::FetchFailed {
                    error: e.to_string(),
                }));
                RefreshStatus::Failed
            }
        };
        RefreshReport {
            status,
            view_changed,
        }
    }

    async fn load(&self, mut force: bool, view_changed: &mut Option<String>) -> Result<RefreshStatus> {
        let Some(selection) = self.source.selection().await? else {
            debug!("No active table");
            return Ok(self.clear());
        };

        {
            let mut snapshot = self.snapshot.write();
            snapshot.table_id = Some(selection.table_id.clone());
            snapshot.view_id = Some(selection.view_id.clone());
        }

        let switched = {
            let mut cursor = self.cursor.lock();
            if cursor.last_view_id.as_deref() == Some(selection.view_id.as_str()) {
                false
            } else {
                cursor.last_view_id = Some(selection.view_id.clone());
                true
            }
        };
        if switched {
            info!(view_id = %selection.view_id, "Active view changed");
            *view_changed = Some(selection.view_id.clone());
            event_bus().publish(AppEvent::Data(DataEvent::ViewChanged {
                view_id: selection.view_id.clone(),
            }));
            let fields = self.source.fields(&selection.table_id).await?;
            debug!(count = fields.len(), "Reloaded field metadata");
            self.snapshot.write().fields = FieldCatalog::new(fields);
            force = true;
        }

        let ids = self
            .source
            .selected_record_ids(&selection.table_id, &selection.view_id)
            .await?;
        if !force && self.cursor.lock().last_record_ids == ids {
            return Ok(RefreshStatus::Unchanged);
        }

        if ids.is_empty() {
            self.cursor.lock().last_record_ids.clear();
            return Ok(self.clear());
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            records.push(self.source.record(&selection.table_id, id).await?.fields);
        }

        let catalog = self.fields();
        let grouping = self.grouping_field_ids.read().clone();
        let groups = group_records(records, &catalog, &grouping);
        let group_count = groups.len();
        let record_count = ids.len();

        self.snapshot.write().groups = groups;
        self.cursor.lock().last_record_ids = ids;

        info!(
            groups = group_count,
            records = record_count,
            "Committed record set"
        );
        event_bus().publish(AppEvent::Data(DataEvent::Refreshed {
            groups: group_count,
            records: record_count,
        }));
        Ok(RefreshStatus::Updated {
            groups: group_count,
            records: record_count,
        })
    }

    fn clear(&self) -> RefreshStatus {
        let had_data = {
            let mut snapshot = self.snapshot.write();
            let had = !snapshot.groups.is_empty();
            snapshot.groups.clear();
            had
        };
        if had_data {
            event_bus().publish(AppEvent::Data(DataEvent::Cleared));
        }
        RefreshStatus::Cleared
    }
}
