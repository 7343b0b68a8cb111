//! # Docket Data Source
//!
//! Bridge to the host that owns the records. Defines the [`DataSource`]
//! collaborator, groups fetched records into pages, and keeps a snapshot
//! fresh through a [`Refresher`] driven by polling or push notification.
//!
//! ```no_run
//! use std::sync::Arc;
//! use docket_datasource::{spawn_refresh_loop, MemorySource, PollingSource, Refresher};
//!
//! # async fn run() -> docket_datasource::Result<()> {
//! let source = Arc::new(MemorySource::load("records.json")?);
//! let refresher = Arc::new(Refresher::new(source));
//! refresher.initialize().await;
//! let handle = spawn_refresh_loop(refresher.clone(), PollingSource::new(docket_datasource::DEFAULT_POLL_INTERVAL));
//! # handle.abort();
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod error;
pub mod grouping;
pub mod memory;
pub mod refresh;
pub mod source;

pub use change::{
    run_refresh_loop, spawn_refresh_loop, ChangeSource, ChannelSource, PollingSource,
    RefreshRequest, RefreshTrigger, DEFAULT_POLL_INTERVAL,
};
pub use error::{DataSourceError, Result};
pub use grouping::{group_records, EMPTY_GROUP_VALUE};
pub use memory::{MemorySource, RecordDump};
pub use refresh::{DataSnapshot, RefreshReport, RefreshStatus, Refresher};
pub use source::{DataSource, Record, Selection, TableInfo};
