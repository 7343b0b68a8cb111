//! # Docket
//!
//! A visual document template designer and grouped-record print renderer.
//!
//! ## Architecture
//!
//! Docket is organized as a workspace with multiple crates:
//!
//! 1. **docket-core** - Geometry, record/field data model, errors, events
//! 2. **docket-designer** - Layout model, canvas interaction engine, templates
//! 3. **docket-render** - Expressions, formulas, variable substitution, HTML pages
//! 4. **docket-datasource** - Data-source bridge, grouping, refresh polling
//! 5. **docket-settings** - Config file, template persistence, backups
//! 6. **docket** - Logging setup, command line jobs and the binary

pub mod job;

pub use docket_core as common;
pub use docket_datasource as datasource;
pub use docket_designer as designer;
pub use docket_render as render;
pub use docket_settings as settings;

pub use job::{check_backup, RenderJob, RenderSummary};

use docket_core::{event_bus, AppEvent, EventCategory, NoticeLevel, SubscriptionId};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date, stamped by the build script.
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Logging output options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Lower the default level to DEBUG.
    pub verbose: bool,
    /// Emit one JSON object per event instead of pretty text.
    pub json: bool,
}

/// Initialize tracing/logging
///
/// `RUST_LOG` directives apply on top of the default level.
pub fn init_logging(options: LogOptions) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if options.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let result = if options.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

/// Mirrors print and notice events from the global bus into the log.
pub fn log_events() -> SubscriptionId {
    event_bus().subscribe(&[EventCategory::Print, EventCategory::Notice], |event| match event {
        AppEvent::Notice(notice)
            if matches!(notice.level, NoticeLevel::Warning | NoticeLevel::Error) =>
        {
            tracing::warn!("{}", notice.message)
        }
        other => tracing::info!("{}", other.description()),
    })
}
