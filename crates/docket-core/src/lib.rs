//! # Docket Core
//!
//! Core types and utilities shared by every Docket crate.
//! Provides plane geometry, the record/field data model handed over by
//! external data sources, cell formatting, the error taxonomy and the
//! application event bus.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod format;
pub mod geometry;

pub use data::{Field, FieldCatalog, GroupKey, RecordFields, RecordGroup};

pub use error::{DataError, Error, Result, TemplateError};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, DataEvent, EventBus, EventCategory, NoticeEvent, NoticeLevel,
    PrintEvent, SubscriptionId, TemplateEvent,
};

pub use format::{cell_text, number_string};
pub use geometry::{distance, line_intersection, parse_leading_float, safe_float, Point, Rect};
