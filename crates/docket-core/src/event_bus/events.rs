//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Record data refresh events
    Data(DataEvent),
    /// Template management events
    Template(TemplateEvent),
    /// Document rendering and printing
    Print(PrintEvent),
    /// User-visible notices
    Notice(NoticeEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Data(_) => EventCategory::Data,
            AppEvent::Template(_) => EventCategory::Template,
            AppEvent::Print(_) => EventCategory::Print,
            AppEvent::Notice(_) => EventCategory::Notice,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Data(e) => e.description(),
            AppEvent::Template(e) => e.description(),
            AppEvent::Print(e) => e.description(),
            AppEvent::Notice(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Record data events.
    Data,
    /// Template events.
    Template,
    /// Print pipeline events.
    Print,
    /// Notices for the user.
    Notice,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Data => write!(f, "Data"),
            EventCategory::Template => write!(f, "Template"),
            EventCategory::Print => write!(f, "Print"),
            EventCategory::Notice => write!(f, "Notice"),
        }
    }
}

/// Record data events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DataEvent {
    /// A new grouped record set was committed.
    Refreshed {
        /// Number of groups (pages).
        groups: usize,
        /// Number of records across all groups.
        records: usize,
    },
    /// The selection became empty and the record set was cleared.
    Cleared,
    /// The active view changed.
    ViewChanged {
        /// Identifier of the newly active view.
        view_id: String,
    },
    /// A refresh failed; previous data is kept.
    FetchFailed {
        /// Error message describing the failure.
        error: String,
    },
}

impl DataEvent {
    fn description(&self) -> String {
        match self {
            DataEvent::Refreshed { groups, records } => {
                format!("Data refreshed: {} records in {} groups", records, groups)
            }
            DataEvent::Cleared => "Data cleared".to_string(),
            DataEvent::ViewChanged { view_id } => format!("View changed to {}", view_id),
            DataEvent::FetchFailed { error } => format!("Data fetch failed: {}", error),
        }
    }
}

/// Template management events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TemplateEvent {
    /// Workspace switched to another template.
    Switched {
        /// Template id.
        id: String,
        /// Template display name.
        name: String,
    },
    /// Workspace was written back into the current template.
    Saved {
        /// Template id.
        id: String,
    },
    /// A template was created.
    Added {
        /// Template id.
        id: String,
    },
    /// A template was removed.
    Deleted {
        /// Template id.
        id: String,
    },
    /// The template collection was replaced by an import.
    Imported {
        /// Number of imported templates.
        count: usize,
    },
}

impl TemplateEvent {
    fn description(&self) -> String {
        match self {
            TemplateEvent::Switched { id, name } => format!("Switched to template {} ({})", name, id),
            TemplateEvent::Saved { id } => format!("Template {} saved", id),
            TemplateEvent::Added { id } => format!("Template {} added", id),
            TemplateEvent::Deleted { id } => format!("Template {} deleted", id),
            TemplateEvent::Imported { count } => format!("{} templates imported", count),
        }
    }
}

/// Print pipeline events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PrintEvent {
    /// A print document was assembled.
    DocumentBuilt {
        /// Number of pages in the document.
        pages: usize,
        /// Size of the markup in bytes.
        bytes: usize,
    },
    /// The print surface accepted the document.
    Printed {
        /// Name of the surface that printed.
        surface: String,
    },
}

impl PrintEvent {
    fn description(&self) -> String {
        match self {
            PrintEvent::DocumentBuilt { pages, bytes } => {
                format!("Print document built: {} pages, {} bytes", pages, bytes)
            }
            PrintEvent::Printed { surface } => format!("Printed via {}", surface),
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message meant for the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoticeEvent {
    pub level: NoticeLevel,
    pub message: String,
}

impl NoticeEvent {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    fn description(&self) -> String {
        format!("{:?}: {}", self.level, self.message)
    }
}
