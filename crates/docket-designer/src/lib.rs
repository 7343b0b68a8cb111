//! # Docket Designer
//!
//! Layout model and interactive editing for Docket print templates.
//!
//! ## Core Components
//!
//! ### Layout Model
//! - **Components**: framed boxes (text, tables, images, shapes), straight
//!   lines and freehand paths
//! - **Layout**: the ordered component list plus whole-layout operations
//!   (move, scale, center)
//! - **Serialization**: the flat persisted component record
//!
//! ### Interaction
//! - **Canvas**: pointer-driven select, drag, resize, draw and marquee
//! - **Snapping**: alignment guides and line intersection snap-lock
//! - **Selection**: ordered multi-selection with a primary component
//!
//! ### Application State
//! - **Templates**: component catalog defaults and the named template store
//! - **DesignerState**: action dispatch returning follow-up effects
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (dispatch(Action) -> Vec<Effect>)
//!   ├── TemplateStore (saved templates, current id)
//!   ├── GlobalSettings (paper, formulas, grouping, scale, lock)
//!   └── Canvas (session state machine)
//!         ├── Layout (components)
//!         ├── SelectionManager
//!         └── Snap (alignment, intersections)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use docket_designer::{Action, CatalogItem, ComponentKind, DesignerState};
//!
//! let mut state = DesignerState::default();
//! state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Table)));
//! assert_eq!(state.canvas().layout().len(), 1);
//! ```

pub mod canvas;
pub mod global_settings;
pub mod layout;
pub mod model;
pub mod selection_manager;
pub mod serialization;
pub mod snap;
pub mod template_store;
pub mod templates;

// Integration modules
pub mod designer_state;

pub use canvas::{
    resize_frame, Canvas, Cursor, DrawKind, DrawSettings, Handle, InteractionMode, PointerEvent,
    PointerTarget, MIN_COMPONENT_SIZE,
};
pub use global_settings::{GlobalSettings, Paper};
pub use layout::{next_structure_scale, Axis, GlobalOpsConfig, Layout};
pub use model::*;
pub use selection_manager::SelectionManager;
pub use serialization::ComponentRecord;
pub use snap::{
    snap_line_endpoint, snap_to_alignment, AlignmentTargets, Guide, GuideKind, Guides, LineSnap,
    SnapConfig,
};
pub use template_store::{
    LinkedView, Template, TemplateStore, DEFAULT_TEMPLATE_NAME, NEW_TEMPLATE_NAME,
};
pub use templates::{create_component, CatalogItem, CATALOG};

// State and integration
pub use designer_state::{Action, ActiveView, DesignerState, Effect, SideTab};
