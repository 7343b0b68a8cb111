//! # Docket Render
//!
//! From template to printable markup:
//!
//! - [`expression`]: four-operator arithmetic evaluator;
//! - [`formula`]: calculation formulas over a data group, producing a
//!   [`VariableTable`];
//! - [`variables`]: placeholder substitution in template text;
//! - [`format`]: decimal formats and Chinese financial amounts;
//! - [`html`]: per-kind component markup;
//! - [`page`]: pagination and the print document;
//! - [`print`]: print surfaces.
//!
//! ```
//! use docket_core::{FieldCatalog, RecordGroup};
//! use docket_designer::{create_component, ComponentKind, GlobalSettings, Layout};
//! use docket_render::Renderer;
//!
//! let layout = Layout::from_components(create_component(ComponentKind::Title).into_iter().collect());
//! let groups = vec![RecordGroup::default(), RecordGroup::default()];
//! let doc = Renderer::default().build_document(
//!     &GlobalSettings::default(),
//!     &layout,
//!     &FieldCatalog::default(),
//!     &groups,
//! );
//! assert_eq!(doc.page_count, 2);
//! ```

pub mod clock;
pub mod error;
pub mod expression;
pub mod format;
pub mod formula;
pub mod html;
pub mod page;
pub mod print;
pub mod variables;

pub use clock::{format_timestamp, Clock, FixedClock, SystemClock};
pub use error::{RenderError, Result};
pub use expression::{evaluate, try_evaluate, ExpressionError};
pub use format::{chinese_amount, number_config, NumberFormat, RoundMode};
pub use formula::{calculate_variables, Formula, FormulaKind, FormulaSet, Variable, VariableTable};
pub use html::{
    encode_uri_component, page_number_text, PageContext, RenderOptions, Renderer,
    DEFAULT_QR_ENDPOINT,
};
pub use page::{placement_style, print_styles, PrintDocument};
pub use print::{print_document, HtmlFileSurface, PrintSurface};
pub use variables::{escape_html, VariableResolver};
