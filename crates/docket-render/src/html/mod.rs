//! # Component Renderer
//!
//! Turns one component into an HTML fragment for one page. Dispatch is
//! purely on the component kind; the only shared input is the style
//! record. Rendering never fails: missing data yields empty text.

mod shapes;
mod table;
mod text;

use std::sync::Arc;

use docket_core::{FieldCatalog, RecordGroup};
use docket_designer::{Component, Content, Shape};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::formula::{FormulaSet, VariableTable};
use crate::variables::{escape_html, VariableResolver};

use table::TableRows;

pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=";
/// Payload encoded when a QR code resolves to nothing.
pub const DEFAULT_QR_PAYLOAD: &str = "123456";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// URL prefix of the QR image service; the encoded payload is appended.
    pub qr_endpoint: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
        }
    }
}

/// Everything page specific a component needs.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub catalog: &'a FieldCatalog,
    pub group: Option<&'a RecordGroup>,
    pub variables: VariableTable,
    /// Tables show placeholder rows instead of data.
    pub edit_mode: bool,
    pub page_index: usize,
    pub total_pages: usize,
}

impl<'a> PageContext<'a> {
    /// Printed page `page_index` of `total_pages`, with variables computed
    /// from `formulas` for `group`.
    pub fn print(
        catalog: &'a FieldCatalog,
        formulas: &FormulaSet,
        group: &'a RecordGroup,
        page_index: usize,
        total_pages: usize,
    ) -> Self {
        Self {
            catalog,
            group: Some(group),
            variables: formulas.calculate(catalog, group),
            edit_mode: false,
            page_index,
            total_pages,
        }
    }

    /// The editing canvas, optionally previewing a group's values.
    pub fn editing(
        catalog: &'a FieldCatalog,
        formulas: &FormulaSet,
        group: Option<&'a RecordGroup>,
    ) -> Self {
        Self {
            catalog,
            group,
            variables: group
                .map(|g| formulas.calculate(catalog, g))
                .unwrap_or_default(),
            edit_mode: true,
            page_index: 0,
            total_pages: 1,
        }
    }

    pub fn resolver(&self) -> VariableResolver<'_> {
        VariableResolver::new(&self.variables, self.catalog, self.group)
    }
}

/// Characters left as-is in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a value for use as a single URL query component.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Replaces `{{page}}` and `{{total}}`, case-insensitive and tolerant of
/// inner whitespace. No other substitution is applied.
pub fn page_number_text(format: &str, page_index: usize, total_pages: usize) -> String {
    use std::sync::OnceLock;

    use regex::Regex;

    static PAGE: OnceLock<Regex> = OnceLock::new();
    static TOTAL: OnceLock<Regex> = OnceLock::new();
    let page = PAGE.get_or_init(|| Regex::new(r"(?i)\{\{\s*page\s*\}\}").expect("invalid regex pattern"));
    let total =
        TOTAL.get_or_init(|| Regex::new(r"(?i)\{\{\s*total\s*\}\}").expect("invalid regex pattern"));

    let text = page.replace_all(format, (page_index + 1).to_string().as_str());
    total
        .replace_all(&text, total_pages.to_string().as_str())
        .into_owned()
}

/// Renders components to markup.
#[derive(Clone)]
pub struct Renderer {
    options: RenderOptions,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source used by date/time components.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Inner markup of `component` for `page`.
    pub fn render_component(&self, component: &Component, page: &PageContext<'_>) -> String {
        let style = &component.style;
        let framed = match &component.shape {
            Shape::Line(line) => return shapes::line(line, style),
            Shape::Path(path) => return shapes::path(path, style),
            Shape::Framed(framed) => framed,
        };

        let resolver = page.resolver();
        match &framed.content {
            Content::Rectangle => shapes::rectangle(style),
            Content::Circle => shapes::circle(style),
            Content::Divider { orientation } => shapes::divider(*orientation, style),
            Content::QrCode { text } => {
                let payload = resolver.resolve(text);
                let payload = if payload.is_empty() {
                    DEFAULT_QR_PAYLOAD.to_string()
                } else {
                    payload
                };
                format!(
                    r#"<img src="{}{}" style="width:100%;height:100%;display:block;"/>"#,
                    escape_html(&self.options.qr_endpoint),
                    encode_uri_component(&payload)
                )
            }
            Content::Image { src } => format!(
                r#"<img src="{}" style="width:100%; height:100%; object-fit: {}; display:block;" />"#,
                escape_html(src),
                escape_html(style.object_fit.as_deref().unwrap_or("contain"))
            ),
            Content::Title { text } => text::title(style, &resolver.resolve(text)),
            Content::TextRow { text } | Content::RichText { text } => {
                text::block(style, &resolver.resolve(text))
            }
            Content::VerticalText { text } => text::vertical(style, &resolver.resolve(text)),
            Content::DateTime {
                text,
                format,
                auto_current,
            } => {
                let resolved = if *auto_current {
                    String::new()
                } else {
                    resolver.resolve(text)
                };
                let shown = text::date_time_text(resolved, format, *auto_current, self.clock.now());
                text::centered_row(style, &shown)
            }
            Content::PageNumber { format } => {
                let format = if format.is_empty() {
                    "第 {{page}} 页"
                } else {
                    format.as_str()
                };
                let shown = page_number_text(format, page.page_index, page.total_pages);
                text::centered_row(style, &escape_html(&shown))
            }
            Content::Signature { label, show_date } => {
                text::signature(style, &resolver.resolve(label), *show_date)
            }
            Content::Checkbox { text, checked } => {
                text::checkbox(style, *checked, &resolver.resolve(text))
            }
            Content::Table(props) => {
                let rows = match (page.edit_mode, page.group) {
                    (true, _) => TableRows::Placeholder,
                    (false, Some(group)) => TableRows::Records(&group.records),
                    (false, None) => TableRows::Records(&[]),
                };
                table::table(props, page.catalog, rows, &resolver)
            }
        }
    }
}
