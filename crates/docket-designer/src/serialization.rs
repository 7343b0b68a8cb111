//! Persisted component records.
//!
//! Templates store components as flat JSON objects keyed by `type`, with
//! `x,y,w,h` geometry. For lines `w,h` hold the second endpoint and paths
//! carry their geometry in `d`. In memory the tagged [`Shape`] is used;
//! conversion happens here and only here.

use docket_core::{number_string, DataError, Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::layout::Layout;
use crate::model::{
    Component, ComponentKind, Content, Framed, LineShape, LockDirection, Orientation, PathData,
    Shape, Style, SummaryConfig, TableProps, TextAlign,
};

/// Flat wire form of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_direction: Option<LockDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_current: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_date: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_field_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_summary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_config: Option<SummaryConfig>,
}

fn parse_column_widths(raw: &str) -> Vec<f64> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|w| w.trim().parse::<f64>().unwrap_or(0.0))
        .collect()
}

fn format_column_widths(widths: &[f64]) -> String {
    widths
        .iter()
        .map(|w| number_string(*w))
        .collect::<Vec<_>>()
        .join(",")
}

impl ComponentRecord {
    fn with_frame(component: &Component, frame: Rect) -> Self {
        Self {
            id: component.id.clone(),
            component_type: component.kind().type_key().to_string(),
            x: frame.x,
            y: frame.y,
            w: frame.w,
            h: frame.h,
            style: component.style.clone(),
            ..Default::default()
        }
    }

    pub fn from_component(component: &Component) -> Self {
        match &component.shape {
            Shape::Line(line) => Self {
                lock_direction: Some(line.lock),
                ..Self::with_frame(
                    component,
                    Rect::new(line.start.x, line.start.y, line.end.x, line.end.y),
                )
            },
            Shape::Path(path) => Self {
                d: Some(path.to_svg()),
                ..Self::with_frame(component, Rect::default())
            },
            Shape::Framed(framed) => {
                let mut record = Self::with_frame(component, framed.frame);
                match &framed.content {
                    Content::Title { text }
                    | Content::TextRow { text }
                    | Content::RichText { text }
                    | Content::VerticalText { text }
                    | Content::QrCode { text } => record.content = Some(text.clone()),
                    Content::Image { src } => record.src = Some(src.clone()),
                    Content::Rectangle | Content::Circle => {}
                    Content::Divider { orientation } => record.orientation = Some(*orientation),
                    Content::Checkbox { text, checked } => {
                        record.content = Some(text.clone());
                        record.checked = Some(*checked);
                    }
                    Content::DateTime {
                        text,
                        format,
                        auto_current,
                    } => {
                        record.content = Some(text.clone());
                        record.format = Some(format.clone());
                        record.auto_current = Some(*auto_current);
                    }
                    Content::PageNumber { format } => record.format = Some(format.clone()),
                    Content::Signature { label, show_date } => {
                        record.label = Some(label.clone());
                        record.show_date = Some(*show_date);
                    }
                    Content::Table(table) => {
                        record.selected_field_ids = Some(table.field_ids.clone());
                        record.column_widths = Some(format_column_widths(&table.column_widths));
                        record.empty_rows = Some(table.empty_rows);
                        record.row_height = Some(table.row_height);
                        record.data_align = Some(table.data_align);
                        record.data_font_size = Some(table.data_font_size);
                        record.show_summary = Some(table.show_summary);
                        record.summary_config = table.summary.clone();
                    }
                }
                record
            }
        }
    }

    /// Converts to the in-memory component.
    ///
    /// Unknown types are rejected. Path data that cannot be parsed yields
    /// an empty path and a warning, so the rest of the layout stays usable.
    pub fn into_component(self) -> Result<Component, DataError> {
        let kind = ComponentKind::from_type_key(&self.component_type).ok_or_else(|| {
            DataError::InvalidComponent {
                id: self.id.clone(),
                reason: format!("unknown component type '{}'", self.component_type),
            }
        })?;
        if self.id.is_empty() {
            return Err(DataError::InvalidComponent {
                id: String::new(),
                reason: "missing id".to_string(),
            });
        }

        let text = || self.content.clone().unwrap_or_default();
        let shape = match kind {
            ComponentKind::Line => Shape::Line(LineShape {
                start: Point::new(self.x, self.y),
                end: Point::new(self.w, self.h),
                lock: self.lock_direction.unwrap_or_default(),
            }),
            ComponentKind::Path => {
                let raw = self.d.clone().unwrap_or_default();
                let path = PathData::parse(&raw).unwrap_or_else(|e| {
                    tracing::warn!("Component {}: dropping malformed path data: {}", self.id, e);
                    PathData::default()
                });
                Shape::Path(path)
            }
            _ => {
                let content = match kind {
                    ComponentKind::Title => Content::Title { text: text() },
                    ComponentKind::TextRow => Content::TextRow { text: text() },
                    ComponentKind::RichText => Content::RichText { text: text() },
                    ComponentKind::VerticalText => Content::VerticalText { text: text() },
                    ComponentKind::QrCode => Content::QrCode { text: text() },
                    ComponentKind::Image => Content::Image {
                        src: self.src.clone().unwrap_or_default(),
                    },
                    ComponentKind::Rectangle => Content::Rectangle,
                    ComponentKind::Circle => Content::Circle,
                    ComponentKind::Divider => Content::Divider {
                        orientation: self.orientation.unwrap_or_default(),
                    },
                    ComponentKind::Checkbox => Content::Checkbox {
                        text: text(),
                        checked: self.checked.unwrap_or(false),
                    },
                    ComponentKind::DateTime => Content::DateTime {
                        text: text(),
                        format: self
                            .format
                            .clone()
                            .unwrap_or_else(|| "YYYY-MM-DD".to_string()),
                        auto_current: self.auto_current.unwrap_or(false),
                    },
                    ComponentKind::PageNumber => Content::PageNumber {
                        format: self
                            .format
                            .clone()
                            .unwrap_or_else(|| "第 {{page}} 页".to_string()),
                    },
                    ComponentKind::Signature => Content::Signature {
                        label: self.label.clone().unwrap_or_default(),
                        show_date: self.show_date.unwrap_or(false),
                    },
                    _ => {
                        let defaults = TableProps::default();
                        Content::Table(TableProps {
                            field_ids: self.selected_field_ids.clone().unwrap_or_default(),
                            column_widths: self
                                .column_widths
                                .as_deref()
                                .map(parse_column_widths)
                                .unwrap_or_default(),
                            row_height: self.row_height.unwrap_or(defaults.row_height),
                            data_font_size: self
                                .data_font_size
                                .unwrap_or(defaults.data_font_size),
                            data_align: self.data_align.unwrap_or_default(),
                            empty_rows: self.empty_rows.unwrap_or(0),
                            show_summary: self.show_summary.unwrap_or(false),
                            summary: self.summary_config.clone(),
                        })
                    }
                };
                Shape::Framed(Framed {
                    frame: Rect::new(self.x, self.y, self.w, self.h),
                    content,
                })
            }
        };

        Ok(Component::new(self.id, self.style, shape))
    }
}

impl From<Layout> for Vec<ComponentRecord> {
    fn from(layout: Layout) -> Self {
        layout.iter().map(ComponentRecord::from_component).collect()
    }
}

impl From<Vec<Value>> for Layout {
    /// Builds a layout from raw records, skipping the ones that do not
    /// describe a valid component.
    fn from(records: Vec<Value>) -> Self {
        let components = records
            .into_iter()
            .filter_map(|raw| {
                let record: ComponentRecord = match serde_json::from_value(raw) {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::warn!("Skipping unreadable component record: {}", e);
                        return None;
                    }
                };
                match record.into_component() {
                    Ok(component) => Some(component),
                    Err(e) => {
                        tracing::warn!("Skipping component: {}", e);
                        None
                    }
                }
            })
            .collect();
        Layout::from_components(components)
    }
}
