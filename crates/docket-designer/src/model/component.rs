//! Component definitions.
//!
//! A component is either a framed box (text, table, image, shapes...), a
//! straight line given by its two endpoints, or a freehand path.

use docket_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::path::PathData;
use super::style::{LockDirection, Style, TextAlign};

pub type ComponentId = String;

/// Default paint order of lines and paths when no z-index is set.
pub const DRAWING_Z_INDEX: i32 = 10;

/// Generates a fresh component or template id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Component discriminant with its persisted type key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Title,
    TextRow,
    RichText,
    VerticalText,
    Table,
    Image,
    QrCode,
    Line,
    Path,
    Rectangle,
    Circle,
    Divider,
    Checkbox,
    DateTime,
    PageNumber,
    Signature,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 16] = [
        ComponentKind::Title,
        ComponentKind::TextRow,
        ComponentKind::RichText,
        ComponentKind::VerticalText,
        ComponentKind::Table,
        ComponentKind::Image,
        ComponentKind::QrCode,
        ComponentKind::Line,
        ComponentKind::Path,
        ComponentKind::Rectangle,
        ComponentKind::Circle,
        ComponentKind::Divider,
        ComponentKind::Checkbox,
        ComponentKind::DateTime,
        ComponentKind::PageNumber,
        ComponentKind::Signature,
    ];

    pub fn type_key(&self) -> &'static str {
        match self {
            ComponentKind::Title => "title",
            ComponentKind::TextRow => "text_row",
            ComponentKind::RichText => "rich_text",
            ComponentKind::VerticalText => "v_text",
            ComponentKind::Table => "table",
            ComponentKind::Image => "image",
            ComponentKind::QrCode => "qr_code",
            ComponentKind::Line => "draw_line",
            ComponentKind::Path => "draw_path",
            ComponentKind::Rectangle => "shape_rect",
            ComponentKind::Circle => "shape_circle",
            ComponentKind::Divider => "divider",
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::DateTime => "datetime",
            ComponentKind::PageNumber => "page_number",
            ComponentKind::Signature => "signature",
        }
    }

    pub fn from_type_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.type_key() == key)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_key())
    }
}

/// Divider direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "v")]
    Vertical,
    #[default]
    #[serde(rename = "h", other)]
    Horizontal,
}

/// Left/center/right texts of a table summary row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub left: String,
    pub center: String,
    pub right: String,
}

/// Table settings. The table height is content derived, so the stored
/// frame height is only an editing hint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProps {
    /// Displayed field ids in column order.
    pub field_ids: Vec<String>,
    /// Stored pixel widths per column, proportional shares at render time.
    pub column_widths: Vec<f64>,
    pub row_height: f64,
    pub data_font_size: f64,
    pub data_align: TextAlign,
    pub empty_rows: u32,
    pub show_summary: bool,
    pub summary: Option<SummaryConfig>,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            field_ids: Vec::new(),
            column_widths: Vec::new(),
            row_height: 36.0,
            data_font_size: 12.0,
            data_align: TextAlign::Left,
            empty_rows: 0,
            show_summary: false,
            summary: None,
        }
    }
}

impl TableProps {
    /// Number of rows used when estimating the table height: header,
    /// one data row, padding rows and the optional summary row.
    pub fn estimated_rows(&self) -> u32 {
        let summary = u32::from(self.show_summary && self.summary.is_some());
        2 + self.empty_rows + summary
    }

    pub fn estimated_height(&self) -> f64 {
        f64::from(self.estimated_rows()) * self.row_height
    }
}

/// Kind specific payload of a framed component.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Title { text: String },
    TextRow { text: String },
    RichText { text: String },
    VerticalText { text: String },
    Table(TableProps),
    Image { src: String },
    QrCode { text: String },
    Rectangle,
    Circle,
    Divider { orientation: Orientation },
    Checkbox { text: String, checked: bool },
    DateTime {
        text: String,
        format: String,
        auto_current: bool,
    },
    PageNumber { format: String },
    Signature { label: String, show_date: bool },
}

/// Box positioned by its top-left corner and size.
#[derive(Debug, Clone, PartialEq)]
pub struct Framed {
    pub frame: Rect,
    pub content: Content,
}

/// Straight line between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    pub lock: LockDirection,
}

impl LineShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            lock: LockDirection::None,
        }
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Framed(Framed),
    Line(LineShape),
    Path(PathData),
}

/// Copy of the position-bearing part of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Frame(Rect),
    Line(Point, Point),
    Path(PathData),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub style: Style,
    pub shape: Shape,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, style: Style, shape: Shape) -> Self {
        Self {
            id: id.into(),
            style,
            shape,
        }
    }

    pub fn framed(id: impl Into<ComponentId>, style: Style, frame: Rect, content: Content) -> Self {
        Self::new(id, style, Shape::Framed(Framed { frame, content }))
    }

    pub fn kind(&self) -> ComponentKind {
        match &self.shape {
            Shape::Line(_) => ComponentKind::Line,
            Shape::Path(_) => ComponentKind::Path,
            Shape::Framed(f) => match &f.content {
                Content::Title { .. } => ComponentKind::Title,
                Content::TextRow { .. } => ComponentKind::TextRow,
                Content::RichText { .. } => ComponentKind::RichText,
                Content::VerticalText { .. } => ComponentKind::VerticalText,
                Content::Table(_) => ComponentKind::Table,
                Content::Image { .. } => ComponentKind::Image,
                Content::QrCode { .. } => ComponentKind::QrCode,
                Content::Rectangle => ComponentKind::Rectangle,
                Content::Circle => ComponentKind::Circle,
                Content::Divider { .. } => ComponentKind::Divider,
                Content::Checkbox { .. } => ComponentKind::Checkbox,
                Content::DateTime { .. } => ComponentKind::DateTime,
                Content::PageNumber { .. } => ComponentKind::PageNumber,
                Content::Signature { .. } => ComponentKind::Signature,
            },
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self.shape, Shape::Line(_))
    }

    pub fn is_path(&self) -> bool {
        matches!(self.shape, Shape::Path(_))
    }

    pub fn is_table(&self) -> bool {
        self.table().is_some()
    }

    pub fn frame(&self) -> Option<&Rect> {
        match &self.shape {
            Shape::Framed(f) => Some(&f.frame),
            _ => None,
        }
    }

    pub fn frame_mut(&mut self) -> Option<&mut Rect> {
        match &mut self.shape {
            Shape::Framed(f) => Some(&mut f.frame),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<&LineShape> {
        match &self.shape {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn line_mut(&mut self) -> Option<&mut LineShape> {
        match &mut self.shape {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn path_mut(&mut self) -> Option<&mut PathData> {
        match &mut self.shape {
            Shape::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&TableProps> {
        match &self.shape {
            Shape::Framed(Framed {
                content: Content::Table(t),
                ..
            }) => Some(t),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&Content> {
        match &self.shape {
            Shape::Framed(f) => Some(&f.content),
            _ => None,
        }
    }

    /// Axis-aligned bounding box. Lines span their endpoints, an empty
    /// path collapses to a zero rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        match &self.shape {
            Shape::Framed(f) => f.frame,
            Shape::Line(l) => Rect::from_corners(l.start, l.end),
            Shape::Path(p) => p.bounds().unwrap_or_default(),
        }
    }

    /// Paint priority, lines and paths default above boxes.
    pub fn z_index(&self) -> i32 {
        let fallback = match self.shape {
            Shape::Framed(_) => 0,
            _ => DRAWING_Z_INDEX,
        };
        self.style.z_index.unwrap_or(fallback)
    }

    pub fn geometry(&self) -> Geometry {
        match &self.shape {
            Shape::Framed(f) => Geometry::Frame(f.frame),
            Shape::Line(l) => Geometry::Line(l.start, l.end),
            Shape::Path(p) => Geometry::Path(p.clone()),
        }
    }

    /// Translates by `(dx, dy)` without rounding.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.shape {
            Shape::Framed(f) => {
                f.frame.x += dx;
                f.frame.y += dy;
            }
            Shape::Line(l) => {
                l.start = l.start.offset(dx, dy);
                l.end = l.end.offset(dx, dy);
            }
            Shape::Path(p) => p.translate(dx, dy),
        }
    }
}
