//! Canvas type definitions: PointerEvent, PointerTarget, Handle, InteractionMode, Cursor, DrawSettings.

use docket_core::Point;
use serde::{Deserialize, Serialize};

use crate::model::{ComponentId, LineStyle, LockDirection};

/// A pointer event in paper-relative screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    /// Multi-select modifier (Ctrl) held.
    pub modifier: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            modifier: false,
        }
    }

    pub fn with_modifier(mut self) -> Self {
        self.modifier = true;
        self
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    Component(ComponentId),
    Handle(ComponentId, Handle),
}

/// Resize handles. Boxes use the edge and corner handles, lines use the
/// two endpoint handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LineStart,
    LineEnd,
}

impl Handle {
    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::Left | Handle::TopLeft | Handle::BottomLeft)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::Right | Handle::TopRight | Handle::BottomRight)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::Top | Handle::TopLeft | Handle::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::Bottom | Handle::BottomLeft | Handle::BottomRight)
    }

    pub fn is_line_endpoint(&self) -> bool {
        matches!(self, Handle::LineStart | Handle::LineEnd)
    }

    pub fn cursor(&self) -> Cursor {
        match self {
            Handle::Left | Handle::Right => Cursor::EwResize,
            Handle::Top | Handle::Bottom => Cursor::NsResize,
            Handle::TopLeft | Handle::BottomRight => Cursor::NwseResize,
            Handle::TopRight | Handle::BottomLeft => Cursor::NeswResize,
            Handle::LineStart | Handle::LineEnd => Cursor::Crosshair,
        }
    }
}

/// The mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing,
    Drawing,
    Marquee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Crosshair,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

impl Cursor {
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::Crosshair => "crosshair",
            Cursor::EwResize => "ew-resize",
            Cursor::NsResize => "ns-resize",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
        }
    }
}

/// What draw mode produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawKind {
    #[default]
    Line,
    Path,
}

/// Stroke settings applied to newly drawn lines and paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawSettings {
    #[serde(rename = "type")]
    pub kind: DrawKind,
    pub stroke_width: f64,
    pub stroke_color: String,
    pub stroke_style: LineStyle,
    pub lock_direction: LockDirection,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            kind: DrawKind::Line,
            stroke_width: 2.0,
            stroke_color: "#000000".to_string(),
            stroke_style: LineStyle::Solid,
            lock_direction: LockDirection::None,
        }
    }
}
