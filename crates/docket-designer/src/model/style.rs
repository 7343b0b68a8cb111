//! Visual style attached to every component.

use serde::{Deserialize, Serialize};

/// Stroke dash pattern by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Dashed,
    Dotted,
    DashDot,
    DashDotDot,
    LongDash,
    SparseDot,
    /// Also used for unknown names.
    #[default]
    #[serde(other)]
    Solid,
}

impl LineStyle {
    pub const ALL: [LineStyle; 7] = [
        LineStyle::Solid,
        LineStyle::Dashed,
        LineStyle::Dotted,
        LineStyle::DashDot,
        LineStyle::DashDotDot,
        LineStyle::LongDash,
        LineStyle::SparseDot,
    ];

    /// Value for the SVG `stroke-dasharray` attribute.
    pub fn dash_array(&self) -> &'static str {
        match self {
            LineStyle::Solid => "none",
            LineStyle::Dashed => "5,5",
            LineStyle::Dotted => "2,2",
            LineStyle::DashDot => "10,5,2,5",
            LineStyle::DashDotDot => "15,3,3,3,3,3",
            LineStyle::LongDash => "20, 5",
            LineStyle::SparseDot => "2, 8",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Center,
    Right,
    #[default]
    #[serde(other)]
    Left,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    /// Matching `justify-content` value for flex containers.
    pub fn flex_justify(&self) -> &'static str {
        match self {
            TextAlign::Left => "flex-start",
            TextAlign::Center => "center",
            TextAlign::Right => "flex-end",
        }
    }
}

/// Axis constraint for line endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockDirection {
    /// Both endpoints share the same y.
    #[serde(rename = "h")]
    Horizontal,
    /// Both endpoints share the same x.
    #[serde(rename = "v")]
    Vertical,
    #[default]
    #[serde(rename = "none", other)]
    None,
}

/// Style record. Every attribute is optional; renderers apply their own
/// defaults for missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl Style {
    /// Common style of text components.
    pub fn text() -> Self {
        Self {
            font_size: Some(14.0),
            font_weight: Some("normal".to_string()),
            text_align: Some(TextAlign::Left),
            color: Some("#000000".to_string()),
            line_height: Some(1.4),
            white_space: Some("pre-wrap".to_string()),
            background_color: Some("transparent".to_string()),
            border_width: Some(0.0),
            border_style: Some("none".to_string()),
            border_color: Some("#000000".to_string()),
            border_radius: Some(0.0),
            padding: Some(0.0),
            z_index: Some(2),
            ..Default::default()
        }
    }

    /// Common style of outlined shapes.
    pub fn stroke(width: f64, color: &str, style: LineStyle) -> Self {
        Self {
            stroke_width: Some(width),
            stroke_color: Some(color.to_string()),
            stroke_style: Some(style),
            z_index: Some(0),
            ..Default::default()
        }
    }

    pub fn line_style(&self) -> LineStyle {
        self.stroke_style.unwrap_or_default()
    }

    /// Scales the typographic and stroke sizes by `ratio`.
    pub fn scale(&mut self, ratio: f64) {
        if let Some(size) = self.font_size.as_mut() {
            *size *= ratio;
        }
        if let Some(width) = self.stroke_width.as_mut() {
            *width *= ratio;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_arrays() {
        assert_eq!(LineStyle::Solid.dash_array(), "none");
        assert_eq!(LineStyle::DashDot.dash_array(), "10,5,2,5");
        assert_eq!(LineStyle::SparseDot.dash_array(), "2, 8");
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let style: LineStyle = serde_json::from_str("\"wavy\"").expect("falls back");
        assert_eq!(style, LineStyle::Solid);
        let lock: LockDirection = serde_json::from_str("\"h\"").expect("parses");
        assert_eq!(lock, LockDirection::Horizontal);
        let lock: LockDirection = serde_json::from_str("\"diagonal\"").expect("falls back");
        assert_eq!(lock, LockDirection::None);
        let align: TextAlign = serde_json::from_str("\"justify\"").expect("falls back");
        assert_eq!(align, TextAlign::Left);
        let align: TextAlign = serde_json::from_str("\"right\"").expect("parses");
        assert_eq!(align, TextAlign::Right);
        let style: LineStyle = serde_json::from_str("\"dash-dot-dot\"").expect("parses");
        assert_eq!(style, LineStyle::DashDotDot);
        assert_eq!(
            serde_json::to_string(&LineStyle::Solid).expect("serializes"),
            "\"solid\""
        );
    }

    #[test]
    fn test_style_round_trip_keeps_camel_case() {
        let style = Style::text();
        let json = serde_json::to_value(&style).expect("serializes");
        assert_eq!(json["fontSize"], 14.0);
        assert_eq!(json["zIndex"], 2);
        assert!(json.get("strokeWidth").is_none());
    }

    #[test]
    fn test_scale() {
        let mut style = Style::stroke(2.0, "#000", LineStyle::Dashed);
        style.font_size = Some(12.0);
        style.scale(1.5);
        assert_eq!(style.stroke_width, Some(3.0));
        assert_eq!(style.font_size, Some(18.0));
    }
}
