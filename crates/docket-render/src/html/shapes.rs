//! Vector components: lines, freehand paths, rectangles, circles and
//! dividers.

use docket_core::number_string as num;
use docket_designer::{LineShape, Orientation, PathData, Style};

use crate::variables::escape_html;

const FULL_BLEED_SVG: &str =
    "position:absolute;top:0;left:0;width:100%;height:100%;overflow:visible";
const BOX_SVG: &str = "width:100%;height:100%;display:block;overflow:visible;";

fn stroke_color(style: &Style, default: &str) -> String {
    escape_html(style.stroke_color.as_deref().unwrap_or(default))
}

fn stroke_width(style: &Style) -> String {
    num(style.stroke_width.filter(|w| *w != 0.0).unwrap_or(1.0))
}

pub(crate) fn line(line: &LineShape, style: &Style) -> String {
    format!(
        r#"<svg style="{}"><line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" /></svg>"#,
        FULL_BLEED_SVG,
        num(line.start.x),
        num(line.start.y),
        num(line.end.x),
        num(line.end.y),
        stroke_color(style, "#000000"),
        stroke_width(style),
        style.line_style().dash_array(),
    )
}

pub(crate) fn path(path: &PathData, style: &Style) -> String {
    format!(
        r#"<svg style="{}"><path d="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" fill="none" /></svg>"#,
        FULL_BLEED_SVG,
        path.to_svg(),
        stroke_color(style, "#000000"),
        stroke_width(style),
        style.line_style().dash_array(),
    )
}

fn fill(style: &Style) -> String {
    escape_html(
        style
            .fill_color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("none"),
    )
}

pub(crate) fn rectangle(style: &Style) -> String {
    format!(
        r#"<svg style="{}"><rect x="0" y="0" width="100%" height="100%" rx="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" vector-effect="non-scaling-stroke" /></svg>"#,
        BOX_SVG,
        num(style.border_radius.unwrap_or(0.0)),
        fill(style),
        stroke_color(style, "#000"),
        stroke_width(style),
        style.line_style().dash_array(),
    )
}

pub(crate) fn circle(style: &Style) -> String {
    format!(
        r#"<svg style="{}"><ellipse cx="50%" cy="50%" rx="50%" ry="50%" fill="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" vector-effect="non-scaling-stroke" /></svg>"#,
        BOX_SVG,
        fill(style),
        stroke_color(style, "#000"),
        stroke_width(style),
        style.line_style().dash_array(),
    )
}

pub(crate) fn divider(orientation: Orientation, style: &Style) -> String {
    let (x1, y1, x2, y2) = match orientation {
        Orientation::Vertical => ("50%", "0%", "50%", "100%"),
        Orientation::Horizontal => ("0%", "50%", "100%", "50%"),
    };
    format!(
        r#"<svg style="{}"><line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" /></svg>"#,
        BOX_SVG,
        x1,
        y1,
        x2,
        y2,
        stroke_color(style, "#000"),
        stroke_width(style),
        style.line_style().dash_array(),
    )
}
