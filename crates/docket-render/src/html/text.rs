//! Text-bearing components.

use docket_core::number_string as num;
use docket_designer::{Style, TextAlign};

use crate::clock::format_timestamp;
use crate::variables::escape_html;

/// Inline style shared by every text component.
pub(crate) fn base_style(style: &Style) -> String {
    let mut css = format!(
        "font-size: {}px; font-weight: {}; text-align: {}; color: {}; line-height: {}; white-space: {}; width: 100%; height: 100%; overflow: hidden; box-sizing: border-box;",
        num(style.font_size.filter(|s| *s != 0.0).unwrap_or(12.0)),
        escape_html(non_empty(&style.font_weight).unwrap_or("normal")),
        style.text_align.unwrap_or_default().as_css(),
        escape_html(non_empty(&style.color).unwrap_or("#000")),
        num(style.line_height.filter(|h| *h != 0.0).unwrap_or(1.4)),
        escape_html(non_empty(&style.white_space).unwrap_or("normal")),
    );

    if let Some(bg) = non_empty(&style.background_color) {
        css.push_str(&format!(" background-color: {};", escape_html(bg)));
    }
    let border_width = style.border_width.unwrap_or(0.0);
    if let Some(border_style) = non_empty(&style.border_style).filter(|s| *s != "none") {
        if border_width != 0.0 {
            css.push_str(&format!(
                " border: {}px {} {};",
                num(border_width),
                escape_html(border_style),
                escape_html(non_empty(&style.border_color).unwrap_or("#000"))
            ));
            if let Some(radius) = style.border_radius.filter(|r| *r != 0.0) {
                css.push_str(&format!(" border-radius: {}px;", num(radius)));
            }
        }
    }
    if let Some(padding) = style.padding.filter(|p| *p != 0.0) {
        css.push_str(&format!(" padding: {}px;", num(padding)));
    }
    css
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn flex_justify(style: &Style) -> &'static str {
    style.text_align.unwrap_or_default().flex_justify()
}

pub(crate) fn title(style: &Style, content: &str) -> String {
    let justify = style.text_align.map_or("center", |a| a.as_css());
    format!(
        r#"<div style="{} display:flex; align-items:center; justify-content:{}">{}</div>"#,
        base_style(style),
        justify,
        content
    )
}

pub(crate) fn block(style: &Style, content: &str) -> String {
    format!(r#"<div style="{}">{}</div>"#, base_style(style), content)
}

pub(crate) fn vertical(style: &Style, content: &str) -> String {
    let align = match style.text_align.unwrap_or_default() {
        TextAlign::Center => "center",
        TextAlign::Right => "flex-end",
        TextAlign::Left => "flex-start",
    };
    format!(
        r#"<div style="{} writing-mode: vertical-rl; text-orientation: upright; letter-spacing: {}px; display: flex; align-items: {};">{}</div>"#,
        base_style(style),
        num(style.letter_spacing.unwrap_or(0.0)),
        align,
        content
    )
}

/// Flex row centered vertically, used by date/time and page numbers.
pub(crate) fn centered_row(style: &Style, content: &str) -> String {
    format!(
        r#"<div style="{} display:flex; align-items:center; justify-content:{}">{}</div>"#,
        base_style(style),
        flex_justify(style),
        content
    )
}

/// Live time when `auto_current` is set or the resolved text is empty,
/// otherwise the resolved text.
pub(crate) fn date_time_text(
    resolved: String,
    format: &str,
    auto_current: bool,
    now: chrono::NaiveDateTime,
) -> String {
    if auto_current || resolved.is_empty() {
        escape_html(&format_timestamp(format, now))
    } else {
        resolved
    }
}

pub(crate) fn checkbox(style: &Style, checked: bool, label: &str) -> String {
    let mark = if checked {
        r#"<path d="M3 6 L6 9 L11 3" stroke="currentColor" stroke-width="2" fill="none" />"#
    } else {
        ""
    };
    format!(
        r#"<div style="{} display:flex; align-items:center;"><svg width="14" height="14" viewBox="0 0 14 14" style="margin-right:4px; border:1px solid currentColor; border-radius:2px; flex-shrink:0;">{}</svg><span>{}</span></div>"#,
        base_style(style),
        mark,
        label
    )
}

pub(crate) fn signature(style: &Style, label: &str, show_date: bool) -> String {
    let date = if show_date {
        r#"<span style="flex-shrink:0; margin-left:12px;">日期：</span><div style="width:80px; border-bottom:1px solid #000; margin-left:4px; height:1px; align-self:flex-end;"></div>"#
    } else {
        ""
    };
    format!(
        r#"<div style="{} display:flex; align-items:flex-end; white-space:nowrap;"><span style="flex-shrink:0;">{}</span><div style="flex:1; border-bottom:1px solid #000; margin:0 4px; height:1px; align-self:flex-end;"></div>{}</div>"#,
        base_style(style),
        label,
        date
    )
}
