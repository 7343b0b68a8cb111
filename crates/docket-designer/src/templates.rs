//! # Component Catalog
//!
//! The palette of insertable components, grouped the way the component
//! panel shows them, and the default geometry, style and content each
//! one is created with.

use docket_core::Rect;

use crate::model::{
    new_id, Component, ComponentKind, Content, LineStyle, Orientation, Style, SummaryConfig,
    TableProps, TextAlign,
};

/// Type key of the freehand pen tool. It shares the catalog with real
/// components but switches the canvas into path drawing instead.
pub const PEN_TOOL_KEY: &str = "tool_pen";

/// Default image shown by a freshly inserted image component.
pub const DEFAULT_IMAGE_SRC: &str = "https://lf3-static.bytednsdoc.com/obj/eden-cn/ptlz_zlp/ljhwZthlaukjlkulzlp/root-web-sites/bitable_logo.png";

/// An entry of the component palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogItem {
    Component(ComponentKind),
    Pen,
}

impl CatalogItem {
    /// Parses a palette type key.
    pub fn parse(key: &str) -> Option<Self> {
        if key == PEN_TOOL_KEY {
            return Some(CatalogItem::Pen);
        }
        ComponentKind::from_type_key(key).map(CatalogItem::Component)
    }

    pub fn type_key(&self) -> &'static str {
        match self {
            CatalogItem::Component(kind) => kind.type_key(),
            CatalogItem::Pen => PEN_TOOL_KEY,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CatalogItem::Component(kind) => display_name(*kind),
            CatalogItem::Pen => "画笔工具",
        }
    }
}

/// A titled palette section.
#[derive(Debug, Clone, Copy)]
pub struct CatalogGroup {
    pub title: &'static str,
    pub items: &'static [CatalogItem],
}

pub const CATALOG: [CatalogGroup; 4] = [
    CatalogGroup {
        title: "文本内容",
        items: &[
            CatalogItem::Component(ComponentKind::Title),
            CatalogItem::Component(ComponentKind::TextRow),
            CatalogItem::Component(ComponentKind::VerticalText),
            CatalogItem::Component(ComponentKind::RichText),
            CatalogItem::Component(ComponentKind::DateTime),
            CatalogItem::Component(ComponentKind::PageNumber),
            CatalogItem::Component(ComponentKind::Signature),
        ],
    },
    CatalogGroup {
        title: "数据表格",
        items: &[CatalogItem::Component(ComponentKind::Table)],
    },
    CatalogGroup {
        title: "图形与控件",
        items: &[
            CatalogItem::Component(ComponentKind::Divider),
            CatalogItem::Component(ComponentKind::Checkbox),
            CatalogItem::Component(ComponentKind::Rectangle),
            CatalogItem::Component(ComponentKind::Circle),
            CatalogItem::Pen,
        ],
    },
    CatalogGroup {
        title: "媒体",
        items: &[
            CatalogItem::Component(ComponentKind::Image),
            CatalogItem::Component(ComponentKind::QrCode),
        ],
    },
];

/// Human readable component name.
pub fn display_name(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Title => "大标题",
        ComponentKind::TextRow => "横向文本",
        ComponentKind::VerticalText => "竖向文本",
        ComponentKind::DateTime => "日期时间",
        ComponentKind::PageNumber => "页码",
        ComponentKind::Signature => "签名区",
        ComponentKind::Table => "明细表",
        ComponentKind::RichText => "富文本",
        ComponentKind::Rectangle => "矩形",
        ComponentKind::Circle => "圆形",
        ComponentKind::Divider => "分割线",
        ComponentKind::Checkbox => "勾选框",
        ComponentKind::Image => "图片",
        ComponentKind::QrCode => "二维码",
        ComponentKind::Line | ComponentKind::Path => "组件",
    }
}

fn text_with(f: impl FnOnce(&mut Style)) -> Style {
    let mut style = Style::text();
    f(&mut style);
    style
}

fn outline(fill: Option<&str>) -> Style {
    let mut style = Style::stroke(1.0, "#000000", LineStyle::Solid);
    style.fill_color = fill.map(str::to_string);
    style
}

/// Creates a component of `kind` with its catalog defaults and a fresh id.
///
/// Lines and paths only come out of draw mode, so they have no catalog
/// entry and yield `None`.
pub fn create_component(kind: ComponentKind) -> Option<Component> {
    let (frame, style, content) = match kind {
        ComponentKind::Title => (
            Rect::new(0.0, 0.0, 794.0, 60.0),
            text_with(|s| {
                s.font_size = Some(24.0);
                s.font_weight = Some("bold".to_string());
                s.text_align = Some(TextAlign::Center);
                s.z_index = Some(1);
            }),
            Content::Title {
                text: "销售出库单".to_string(),
            },
        ),
        ComponentKind::TextRow => (
            Rect::new(40.0, 100.0, 300.0, 30.0),
            Style::text(),
            Content::TextRow {
                text: "客户：{{客户名称}}".to_string(),
            },
        ),
        ComponentKind::VerticalText => (
            Rect::new(740.0, 100.0, 40.0, 200.0),
            text_with(|s| {
                s.text_align = Some(TextAlign::Center);
                s.letter_spacing = Some(2.0);
            }),
            Content::VerticalText {
                text: "竖排文本".to_string(),
            },
        ),
        ComponentKind::DateTime => (
            Rect::new(550.0, 60.0, 200.0, 30.0),
            text_with(|s| s.text_align = Some(TextAlign::Right)),
            Content::DateTime {
                text: String::new(),
                format: "YYYY-MM-DD".to_string(),
                auto_current: true,
            },
        ),
        ComponentKind::PageNumber => (
            Rect::new(0.0, 1080.0, 794.0, 20.0),
            text_with(|s| {
                s.font_size = Some(12.0);
                s.text_align = Some(TextAlign::Center);
            }),
            Content::PageNumber {
                format: "第 {{page}} 页 / 共 {{total}} 页".to_string(),
            },
        ),
        ComponentKind::Signature => (
            Rect::new(40.0, 900.0, 300.0, 40.0),
            Style::text(),
            Content::Signature {
                label: "客户签字：".to_string(),
                show_date: true,
            },
        ),
        ComponentKind::Table => (
            Rect::new(40.0, 150.0, 714.0, 200.0),
            Style {
                font_size: Some(13.0),
                z_index: Some(0),
                ..Default::default()
            },
            Content::Table(TableProps {
                show_summary: true,
                summary: Some(SummaryConfig {
                    left: "合计：".to_string(),
                    center: String::new(),
                    right: "@{{金额}}@".to_string(),
                }),
                ..Default::default()
            }),
        ),
        ComponentKind::RichText => (
            Rect::new(40.0, 400.0, 714.0, 80.0),
            text_with(|s| s.font_size = Some(12.0)),
            Content::RichText {
                text: "备注：\n1. 请核对数量。\n2. 保修凭证。".to_string(),
            },
        ),
        ComponentKind::Rectangle => {
            let mut style = outline(Some("transparent"));
            style.border_radius = Some(0.0);
            (Rect::new(40.0, 40.0, 100.0, 100.0), style, Content::Rectangle)
        }
        ComponentKind::Circle => (
            Rect::new(160.0, 40.0, 100.0, 100.0),
            outline(Some("transparent")),
            Content::Circle,
        ),
        ComponentKind::Divider => (
            Rect::new(40.0, 140.0, 714.0, 10.0),
            outline(None),
            Content::Divider {
                orientation: Orientation::Horizontal,
            },
        ),
        ComponentKind::Checkbox => (
            Rect::new(40.0, 500.0, 100.0, 30.0),
            text_with(|s| s.font_size = Some(12.0)),
            Content::Checkbox {
                text: "已审核".to_string(),
                checked: false,
            },
        ),
        ComponentKind::Image => (
            Rect::new(40.0, 20.0, 100.0, 40.0),
            Style {
                object_fit: Some("contain".to_string()),
                z_index: Some(1),
                ..Default::default()
            },
            Content::Image {
                src: DEFAULT_IMAGE_SRC.to_string(),
            },
        ),
        ComponentKind::QrCode => (
            Rect::new(680.0, 20.0, 80.0, 80.0),
            Style {
                z_index: Some(1),
                ..Default::default()
            },
            Content::QrCode {
                text: "{{单号}}".to_string(),
            },
        ),
        ComponentKind::Line | ComponentKind::Path => return None,
    };
    Some(Component::framed(new_id(), style, frame, content))
}
