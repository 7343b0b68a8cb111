use std::sync::Arc;

use chrono::NaiveDate;
use docket_core::{Field, FieldCatalog, GroupKey, Rect, RecordFields, RecordGroup};
use docket_designer::{
    Component, Content, GlobalSettings, Layout, Style, SummaryConfig, TableProps,
};
use docket_render::{FixedClock, FormulaSet, PageContext, Renderer};
use serde_json::json;

fn catalog() -> FieldCatalog {
    vec![
        Field::new("f_customer", "客户名称"),
        Field::new("f_item", "品名"),
        Field::new("f_amount", "金额"),
    ]
    .into_iter()
    .collect()
}

fn record(item: &str, amount: f64) -> RecordFields {
    match json!({"f_customer": "张三", "f_item": item, "f_amount": amount}) {
        serde_json::Value::Object(map) => map,
        _ => RecordFields::new(),
    }
}

fn groups() -> Vec<RecordGroup> {
    vec![
        RecordGroup::new(
            vec![GroupKey::new("客户名称", "张三")],
            vec![record("螺丝", 1000.0), record("垫片", 500.0)],
        ),
        RecordGroup::new(
            vec![GroupKey::new("客户名称", "李四")],
            vec![record("<扳手>", 20.0)],
        ),
    ]
}

fn layout() -> Layout {
    Layout::from_components(vec![
        Component::framed(
            "header",
            Style::text(),
            Rect::new(40.0, 40.0, 500.0, 30.0),
            Content::TextRow {
                text: "客户：{{客户名称}} 合计：@{{合计}}@".to_string(),
            },
        ),
        Component::framed(
            "table",
            Style::default(),
            Rect::new(40.0, 100.0, 714.0, 200.0),
            Content::Table(TableProps {
                field_ids: vec!["f_item".to_string(), "f_amount".to_string()],
                column_widths: vec![300.0, 100.0],
                empty_rows: 1,
                show_summary: true,
                summary: Some(SummaryConfig {
                    left: "合计：".to_string(),
                    center: String::new(),
                    right: "{{合计}}".to_string(),
                }),
                ..Default::default()
            }),
        ),
        Component::framed(
            "page",
            Style::text(),
            Rect::new(600.0, 1080.0, 150.0, 24.0),
            Content::PageNumber {
                format: "第 {{page}} 页 / 共 {{ Total }} 页".to_string(),
            },
        ),
        Component::framed(
            "printed",
            Style::text(),
            Rect::new(40.0, 1080.0, 200.0, 24.0),
            Content::DateTime {
                text: String::new(),
                format: "YYYY/MM/DD".to_string(),
                auto_current: true,
            },
        ),
    ])
}

fn renderer() -> Renderer {
    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid date");
    Renderer::default().with_clock(Arc::new(FixedClock(at)))
}

fn settings() -> GlobalSettings {
    GlobalSettings {
        calculation_formulas: "合计(2) = 金额+".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_one_page_per_group() {
    let doc = renderer().build_document(&settings(), &layout(), &catalog(), &groups());
    assert_eq!(doc.page_count, 2);
    assert_eq!(doc.html.matches(r#"<div class="page">"#).count(), 2);
    assert!(doc.html.starts_with("<html><head><title>Print</title><style>@page { size: A4; margin: 0; }"));
}

#[test]
fn test_variables_resolve_per_group() {
    let doc = renderer().build_document(&settings(), &layout(), &catalog(), &groups());
    assert!(doc.html.contains("客户：张三&nbsp;合计：壹仟伍佰元整"));
    assert!(doc.html.contains("客户：李四&nbsp;合计：贰拾元整"));
    assert!(doc.html.contains(">1500.00</div>"));
    assert!(doc.html.contains(">20.00</div>"));
}

#[test]
fn test_table_rows_and_padding() {
    let catalog = catalog();
    let groups = groups();
    let formulas = FormulaSet::parse(&settings().calculation_formulas);
    let page = PageContext::print(&catalog, &formulas, &groups[1], 1, 2);
    let table = layout().get("table").cloned().expect("table");
    let html = renderer().render_component(&table, &page);

    // header + one record + one padding row + summary
    assert_eq!(html.matches("<tr>").count(), 4);
    assert!(html.contains("width:75%"));
    assert!(html.contains("width:25%"));
    assert!(html.contains("&lt;扳手&gt;"));
    assert!(html.contains("&nbsp;</div></td>"));
    assert!(html.contains(r#"colspan="2""#));
}

#[test]
fn test_edit_mode_table_shows_placeholders() {
    let catalog = catalog();
    let page = PageContext::editing(&catalog, &FormulaSet::default(), None);
    let table = layout().get("table").cloned().expect("table");
    let html = renderer().render_component(&table, &page);
    assert!(html.contains(">{{品名}}</div>"));
    assert!(html.contains(">{{金额}}</div>"));
    assert!(!html.contains("螺丝"));
}

#[test]
fn test_page_numbers_and_clock() {
    let doc = renderer().build_document(&settings(), &layout(), &catalog(), &groups());
    assert!(doc.html.contains("第 1 页 / 共 2 页"));
    assert!(doc.html.contains("第 2 页 / 共 2 页"));
    assert!(doc.html.contains(">2024/06/01</div>"));
}

#[test]
fn test_table_without_columns_shows_hint() {
    let catalog = catalog();
    let page = PageContext::editing(&catalog, &FormulaSet::default(), None);
    let table = Component::framed(
        "t",
        Style::default(),
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Content::Table(TableProps::default()),
    );
    assert!(renderer().render_component(&table, &page).contains("请配置表格列"));
}

#[test]
fn test_qr_code_encodes_resolved_payload() {
    let catalog = catalog();
    let groups = groups();
    let page = PageContext::print(&catalog, &FormulaSet::default(), &groups[0], 0, 1);
    let qr = Component::framed(
        "qr",
        Style::default(),
        Rect::new(0.0, 0.0, 80.0, 80.0),
        Content::QrCode {
            text: "{{客户名称}}".to_string(),
        },
    );
    let html = renderer().render_component(&qr, &page);
    assert!(html.contains("data=%E5%BC%A0%E4%B8%89"));

    let empty = Component::framed(
        "qr2",
        Style::default(),
        Rect::new(0.0, 0.0, 80.0, 80.0),
        Content::QrCode { text: String::new() },
    );
    assert!(renderer().render_component(&empty, &page).contains("data=123456"));
}
