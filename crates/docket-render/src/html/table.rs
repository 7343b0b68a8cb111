//! Detail table: one row per record of the group.

use docket_core::{cell_text, number_string as num, Field, FieldCatalog, RecordFields};
use docket_designer::TableProps;

use crate::variables::{escape_html, VariableResolver};

/// Rows a table is filled with.
pub(crate) enum TableRows<'a> {
    /// One placeholder row showing `{{field}}` per column.
    Placeholder,
    Records(&'a [RecordFields]),
}

/// Column width shares in percent. Stored pixel widths are proportional;
/// missing or unset widths split evenly.
fn column_shares(props: &TableProps, columns: usize) -> Vec<f64> {
    let total: f64 = props.column_widths.iter().sum();
    (0..columns)
        .map(|i| match props.column_widths.get(i) {
            Some(w) if total > 0.0 && *w != 0.0 => w / total * 100.0,
            _ => 100.0 / columns as f64,
        })
        .collect()
}

pub(crate) fn table(
    props: &TableProps,
    catalog: &FieldCatalog,
    rows: TableRows<'_>,
    resolver: &VariableResolver<'_>,
) -> String {
    if props.field_ids.is_empty() {
        return r#"<div style="color:red; border:1px dashed red; padding: 10px; font-size:12px;">请配置表格列</div>"#.to_string();
    }
    let columns: Vec<&Field> = props
        .field_ids
        .iter()
        .filter_map(|id| catalog.by_id(id))
        .collect();

    let row_height = num(props.row_height);
    let font_size = num(props.data_font_size);
    let td_style = format!(
        "border: 1px solid #000; height: {}px; padding: 0; box-sizing: border-box; vertical-align: middle;",
        row_height
    );
    let cell_style = format!(
        "width: 100%; height: 100%; display: flex; align-items: center; justify-content: {}; padding: 0 0.4em; overflow: hidden; white-space: nowrap; font-size: {}px;",
        props.data_align.flex_justify(),
        font_size
    );
    let th_style = format!(
        "border: 1px solid #000; padding: 0; background-color: #f8f9fa; font-weight: 600; height:{}px; box-sizing:border-box;",
        row_height
    );
    let th_inner = format!(
        "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; padding: 0 0.4em; overflow: hidden; white-space: nowrap; font-size: {}px;",
        font_size
    );

    let mut head = String::new();
    for (column, share) in columns.iter().zip(column_shares(props, columns.len())) {
        head.push_str(&format!(
            r#"<th style="width:{}%; {}"><div style="{}">{}</div></th>"#,
            num(share),
            th_style,
            th_inner,
            escape_html(&column.name)
        ));
    }

    let cell = |content: &str| {
        format!(
            r#"<td style="{}"><div style="{}">{}</div></td>"#,
            td_style, cell_style, content
        )
    };
    let row = |cells: Vec<String>| format!("<tr>{}</tr>", cells.concat());

    let mut body = String::new();
    match rows {
        TableRows::Placeholder => body.push_str(&row(columns
            .iter()
            .map(|c| cell(&format!("{{{{{}}}}}", escape_html(&c.name))))
            .collect())),
        TableRows::Records(records) => {
            for record in records {
                body.push_str(&row(columns
                    .iter()
                    .map(|c| {
                        let text = record.get(&c.id).map(cell_text).unwrap_or_default();
                        cell(&escape_html(&text))
                    })
                    .collect()));
            }
        }
    }

    for _ in 0..props.empty_rows {
        body.push_str(&row(columns.iter().map(|_| cell("&nbsp;")).collect()));
    }

    if let Some(summary) = props.summary.as_ref().filter(|_| props.show_summary) {
        let part = |text: &str, align: &str| {
            format!(
                r#"<div style="flex:1; text-align:{}; overflow:hidden; white-space:nowrap;">{}</div>"#,
                align,
                resolver.resolve(text)
            )
        };
        body.push_str(&format!(
            r#"<tr><td colspan="{}" style="{}"><div style="width:100%; height:100%; display:flex; align-items:center; justify-content:space-between; padding:0 0.4em; font-size:{}px;">{}{}{}</div></td></tr>"#,
            columns.len(),
            td_style,
            font_size,
            part(&summary.left, "left"),
            part(&summary.center, "center"),
            part(&summary.right, "right"),
        ));
    }

    format!(
        r#"<table style="width:100%; border-collapse:collapse; table-layout: fixed;"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>"#,
        head, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_follow_stored_widths() {
        let props = TableProps {
            column_widths: vec![100.0, 300.0],
            ..Default::default()
        };
        assert_eq!(column_shares(&props, 2), vec![25.0, 75.0]);
        assert_eq!(column_shares(&TableProps::default(), 4), vec![25.0; 4]);
    }
}
