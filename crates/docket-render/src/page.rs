//! Pagination and the print document.
//!
//! Every data group becomes one page: a fixed-size, relatively
//! positioned box in which each component is absolutely placed by its
//! stored geometry. Lines and paths store endpoint coordinates, so they
//! are painted full-bleed over the page.

use docket_core::{event_bus, number_string as num, AppEvent, FieldCatalog, PrintEvent, RecordGroup};
use docket_designer::{Component, GlobalSettings, Layout, Paper, Shape};

use crate::formula::FormulaSet;
use crate::html::{PageContext, Renderer};

/// A complete HTML document ready for a print surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub html: String,
    pub page_count: usize,
}

impl PrintDocument {
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

/// Document CSS: A4 pages without margins, one `.page` per sheet.
pub fn print_styles(paper: Paper) -> String {
    format!(
        "@page {{ size: A4; margin: 0; }} \
         body {{ margin: 0; font-family: \"Helvetica Neue\", Helvetica, sans-serif; -webkit-print-color-adjust: exact; }} \
         .page {{ width: {}px; height: {}px; margin: 0 auto; position: relative; page-break-after: always; overflow: hidden; }} \
         .page:last-child {{ page-break-after: auto; }} \
         .comp {{ position: absolute; overflow: hidden; }}",
        num(paper.width),
        num(paper.height)
    )
}

/// Inline position style of the wrapper around a component. Box
/// geometry is placed on whole units.
pub fn placement_style(component: &Component) -> String {
    match &component.shape {
        Shape::Line(_) | Shape::Path(_) => format!(
            "left:0; top:0; width:100%; height:100%; z-index:{}; pointer-events:none;",
            component.style.z_index.filter(|z| *z != 0).unwrap_or(10)
        ),
        Shape::Framed(framed) => {
            let f = framed.frame;
            let height = if component.is_table() {
                "auto".to_string()
            } else {
                format!("{}px", num(f.h.round()))
            };
            format!(
                "left:{}px; top:{}px; width:{}px; height:{}; z-index:{};",
                num(f.x.round()),
                num(f.y.round()),
                num(f.w.round()),
                height,
                component.style.z_index.unwrap_or(0)
            )
        }
    }
}

impl Renderer {
    /// One `.page` block with every component of `layout` in layout order.
    pub fn render_page(&self, layout: &Layout, page: &PageContext<'_>) -> String {
        let mut html = String::from(r#"<div class="page">"#);
        for component in layout {
            html.push_str(&format!(
                r#"<div class="comp" style="{}">{}</div>"#,
                placement_style(component),
                self.render_component(component, page)
            ));
        }
        html.push_str("</div>");
        html
    }

    /// Renders one page per group and wraps them in a print document.
    pub fn build_document(
        &self,
        settings: &GlobalSettings,
        layout: &Layout,
        catalog: &FieldCatalog,
        groups: &[RecordGroup],
    ) -> PrintDocument {
        let formulas = FormulaSet::parse(&settings.calculation_formulas);
        let total = groups.len();
        let pages: String = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let page = PageContext::print(catalog, &formulas, group, index, total);
                self.render_page(layout, &page)
            })
            .collect();

        let html = format!(
            "<html><head><title>Print</title><style>{}</style></head><body>{}</body></html>",
            print_styles(settings.paper()),
            pages
        );
        tracing::info!("Built print document: {} pages, {} bytes", total, html.len());
        event_bus().publish(AppEvent::Print(PrintEvent::DocumentBuilt {
            pages: total,
            bytes: html.len(),
        }));

        PrintDocument {
            html,
            page_count: total,
        }
    }
}
