//! # Variable Resolver
//!
//! Substitutes placeholders in template text for one data group. Passes
//! run in a fixed order, each on the output of the previous one:
//!
//! 1. literal `\n` / `\t` markers become `<br>` / two `&nbsp;`;
//! 2. without a group, spaces become `&nbsp;` and resolution stops;
//! 3. `@{{name}}@` resolves `name` and spells numbers as a Chinese amount;
//! 4. `@123.45@` spells the number as a Chinese amount;
//! 5. `{{name}}` and `{{name[i]}}` resolve against computed variables,
//!    grouping keys and the first record;
//! 6. remaining spaces become `&nbsp;`.
//!
//! Values taken from records and grouping keys are HTML escaped.

use std::sync::OnceLock;

use docket_core::{cell_text, parse_leading_float, FieldCatalog, RecordGroup};
use regex::{Captures, Regex};

use crate::format::chinese_amount;
use crate::formula::VariableTable;

fn amount_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\{\{[^}]+\}\})@").expect("invalid regex pattern"))
}

fn amount_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@(\d+(?:\.\d+)?)@").expect("invalid regex pattern"))
}

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([^}\s\[\]]+)\s*(?:\[\s*(\d+)\s*\]\s*)?\}\}")
            .expect("invalid regex pattern")
    })
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Resolves template text against one group.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    variables: &'a VariableTable,
    catalog: &'a FieldCatalog,
    group: Option<&'a RecordGroup>,
}

impl<'a> VariableResolver<'a> {
    /// `group` is `None` while editing without bound data.
    pub fn new(
        variables: &'a VariableTable,
        catalog: &'a FieldCatalog,
        group: Option<&'a RecordGroup>,
    ) -> Self {
        Self {
            variables,
            catalog,
            group,
        }
    }

    pub fn resolve(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let text = text.replace("\\n", "<br>").replace("\\t", "&nbsp;&nbsp;");

        let Some(group) = self.group else {
            return text.replace(' ', "&nbsp;");
        };

        let text = amount_reference_regex().replace_all(&text, |caps: &Captures| {
            let value = self.resolve_references(&caps[1], group);
            match parse_leading_float(&value) {
                Some(n) if n.is_finite() => chinese_amount(n),
                _ => value,
            }
        });

        let text = amount_literal_regex().replace_all(&text, |caps: &Captures| {
            chinese_amount(parse_leading_float(&caps[1]).unwrap_or(0.0))
        });

        self.resolve_references(&text, group).replace(' ', "&nbsp;")
    }

    fn resolve_references(&self, text: &str, group: &RecordGroup) -> String {
        reference_regex()
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                match caps.get(2) {
                    Some(index) => {
                        let index = index.as_str().parse::<usize>().unwrap_or(usize::MAX);
                        self.variables
                            .get(name)
                            .and_then(|v| v.formatted(index))
                            .unwrap_or_default()
                    }
                    None => self.lookup(name, group),
                }
            })
            .into_owned()
    }

    /// Computed variable, then grouping key, then the first record's cell.
    fn lookup(&self, name: &str, group: &RecordGroup) -> String {
        if let Some(value) = self.variables.get(name).and_then(|v| v.formatted(0)) {
            return value;
        }
        if let Some(value) = group.key_value(name) {
            return escape_html(value);
        }
        let Some(field) = self.catalog.by_name(name) else {
            tracing::trace!("Unresolved variable {}", name);
            return String::new();
        };
        group
            .records
            .first()
            .and_then(|r| r.get(&field.id))
            .map(|v| escape_html(&cell_text(v)))
            .unwrap_or_default()
    }
}
