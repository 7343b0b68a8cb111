//! # Formula Engine
//!
//! Parses the calculation formula setting and evaluates it against one
//! data group, producing the [`VariableTable`] the variable resolver reads.
//!
//! A formula statement has the shape `name = expression` or
//! `name(format) = expression`. Statements are separated by `;`, `|` or
//! newlines. Three expression shapes are recognized:
//!
//! - `Field+` sums the field over every record of the group;
//! - `Field*` multiplies the field over every record;
//! - anything else is evaluated once per record after substituting the
//!   record's field values.

use std::collections::HashMap;

use docket_core::{cell_text, safe_float, FieldCatalog, RecordFields, RecordGroup};
use serde::{Deserialize, Serialize};

use crate::expression::evaluate;
use crate::format::number_config;

/// How a formula is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaKind {
    /// Sum of a field across the group.
    ColumnSum { field: String },
    /// Product of a field across the group.
    ColumnProduct { field: String },
    /// Arithmetic evaluated per record.
    Row,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub name: String,
    /// Number format applied when the variable is printed.
    pub format: Option<String>,
    pub expression: String,
    pub kind: FormulaKind,
}

impl Formula {
    /// Parses one statement. Returns `None` when there is no `=`, or the
    /// name or expression is empty.
    pub fn parse(statement: &str) -> Option<Self> {
        let (definition, expression) = statement.split_once('=')?;
        let definition = definition.trim();
        let expression = expression.trim();
        if definition.is_empty() || expression.is_empty() {
            return None;
        }

        let (name, format) = match definition.strip_suffix(')').and_then(|d| d.split_once('(')) {
            Some((name, format)) if !name.trim().is_empty() && !format.trim().is_empty() => {
                (name.trim(), Some(format.trim().to_string()))
            }
            _ => (definition, None),
        };

        Some(Self {
            name: name.to_string(),
            format,
            expression: expression.to_string(),
            kind: classify(expression),
        })
    }
}

fn classify(expression: &str) -> FormulaKind {
    if let Some(field) = expression.strip_suffix('+') {
        if !expression.contains("+ ") {
            return FormulaKind::ColumnSum {
                field: field.trim().to_string(),
            };
        }
    }
    if let Some(field) = expression.strip_suffix('*') {
        if !expression.contains("* ") {
            return FormulaKind::ColumnProduct {
                field: field.trim().to_string(),
            };
        }
    }
    FormulaKind::Row
}

/// The parsed calculation formula setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaSet {
    formulas: Vec<Formula>,
}

impl FormulaSet {
    pub fn parse(text: &str) -> Self {
        let formulas = text
            .split([';', '|', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|statement| {
                let parsed = Formula::parse(statement);
                if parsed.is_none() {
                    tracing::debug!("Skipping formula without assignment: {}", statement);
                }
                parsed
            })
            .collect();
        Self { formulas }
    }

    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Evaluates every formula for `group`. An empty group yields an
    /// empty table.
    pub fn calculate(&self, catalog: &FieldCatalog, group: &RecordGroup) -> VariableTable {
        let mut table = VariableTable::default();
        if group.records.is_empty() {
            return table;
        }

        for formula in &self.formulas {
            let values = match &formula.kind {
                FormulaKind::ColumnSum { field } => {
                    let Some(f) = catalog.by_name(field) else {
                        tracing::debug!("Formula {}: unknown field {}", formula.name, field);
                        continue;
                    };
                    vec![group
                        .records
                        .iter()
                        .map(|r| numeric_cell(r, &f.id, 0.0))
                        .sum()]
                }
                FormulaKind::ColumnProduct { field } => {
                    let Some(f) = catalog.by_name(field) else {
                        tracing::debug!("Formula {}: unknown field {}", formula.name, field);
                        continue;
                    };
                    vec![group
                        .records
                        .iter()
                        .map(|r| numeric_cell(r, &f.id, 1.0))
                        .product()]
                }
                FormulaKind::Row => group
                    .records
                    .iter()
                    .map(|record| evaluate_row(formula, catalog, record))
                    .collect(),
            };
            table.insert(
                formula.name.clone(),
                Variable {
                    values,
                    format: formula.format.clone(),
                },
            );
        }
        table
    }
}

/// Parses `text` and evaluates it for `group` in one step.
pub fn calculate_variables(text: &str, catalog: &FieldCatalog, group: &RecordGroup) -> VariableTable {
    if text.trim().is_empty() {
        return VariableTable::default();
    }
    FormulaSet::parse(text).calculate(catalog, group)
}

fn numeric_cell(record: &RecordFields, field_id: &str, default: f64) -> f64 {
    record
        .get(field_id)
        .map(|v| safe_float(&cell_text(v), default))
        .unwrap_or(default)
}

fn is_boundary(c: char) -> bool {
    c.is_whitespace() || "()+-*/".contains(c)
}

/// Byte offsets of every occurrence of `name` in `expr` delimited by
/// the string ends, whitespace, operators or parentheses.
fn delimited_matches(expr: &str, name: &str) -> Vec<usize> {
    if name.is_empty() {
        return Vec::new();
    }
    expr.match_indices(name)
        .map(|(start, _)| start)
        .filter(|&start| {
            let before = expr[..start].chars().next_back();
            let after = expr[start + name.len()..].chars().next();
            before.map_or(true, is_boundary) && after.map_or(true, is_boundary)
        })
        .collect()
}

/// Replaces every delimited occurrence of `name` with `value`.
fn substitute(expr: &str, name: &str, value: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut last = 0;
    for start in delimited_matches(expr, name) {
        out.push_str(&expr[last..start]);
        out.push_str(value);
        last = start + name.len();
    }
    out.push_str(&expr[last..]);
    out
}

fn evaluate_row(formula: &Formula, catalog: &FieldCatalog, record: &RecordFields) -> f64 {
    let mut used: Vec<(&str, f64)> = catalog
        .iter()
        .filter(|f| !delimited_matches(&formula.expression, &f.name).is_empty())
        .map(|f| (f.name.as_str(), numeric_cell(record, &f.id, 0.0)))
        .collect();
    // longest first so "金额" never matches inside "总金额"
    used.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

    let mut expression = formula.expression.clone();
    for (name, value) in used {
        expression = substitute(&expression, name, &docket_core::number_string(value));
    }
    let value = evaluate(&expression);
    tracing::trace!("Row formula {}: {} = {}", formula.name, expression, value);
    value
}

/// A computed variable: one value for column formulas, one per record
/// for row formulas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub values: Vec<f64>,
    /// Number format spec, see [`number_config`].
    #[serde(rename = "config")]
    pub format: Option<String>,
}

impl Variable {
    /// The formatted value at `index`.
    pub fn formatted(&self, index: usize) -> Option<String> {
        self.values
            .get(index)
            .map(|v| number_config(*v, self.format.as_deref()))
    }
}

/// Computed variables by name, rebuilt for every group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    variables: HashMap<String, Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) {
        self.variables.insert(name.into(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
