//! Template-wide settings stored alongside each layout.

use serde::{Deserialize, Serialize};

/// Default paper width in CSS pixels (A4 at 96 dpi).
pub const DEFAULT_PAPER_WIDTH: f64 = 794.0;
/// Default paper height in CSS pixels (A4 at 96 dpi).
pub const DEFAULT_PAPER_HEIGHT: f64 = 1123.0;
/// Structure scale that corresponds to the unscaled layout.
pub const BASE_STRUCTURE_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub width: f64,
    pub height: f64,
}

impl Paper {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Paper {
    fn default() -> Self {
        Self::new(DEFAULT_PAPER_WIDTH, DEFAULT_PAPER_HEIGHT)
    }
}

/// Settings persisted with a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub paper_width: f64,
    pub paper_height: f64,
    /// Formula statements separated by `;`, `|` or newlines.
    pub calculation_formulas: String,
    /// Field ids records are grouped by, one group per page.
    pub grouping_field_ids: Vec<String>,
    pub is_preview_locked: bool,
    /// Structural scale in percent.
    pub structure_scale: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            paper_width: DEFAULT_PAPER_WIDTH,
            paper_height: DEFAULT_PAPER_HEIGHT,
            calculation_formulas: String::new(),
            grouping_field_ids: Vec::new(),
            is_preview_locked: false,
            structure_scale: BASE_STRUCTURE_SCALE,
        }
    }
}

impl GlobalSettings {
    pub fn paper(&self) -> Paper {
        Paper::new(self.paper_width, self.paper_height)
    }
}
