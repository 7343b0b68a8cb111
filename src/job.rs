//! Command line jobs: rendering a stored template against a record dump,
//! and checking backup files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use docket_core::FieldCatalog;
use docket_datasource::{group_records, RecordDump};
use docket_designer::Template;
use docket_render::{print_document, HtmlFileSurface, RenderOptions, Renderer};
use docket_settings::{import_backup, BackupPayload, TemplatePersistence};
use tracing::info;

/// Renders one template of a stored template collection to an HTML file.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Template store file.
    pub store: PathBuf,
    /// Record dump (fields plus records).
    pub data: PathBuf,
    pub out: PathBuf,
    /// Template id or name; the store's current template when `None`.
    pub template: Option<String>,
    /// Grouping field ids or names; the template's own when empty.
    pub group_by: Vec<String>,
    pub options: RenderOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub template: String,
    pub pages: usize,
    pub out: PathBuf,
}

impl RenderJob {
    pub fn run(&self) -> Result<RenderSummary> {
        if !self.store.exists() {
            bail!("Template store {} does not exist", self.store.display());
        }
        let store = TemplatePersistence::new(&self.store)
            .load()
            .with_context(|| format!("Failed to load templates from {}", self.store.display()))?;
        let template = pick_template(store.templates(), store.current(), self.template.as_deref())?;

        let dump = read_dump(&self.data)?;
        let catalog = FieldCatalog::new(dump.fields);
        let grouping = if self.group_by.is_empty() {
            template.settings.grouping_field_ids.clone()
        } else {
            resolve_fields(&catalog, &self.group_by)?
        };
        let records = dump.records.into_iter().map(|r| r.fields).collect();
        let groups = group_records(records, &catalog, &grouping);
        info!(
            template = %template.name,
            groups = groups.len(),
            "Rendering template"
        );

        let renderer = Renderer::new(self.options.clone());
        let document =
            renderer.build_document(&template.settings, &template.layout, &catalog, &groups);
        let mut surface = HtmlFileSurface::new(&self.out);
        print_document(&mut surface, &document)
            .with_context(|| format!("Failed to write {}", self.out.display()))?;

        Ok(RenderSummary {
            template: template.name.clone(),
            pages: document.page_count,
            out: self.out.clone(),
        })
    }
}

fn pick_template<'a>(
    templates: &'a [Template],
    current: Option<&'a Template>,
    key: Option<&str>,
) -> Result<&'a Template> {
    match key {
        Some(key) => templates
            .iter()
            .find(|t| t.id == key)
            .or_else(|| templates.iter().find(|t| t.name == key))
            .with_context(|| format!("No template with id or name '{key}'")),
        None => current.context("Template store has no current template"),
    }
}

fn read_dump(path: &Path) -> Result<RecordDump> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a record dump", path.display()))
}

/// Maps each key, an id or a name, to a field id.
fn resolve_fields(catalog: &FieldCatalog, keys: &[String]) -> Result<Vec<String>> {
    keys.iter()
        .map(|key| {
            catalog
                .by_id(key)
                .or_else(|| catalog.by_name(key))
                .map(|f| f.id.clone())
                .with_context(|| format!("Unknown grouping field '{key}'"))
        })
        .collect()
}

/// Reads and validates a backup file.
pub fn check_backup(path: &Path) -> Result<BackupPayload> {
    import_backup(path).with_context(|| format!("{} is not a valid backup", path.display()))
}
