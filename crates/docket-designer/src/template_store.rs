//! Named templates and the current-template pointer.

use docket_core::TemplateError;
use serde::{Deserialize, Serialize};

use crate::global_settings::GlobalSettings;
use crate::layout::Layout;
use crate::model::new_id;

pub const DEFAULT_TEMPLATE_NAME: &str = "默认模板";
pub const NEW_TEMPLATE_NAME: &str = "新模板";

/// A host view a template is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedView {
    pub view_id: String,
}

/// A persisted template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub settings: GlobalSettings,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub linked_views: Vec<LinkedView>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            settings: GlobalSettings::default(),
            layout: Layout::default(),
            linked_views: Vec::new(),
        }
    }

    pub fn is_linked_to(&self, view_id: &str) -> bool {
        self.linked_views.iter().any(|v| v.view_id == view_id)
    }
}

/// Ordered template collection with one current template.
///
/// The store holds the saved copies; the workspace being edited lives in
/// the designer state and is written back with [`TemplateStore::save_workspace`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStore {
    templates: Vec<Template>,
    current_id: Option<String>,
}

impl TemplateStore {
    /// Store holding the single default template.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.ensure_default();
        store
    }

    pub fn from_templates(templates: Vec<Template>) -> Self {
        let current_id = templates.first().map(|t| t.id.clone());
        Self {
            templates,
            current_id,
        }
    }

    /// Creates the default template when the store is empty and repairs a
    /// dangling current id. Returns true when anything changed.
    pub fn ensure_default(&mut self) -> bool {
        if self.templates.is_empty() {
            let template = Template::new(DEFAULT_TEMPLATE_NAME);
            self.current_id = Some(template.id.clone());
            self.templates.push(template);
            return true;
        }
        let valid = self
            .current_id
            .as_deref()
            .is_some_and(|id| self.get(id).is_some());
        if !valid {
            self.current_id = self.templates.first().map(|t| t.id.clone());
            return true;
        }
        false
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current(&self) -> Option<&Template> {
        self.current_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Template, TemplateError> {
        self.templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound { id: id.to_string() })
    }

    /// Makes `id` current. Returns whether the current template changed.
    pub fn set_current(&mut self, id: &str) -> Result<bool, TemplateError> {
        if self.get(id).is_none() {
            return Err(TemplateError::NotFound { id: id.to_string() });
        }
        if self.current_id.as_deref() == Some(id) {
            return Ok(false);
        }
        self.current_id = Some(id.to_string());
        Ok(true)
    }

    /// Appends an empty template and makes it current.
    pub fn add(&mut self, name: Option<&str>) -> String {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(NEW_TEMPLATE_NAME);
        let template = Template::new(name);
        let id = template.id.clone();
        tracing::info!("Added template {} ({})", name, id);
        self.templates.push(template);
        self.current_id = Some(id.clone());
        id
    }

    /// Duplicates the current template without its view links and makes
    /// the copy current.
    pub fn copy_current(&mut self) -> Result<String, TemplateError> {
        let current = self.current().ok_or_else(|| TemplateError::NotFound {
            id: self.current_id.clone().unwrap_or_default(),
        })?;
        let mut copy = current.clone();
        copy.id = new_id();
        copy.name = format!("{} (副本)", current.name);
        copy.linked_views.clear();

        let id = copy.id.clone();
        self.templates.push(copy);
        self.current_id = Some(id.clone());
        Ok(id)
    }

    /// Removes a template. The last remaining template cannot be deleted.
    /// Deleting the current template makes the first one current; the
    /// return value says whether that happened.
    pub fn delete(&mut self, id: &str) -> Result<bool, TemplateError> {
        if self.templates.len() <= 1 {
            return Err(TemplateError::LastTemplate);
        }
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound { id: id.to_string() })?;
        self.templates.remove(index);

        if self.current_id.as_deref() == Some(id) {
            self.current_id = self.templates.first().map(|t| t.id.clone());
            return Ok(true);
        }
        Ok(false)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), TemplateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Binds a view to a template. A view belongs to at most one template,
    /// so it is removed from any other template first.
    pub fn link_view(&mut self, id: &str, view_id: &str) -> Result<(), TemplateError> {
        self.get_mut(id)?;
        for template in &mut self.templates {
            if template.id != id {
                template.linked_views.retain(|v| v.view_id != view_id);
            }
        }
        let template = self.get_mut(id)?;
        if !template.is_linked_to(view_id) {
            template.linked_views.push(LinkedView {
                view_id: view_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn unlink_view(&mut self, id: &str, view_id: &str) -> Result<(), TemplateError> {
        self.get_mut(id)?
            .linked_views
            .retain(|v| v.view_id != view_id);
        Ok(())
    }

    pub fn find_by_view(&self, view_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.is_linked_to(view_id))
    }

    /// Writes the edited workspace back into the current template.
    pub fn save_workspace(&mut self, settings: &GlobalSettings, layout: &Layout) -> bool {
        let Some(id) = self.current_id.clone() else {
            return false;
        };
        match self.get_mut(&id) {
            Ok(template) => {
                template.settings = settings.clone();
                template.layout = layout.clone();
                true
            }
            Err(_) => false,
        }
    }

    /// Replaces every template, making the first one current.
    pub fn replace_all(&mut self, templates: Vec<Template>) {
        *self = Self::from_templates(templates);
    }
}
