use crate::model::ComponentId;

/// Tracks the ordered set of selected component ids.
///
/// The most recently added id is the "primary" selection, the one the
/// properties panel edits.
///
/// # Examples
///
/// ```
/// use docket_designer::selection_manager::SelectionManager;
///
/// let mut selection = SelectionManager::new();
/// selection.select_only("a");
/// selection.toggle("b");
/// assert_eq!(selection.primary(), Some("b"));
/// selection.toggle("b");
/// assert_eq!(selection.ids(), ["a".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    ids: Vec<ComponentId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ComponentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Returns the last selected id.
    pub fn primary(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the selection wholesale, dropping duplicates.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ComponentId>) {
        self.ids.clear();
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn select_only(&mut self, id: impl Into<ComponentId>) {
        self.ids.clear();
        self.ids.push(id.into());
    }

    pub fn add(&mut self, id: impl Into<ComponentId>) {
        let id = id.into();
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Adds `id` when absent, removes it otherwise. Returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    /// Keeps only ids accepted by `f`, used after components are removed.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut f: F) {
        self.ids.retain(|id| f(id));
    }
}
