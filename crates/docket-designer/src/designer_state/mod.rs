//! Designer state manager.
//!
//! Owns everything the editor mutates: the canvas with its layout and
//! selection, the workspace settings, the active view and side tab, and
//! the template store. All changes go through [`DesignerState::dispatch`],
//! which applies an [`Action`] and any actions it cascades into, then
//! returns the [`Effect`]s the caller has to carry out.
//!
//! The preview lock is enforced here: while locked the view is always
//! `Preview`, the tab is always `Global`, draw mode stays off and pointer
//! input is ignored.

mod actions;

pub use actions::{Action, Effect};

use std::collections::VecDeque;

use docket_core::{event_bus, AppEvent, NoticeEvent, TemplateError, TemplateEvent};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, DrawKind, InteractionMode};
use crate::global_settings::{GlobalSettings, BASE_STRUCTURE_SCALE};
use crate::layout::{next_structure_scale, Axis, GlobalOpsConfig};
use crate::model::Shape;
use crate::template_store::TemplateStore;
use crate::templates::{create_component, CatalogItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Edit,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideTab {
    #[default]
    Components,
    Properties,
    Global,
}

#[derive(Debug, Clone)]
pub struct DesignerState {
    canvas: Canvas,
    settings: GlobalSettings,
    view: ActiveView,
    tab: SideTab,
    templates: TemplateStore,
    pub ops: GlobalOpsConfig,
    current_view_id: Option<String>,
    /// Workspace differs from the saved template.
    dirty: bool,
    /// Store changed during the current dispatch.
    persist: bool,
}

fn announce(event: TemplateEvent) {
    event_bus().publish(AppEvent::Template(event));
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(TemplateStore::new())
    }
}

impl DesignerState {
    /// Creates the state and loads the store's current template.
    pub fn new(mut templates: TemplateStore) -> Self {
        templates.ensure_default();
        let mut state = Self {
            canvas: Canvas::default(),
            settings: GlobalSettings::default(),
            view: ActiveView::Edit,
            tab: SideTab::Components,
            templates,
            ops: GlobalOpsConfig::default(),
            current_view_id: None,
            dirty: false,
            persist: false,
        };
        let locked = state
            .templates
            .current()
            .is_some_and(|t| t.settings.is_preview_locked);
        state.settings.is_preview_locked = locked;
        state.load_current();
        state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access for tool configuration (snap, draw settings).
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn is_locked(&self) -> bool {
        self.settings.is_preview_locked
    }

    pub fn view(&self) -> ActiveView {
        if self.is_locked() {
            ActiveView::Preview
        } else {
            self.view
        }
    }

    pub fn tab(&self) -> SideTab {
        if self.is_locked() {
            SideTab::Global
        } else {
            self.tab
        }
    }

    pub fn current_view_id(&self) -> Option<&str> {
        self.current_view_id.as_deref()
    }

    /// Applies `action` and everything it cascades into.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let mut queue = VecDeque::from([action]);
        let mut effects = Vec::new();

        while let Some(action) = queue.pop_front() {
            if action.is_pointer() && (self.is_locked() || self.view() != ActiveView::Edit) {
                continue;
            }
            self.apply(action, &mut queue, &mut effects);
        }

        self.commit();
        if std::mem::take(&mut self.persist) {
            effects.push(Effect::Persist);
        }
        effects
    }

    /// Writes a dirty workspace back into the current template.
    fn commit(&mut self) {
        if std::mem::take(&mut self.dirty)
            && self
                .templates
                .save_workspace(&self.settings, self.canvas.layout())
        {
            self.persist = true;
            if let Some(id) = self.templates.current_id() {
                announce(TemplateEvent::Saved { id: id.to_string() });
            }
        }
    }

    fn apply(&mut self, action: Action, queue: &mut VecDeque<Action>, effects: &mut Vec<Effect>) {
        match action {
            Action::PointerDown { event, target } => {
                self.canvas.pointer_down(event, target, &self.settings);
                if !self.canvas.is_draw_mode() {
                    self.tab = SideTab::Properties;
                }
                if self.canvas.mode() == InteractionMode::Drawing {
                    self.dirty = true;
                }
            }
            Action::PointerMove(event) => {
                self.canvas.pointer_move(event, &self.settings);
            }
            Action::PointerUp => match self.canvas.pointer_up() {
                InteractionMode::Dragging | InteractionMode::Resizing | InteractionMode::Drawing => {
                    self.dirty = true;
                }
                InteractionMode::Marquee | InteractionMode::Idle => {}
            },
            Action::EnterDrawMode => {
                if self.is_locked() {
                    tracing::debug!("Draw mode refused while preview is locked");
                    return;
                }
                self.canvas.enter_draw_mode();
                self.tab = SideTab::Properties;
                effects.push(Effect::Notice(NoticeEvent::success(
                    "已进入绘图模式，请在画布拖动绘制",
                )));
            }
            Action::ExitDrawMode => {
                self.canvas.exit_draw_mode();
                self.tab = SideTab::Components;
                effects.push(Effect::Notice(NoticeEvent::info("已退出绘图模式")));
            }
            Action::SetDrawSettings(draw) => self.canvas.draw = draw,
            Action::SetRenderScale(percent) => self.canvas.set_render_scale(percent),
            Action::Insert(CatalogItem::Pen) => {
                self.canvas.draw.kind = DrawKind::Path;
                queue.push_back(Action::EnterDrawMode);
            }
            Action::Insert(CatalogItem::Component(kind)) => {
                let Some(component) = create_component(kind) else {
                    return;
                };
                self.canvas.add_component(component);
                self.tab = SideTab::Properties;
                self.dirty = true;
            }
            Action::UpdateComponent(component) => {
                let id = component.id.clone();
                if self.canvas.layout_mut().replace(component) {
                    self.dirty = true;
                } else {
                    tracing::debug!("Ignoring update of unknown component {}", id);
                }
            }
            Action::DeleteSelected => {
                if self.canvas.delete_selected() > 0 {
                    self.dirty = true;
                }
            }
            Action::SelectAll => self.canvas.select_all(),
            Action::ClearSelection => self.canvas.selection_mut().clear(),
            Action::MoveCanvas { x_dir, y_dir } => {
                if self.canvas.layout().is_empty() {
                    return;
                }
                let step = self.ops.move_step;
                self.canvas
                    .layout_mut()
                    .move_all(f64::from(x_dir) * step, f64::from(y_dir) * step);
                self.dirty = true;
            }
            Action::ScaleCanvas(direction) => {
                if self.canvas.layout().is_empty() {
                    return;
                }
                let current = self.structure_scale();
                let next = next_structure_scale(current, direction, self.ops.scale_step, self.ops.min_scale);
                self.rescale(current, next);
            }
            Action::ResetScale => {
                let current = self.structure_scale();
                if current == BASE_STRUCTURE_SCALE || self.canvas.layout().is_empty() {
                    return;
                }
                self.rescale(current, BASE_STRUCTURE_SCALE);
                effects.push(Effect::Notice(NoticeEvent::success("已还原为 100% 原始比例")));
            }
            Action::CenterContent(axis) => {
                let paper = self.settings.paper();
                if self.canvas.layout_mut().center_content(axis, paper) {
                    self.dirty = true;
                }
            }
            Action::CenterActive(axis) => {
                let Some(id) = self.canvas.selection().primary().map(str::to_string) else {
                    return;
                };
                let paper = self.settings.paper();
                match self.canvas.layout_mut().center_component(&id, axis, paper) {
                    Ok(()) => self.dirty = true,
                    Err(TemplateError::NotAllowed { reason }) => {
                        effects.push(Effect::Notice(NoticeEvent::warning(reason)));
                    }
                    Err(e) => tracing::debug!("Center failed: {}", e),
                }
            }
            Action::AlignLine(axis) => {
                let Some(id) = self
                    .canvas
                    .active_component()
                    .filter(|c| matches!(c.shape, Shape::Line(_)))
                    .map(|c| c.id.clone())
                else {
                    return;
                };
                if self.canvas.layout_mut().align_line(&id, axis).is_ok() {
                    self.dirty = true;
                }
            }
            Action::SetPaperSize { width, height } => {
                self.settings.paper_width = width;
                self.settings.paper_height = height;
                self.dirty = true;
            }
            Action::SetFormulas(formulas) => {
                self.settings.calculation_formulas = formulas;
                self.dirty = true;
            }
            Action::SetGroupingFields(ids) => {
                self.settings.grouping_field_ids = ids;
                self.dirty = true;
                effects.push(Effect::ReloadData { force: true });
            }
            Action::SetPreviewLock(locked) => {
                if self.settings.is_preview_locked == locked {
                    return;
                }
                self.settings.is_preview_locked = locked;
                self.dirty = true;
                if locked {
                    self.apply_lock(queue);
                } else {
                    self.apply_unlock();
                }
            }
            Action::SetView(view) => {
                if self.is_locked() && view != ActiveView::Preview {
                    tracing::debug!("View change refused while preview is locked");
                    return;
                }
                self.view = view;
            }
            Action::SetTab(tab) => {
                if self.is_locked() && tab != SideTab::Global {
                    tracing::debug!("Tab change refused while preview is locked");
                    return;
                }
                self.tab = tab;
            }
            Action::AddTemplate(name) => {
                self.commit();
                let id = self.templates.add(name.as_deref());
                announce(TemplateEvent::Added { id });
                self.persist = true;
                self.switched(effects);
            }
            Action::CopyTemplate => {
                self.commit();
                match self.templates.copy_current() {
                    Ok(id) => {
                        announce(TemplateEvent::Added { id });
                        self.persist = true;
                        self.switched(effects);
                    }
                    Err(e) => tracing::warn!("Copy template failed: {}", e),
                }
            }
            Action::DeleteTemplate(id) => {
                self.commit();
                match self.templates.delete(&id) {
                    Ok(current_changed) => {
                        announce(TemplateEvent::Deleted { id });
                        self.persist = true;
                        if current_changed {
                            self.switched(effects);
                        }
                    }
                    Err(TemplateError::LastTemplate) => {
                        effects.push(Effect::Notice(NoticeEvent::warning("至少保留一个模板")));
                    }
                    Err(e) => tracing::warn!("Delete template failed: {}", e),
                }
            }
            Action::RenameTemplate { id, name } => match self.templates.rename(&id, &name) {
                Ok(()) => self.persist = true,
                Err(e) => effects.push(Effect::Notice(NoticeEvent::warning(e.to_string()))),
            },
            Action::SwitchTemplate(id) => {
                self.commit();
                match self.templates.set_current(&id) {
                    Ok(true) => self.switched(effects),
                    Ok(false) => {}
                    Err(e) => tracing::warn!("Switch template failed: {}", e),
                }
            }
            Action::LinkView {
                template_id,
                view_id,
            } => match self.templates.link_view(&template_id, &view_id) {
                Ok(()) => self.persist = true,
                Err(e) => tracing::warn!("Link view failed: {}", e),
            },
            Action::UnlinkView {
                template_id,
                view_id,
            } => match self.templates.unlink_view(&template_id, &view_id) {
                Ok(()) => self.persist = true,
                Err(e) => tracing::warn!("Unlink view failed: {}", e),
            },
            Action::ViewChanged(view_id) => {
                self.current_view_id = Some(view_id.clone());
                self.auto_switch(&view_id, queue);
            }
            Action::ImportTemplates(templates) => {
                self.dirty = false;
                let count = templates.len();
                self.templates.replace_all(templates);
                if self.templates.is_empty() {
                    self.canvas.set_layout(Default::default());
                    self.settings = GlobalSettings::default();
                    self.canvas.exit_draw_mode();
                    self.view = ActiveView::Edit;
                    effects.push(Effect::ReloadData { force: true });
                } else {
                    self.switched(effects);
                    self.view = if self.is_locked() {
                        ActiveView::Preview
                    } else {
                        ActiveView::Edit
                    };
                }
                tracing::info!("Imported {} templates", count);
                announce(TemplateEvent::Imported { count });
                self.persist = true;
            }
        }
    }

    fn structure_scale(&self) -> f64 {
        if self.settings.structure_scale > 0.0 {
            self.settings.structure_scale
        } else {
            BASE_STRUCTURE_SCALE
        }
    }

    fn rescale(&mut self, current: f64, next: f64) {
        self.canvas.layout_mut().scale_all(next / current);
        self.settings.structure_scale = next;
        self.dirty = true;
    }

    fn apply_lock(&mut self, queue: &mut VecDeque<Action>) {
        self.view = ActiveView::Preview;
        self.tab = SideTab::Global;
        self.canvas.exit_draw_mode();
        self.canvas.selection_mut().clear();
        if let Some(view_id) = self.current_view_id.clone() {
            self.auto_switch(&view_id, queue);
        }
    }

    fn apply_unlock(&mut self) {
        if self.view == ActiveView::Preview {
            self.view = ActiveView::Edit;
        }
        if self.tab == SideTab::Global {
            self.tab = SideTab::Components;
        }
        self.canvas.exit_draw_mode();
        self.canvas.selection_mut().clear();
    }

    fn auto_switch(&mut self, view_id: &str, queue: &mut VecDeque<Action>) {
        let Some(target) = self.templates.find_by_view(view_id) else {
            return;
        };
        if self.templates.current_id() != Some(target.id.as_str()) {
            tracing::info!("View {} is linked to template {}", view_id, target.name);
            queue.push_back(Action::SwitchTemplate(target.id.clone()));
        }
    }

    /// Loads the newly current template and reports the switch.
    fn switched(&mut self, effects: &mut Vec<Effect>) {
        self.load_current();
        if let Some(current) = self.templates.current() {
            announce(TemplateEvent::Switched {
                id: current.id.clone(),
                name: current.name.clone(),
            });
            effects.push(Effect::TemplateSwitched {
                id: current.id.clone(),
            });
        }
        effects.push(Effect::ReloadData { force: true });
    }

    /// Replaces the workspace with a copy of the current template. The
    /// preview lock is a workspace-wide flag and survives the switch.
    fn load_current(&mut self) {
        let locked = self.settings.is_preview_locked;
        let (settings, layout) = self
            .templates
            .current()
            .map(|t| (t.settings.clone(), t.layout.clone()))
            .unwrap_or_default();

        self.canvas.exit_draw_mode();
        self.canvas.set_layout(layout);
        self.settings = settings;
        if self.settings.structure_scale <= 0.0 {
            self.settings.structure_scale = BASE_STRUCTURE_SCALE;
        }
        self.settings.is_preview_locked = locked;
        self.dirty = false;

        if locked {
            self.view = ActiveView::Preview;
            self.tab = SideTab::Global;
        } else if self.view == ActiveView::Preview {
            self.view = ActiveView::Edit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;

    #[test]
    fn test_insert_marks_persist() {
        let mut state = DesignerState::default();
        let effects = state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Title)));
        assert_eq!(effects, vec![Effect::Persist]);
        assert_eq!(state.canvas().layout().len(), 1);
        assert_eq!(state.tab(), SideTab::Properties);
        let saved = state.templates().current().expect("current");
        assert_eq!(saved.layout.len(), 1);
    }

    #[test]
    fn test_selection_changes_do_not_persist() {
        let mut state = DesignerState::default();
        state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Title)));
        assert!(state.dispatch(Action::ClearSelection).is_empty());
        assert!(state.dispatch(Action::SelectAll).is_empty());
    }

    #[test]
    fn test_pen_enters_path_drawing() {
        let mut state = DesignerState::default();
        let effects = state.dispatch(Action::Insert(CatalogItem::Pen));
        assert!(state.canvas().is_draw_mode());
        assert_eq!(state.canvas().draw.kind, DrawKind::Path);
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
    }

    #[test]
    fn test_scale_and_reset() {
        let mut state = DesignerState::default();
        state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::TextRow)));
        state.dispatch(Action::ScaleCanvas(1));
        assert_eq!(state.settings().structure_scale, 110.0);
        let effects = state.dispatch(Action::ResetScale);
        assert_eq!(state.settings().structure_scale, 100.0);
        assert!(effects.contains(&Effect::Persist));
        let frame = state
            .canvas()
            .layout()
            .iter()
            .next()
            .and_then(|c| c.frame().copied())
            .expect("frame");
        assert_eq!((frame.x, frame.y, frame.w, frame.h), (40.0, 100.0, 300.0, 30.0));
    }

    #[test]
    fn test_reset_from_minimum_scale_restores_layout() {
        let mut state = DesignerState::default();
        state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::TextRow)));
        for _ in 0..20 {
            state.dispatch(Action::ScaleCanvas(-1));
        }
        assert_eq!(state.settings().structure_scale, 10.0);
        state.dispatch(Action::ResetScale);
        let frame = state
            .canvas()
            .layout()
            .iter()
            .next()
            .and_then(|c| c.frame().copied())
            .expect("frame");
        for (got, want) in [(frame.x, 40.0), (frame.y, 100.0), (frame.w, 300.0), (frame.h, 30.0)] {
            assert!((got - want).abs() < 1e-3, "{got} != {want}");
        }
    }

    #[test]
    fn test_scale_on_empty_layout_is_noop() {
        let mut state = DesignerState::default();
        assert!(state.dispatch(Action::ScaleCanvas(1)).is_empty());
        assert_eq!(state.settings().structure_scale, 100.0);
    }
}
