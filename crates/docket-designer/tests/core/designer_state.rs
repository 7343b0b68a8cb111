use docket_core::{NoticeLevel, Rect};
use docket_designer::{
    Action, ActiveView, Axis, CatalogItem, Component, ComponentKind, Content, DesignerState,
    Effect, PointerEvent, PointerTarget, SideTab, Style, Template, TemplateStore,
};

fn two_template_state() -> (DesignerState, String, String) {
    let mut state = DesignerState::default();
    let first = state.templates().current_id().map(str::to_string).expect("default");
    state.dispatch(Action::AddTemplate(Some("B".to_string())));
    let second = state.templates().current_id().map(str::to_string).expect("added");
    (state, first, second)
}

#[test]
fn test_preview_lock_forces_view_and_tab() {
    let mut state = DesignerState::default();
    state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::TextRow)));
    assert_eq!(state.canvas().selection().len(), 1);

    let effects = state.dispatch(Action::SetPreviewLock(true));
    assert!(effects.contains(&Effect::Persist));
    assert_eq!(state.view(), ActiveView::Preview);
    assert_eq!(state.tab(), SideTab::Global);
    assert!(state.canvas().selection().is_empty());

    state.dispatch(Action::SetView(ActiveView::Edit));
    state.dispatch(Action::SetTab(SideTab::Components));
    state.dispatch(Action::EnterDrawMode);
    assert_eq!(state.view(), ActiveView::Preview);
    assert_eq!(state.tab(), SideTab::Global);
    assert!(!state.canvas().is_draw_mode());

    state.dispatch(Action::PointerDown {
        event: PointerEvent::new(0.0, 0.0),
        target: PointerTarget::Canvas,
    });
    assert!(state.canvas().selection().is_empty());

    state.dispatch(Action::SetPreviewLock(false));
    assert_eq!(state.view(), ActiveView::Edit);
    assert_eq!(state.tab(), SideTab::Components);
}

#[test]
fn test_pointer_input_ignored_in_preview_view() {
    let mut state = DesignerState::default();
    state.dispatch(Action::SetView(ActiveView::Preview));
    state.dispatch(Action::EnterDrawMode);
    state.dispatch(Action::PointerDown {
        event: PointerEvent::new(10.0, 10.0),
        target: PointerTarget::Canvas,
    });
    assert!(state.canvas().layout().is_empty());
}

#[test]
fn test_switch_keeps_lock_and_workspace_edits() {
    let (mut state, first, second) = two_template_state();
    state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Title)));
    state.dispatch(Action::SetPreviewLock(true));

    let effects = state.dispatch(Action::SwitchTemplate(first.clone()));
    assert!(effects.contains(&Effect::TemplateSwitched { id: first.clone() }));
    assert!(effects.contains(&Effect::ReloadData { force: true }));
    assert!(state.is_locked());
    assert!(state.canvas().layout().is_empty());

    state.dispatch(Action::SwitchTemplate(second));
    assert_eq!(state.canvas().layout().len(), 1);
    assert!(state.is_locked());
}

#[test]
fn test_view_change_auto_switches_template() {
    let (mut state, first, _second) = two_template_state();
    state.dispatch(Action::LinkView {
        template_id: first.clone(),
        view_id: "view-a".to_string(),
    });

    let effects = state.dispatch(Action::ViewChanged("view-a".to_string()));
    assert_eq!(state.templates().current_id(), Some(first.as_str()));
    assert!(effects.contains(&Effect::TemplateSwitched { id: first }));
    assert_eq!(state.current_view_id(), Some("view-a"));

    assert!(!state
        .dispatch(Action::ViewChanged("unlinked".to_string()))
        .iter()
        .any(|e| matches!(e, Effect::TemplateSwitched { .. })));
}

#[test]
fn test_locking_switches_to_linked_template() {
    let (mut state, first, second) = two_template_state();
    state.dispatch(Action::LinkView {
        template_id: first.clone(),
        view_id: "v".to_string(),
    });
    state.dispatch(Action::ViewChanged("v".to_string()));
    assert_eq!(state.templates().current_id(), Some(first.as_str()));
    state.dispatch(Action::SwitchTemplate(second));

    state.dispatch(Action::SetPreviewLock(true));
    assert_eq!(state.templates().current_id(), Some(first.as_str()));
}

#[test]
fn test_delete_last_template_warns() {
    let mut state = DesignerState::default();
    let id = state.templates().current_id().map(str::to_string).expect("default");
    let effects = state.dispatch(Action::DeleteTemplate(id));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notice(n)] if n.level == NoticeLevel::Warning
    ));
    assert_eq!(state.templates().len(), 1);
}

#[test]
fn test_center_path_warns_and_table_vertical_warns() {
    let mut state = DesignerState::default();
    state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Table)));
    let effects = state.dispatch(Action::CenterActive(Axis::Vertical));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notice(n)] if n.message == "表格组件建议仅使用水平居中"
    ));

    let effects = state.dispatch(Action::CenterActive(Axis::Horizontal));
    assert_eq!(effects, vec![Effect::Persist]);
    let frame = state
        .canvas()
        .active_component()
        .and_then(|c| c.frame().copied())
        .expect("table frame");
    assert_eq!(frame.x, 40.0);
}

#[test]
fn test_move_canvas_uses_step() {
    let mut state = DesignerState::default();
    state.dispatch(Action::UpdateComponent(Component::framed(
        "missing",
        Style::default(),
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Content::Rectangle,
    )));
    assert!(state.dispatch(Action::MoveCanvas { x_dir: 1, y_dir: 0 }).is_empty());

    state.dispatch(Action::Insert(CatalogItem::Component(ComponentKind::Rectangle)));
    state.ops.move_step = 5.0;
    state.dispatch(Action::MoveCanvas { x_dir: -1, y_dir: 2 });
    let frame = state
        .canvas()
        .active_component()
        .and_then(|c| c.frame().copied())
        .expect("rect");
    assert_eq!((frame.x, frame.y), (35.0, 50.0));
}

#[test]
fn test_import_replaces_store() {
    let mut state = DesignerState::default();
    let mut imported = Template::new("导入");
    imported.settings.paper_width = 500.0;
    let id = imported.id.clone();

    let effects = state.dispatch(Action::ImportTemplates(vec![imported]));
    assert!(effects.contains(&Effect::TemplateSwitched { id: id.clone() }));
    assert!(effects.contains(&Effect::Persist));
    assert_eq!(state.templates().current_id(), Some(id.as_str()));
    assert_eq!(state.settings().paper_width, 500.0);

    state.dispatch(Action::ImportTemplates(Vec::new()));
    assert!(state.templates().is_empty());
    assert_eq!(state.settings().paper_width, 794.0);
}

#[test]
fn test_store_loaded_at_startup() {
    let mut template = Template::new("Saved");
    template.settings.is_preview_locked = true;
    let state = DesignerState::new(TemplateStore::from_templates(vec![template]));
    assert!(state.is_locked());
    assert_eq!(state.view(), ActiveView::Preview);
}
