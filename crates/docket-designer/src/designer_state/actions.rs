//! Actions accepted by [`DesignerState::dispatch`](super::DesignerState::dispatch)
//! and the follow-up effects it reports.

use docket_core::NoticeEvent;

use super::{ActiveView, SideTab};
use crate::canvas::{DrawSettings, PointerEvent, PointerTarget};
use crate::layout::Axis;
use crate::model::Component;
use crate::template_store::Template;
use crate::templates::CatalogItem;

#[derive(Debug, Clone)]
pub enum Action {
    PointerDown {
        event: PointerEvent,
        target: PointerTarget,
    },
    PointerMove(PointerEvent),
    PointerUp,
    EnterDrawMode,
    ExitDrawMode,
    SetDrawSettings(DrawSettings),
    /// On-screen zoom in percent.
    SetRenderScale(f64),
    Insert(CatalogItem),
    /// Replaces the component with the same id (property edits).
    UpdateComponent(Component),
    DeleteSelected,
    SelectAll,
    ClearSelection,
    MoveCanvas {
        x_dir: i32,
        y_dir: i32,
    },
    ScaleCanvas(i32),
    ResetScale,
    CenterContent(Axis),
    CenterActive(Axis),
    AlignLine(Axis),
    SetPaperSize {
        width: f64,
        height: f64,
    },
    SetFormulas(String),
    SetGroupingFields(Vec<String>),
    SetPreviewLock(bool),
    SetView(ActiveView),
    SetTab(SideTab),
    AddTemplate(Option<String>),
    CopyTemplate,
    DeleteTemplate(String),
    RenameTemplate {
        id: String,
        name: String,
    },
    SwitchTemplate(String),
    LinkView {
        template_id: String,
        view_id: String,
    },
    UnlinkView {
        template_id: String,
        view_id: String,
    },
    /// The host switched to another view.
    ViewChanged(String),
    ImportTemplates(Vec<Template>),
}

impl Action {
    pub(super) fn is_pointer(&self) -> bool {
        matches!(
            self,
            Action::PointerDown { .. } | Action::PointerMove(_) | Action::PointerUp
        )
    }
}

/// Follow-up work for the caller, in the order it should run.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The template store changed and should be written out.
    Persist,
    Notice(NoticeEvent),
    /// Grouped data must be rebuilt; `force` skips the unchanged-records check.
    ReloadData { force: bool },
    TemplateSwitched { id: String },
}
