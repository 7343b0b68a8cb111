//! Canvas interaction engine.
//!
//! Owns the layout being edited and the selection, and turns pointer
//! events into edits. Every handler runs to completion synchronously;
//! state that only lives for one pointer interaction is kept in a
//! [`Session`] created on pointer-down and dropped on pointer-up.

mod operations;
mod session;
mod types;

pub use operations::{resize_frame, MIN_COMPONENT_SIZE};
pub use types::{
    Cursor, DrawKind, DrawSettings, Handle, InteractionMode, PointerEvent, PointerTarget,
};

use std::collections::HashMap;

use docket_core::{distance, Point, Rect};

use crate::global_settings::GlobalSettings;
use crate::layout::Layout;
use crate::model::{new_id, Component, ComponentId, LineShape, PathData, Shape, Style};
use crate::selection_manager::SelectionManager;
use crate::snap::{Guides, SnapConfig};
use session::Session;

/// Extra pick distance around a line's stroke.
const LINE_HIT_SLOP: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct Canvas {
    layout: Layout,
    selection: SelectionManager,
    /// On-screen zoom in percent; pointer positions are divided by it.
    render_scale: f64,
    draw_mode: bool,
    pub draw: DrawSettings,
    pub snap: SnapConfig,
    session: Option<Session>,
    locked_point: Option<Point>,
    guides: Guides,
    snap_indicator: Option<Point>,
    marquee: Option<Rect>,
    cursor: Cursor,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl Canvas {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            selection: SelectionManager::new(),
            render_scale: 100.0,
            draw_mode: false,
            draw: DrawSettings::default(),
            snap: SnapConfig::default(),
            session: None,
            locked_point: None,
            guides: Guides::default(),
            snap_indicator: None,
            marquee: None,
            cursor: Cursor::Default,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Swaps in a new layout, dropping selection and any active session.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.selection.clear();
        self.reset_session();
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionManager {
        &mut self.selection
    }

    /// The primary selected component.
    pub fn active_component(&self) -> Option<&Component> {
        self.selection.primary().and_then(|id| self.layout.get(id))
    }

    pub fn mode(&self) -> InteractionMode {
        self.session
            .as_ref()
            .map(Session::mode)
            .unwrap_or_default()
    }

    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    pub fn snap_indicator(&self) -> Option<Point> {
        self.snap_indicator
    }

    pub fn marquee(&self) -> Option<Rect> {
        self.marquee
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn render_scale(&self) -> f64 {
        self.render_scale
    }

    pub fn set_render_scale(&mut self, percent: f64) {
        self.render_scale = percent;
    }

    pub fn is_draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn enter_draw_mode(&mut self) {
        self.draw_mode = true;
        self.selection.clear();
        self.cursor = Cursor::Crosshair;
    }

    pub fn exit_draw_mode(&mut self) {
        self.draw_mode = false;
        self.cursor = Cursor::Default;
    }

    /// Converts a paper-relative screen position into canvas units.
    pub fn to_canvas(&self, position: Point) -> Point {
        let scale = self.render_scale / 100.0;
        let scale = if scale == 0.0 { 1.0 } else { scale };
        position.scaled(1.0 / scale)
    }

    /// Topmost component under a canvas-space point.
    pub fn hit_test(&self, point: Point) -> PointerTarget {
        for component in self.layout.paint_order().into_iter().rev() {
            let hit = match &component.shape {
                Shape::Line(l) => {
                    let slop = component.style.stroke_width.unwrap_or(1.0) / 2.0 + LINE_HIT_SLOP;
                    segment_distance(point, l.start, l.end) <= slop
                }
                _ => {
                    let b = component.bounds();
                    point.x >= b.x && point.x <= b.right() && point.y >= b.y && point.y <= b.bottom()
                }
            };
            if hit {
                return PointerTarget::Component(component.id.clone());
            }
        }
        PointerTarget::Canvas
    }

    /// Appends a component and makes it the only selection.
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        let id = component.id.clone();
        self.layout.push(component);
        self.selection.select_only(id.clone());
        id
    }

    pub fn select_all(&mut self) {
        self.selection
            .set(self.layout.iter().map(|c| c.id.clone()));
    }

    /// Removes every selected component. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.layout.len();
        let selection = &self.selection;
        self.layout.retain(|c| !selection.contains(&c.id));
        self.selection.clear();
        before - self.layout.len()
    }

    /// Starts a pointer session.
    ///
    /// In draw mode a new line or path is created at the pointer. On
    /// empty canvas a marquee starts, clearing the selection unless the
    /// modifier is held. On a component the selection is updated, the
    /// geometry of every selected component is snapshotted and a drag or
    /// resize begins.
    pub fn pointer_down(
        &mut self,
        event: PointerEvent,
        target: PointerTarget,
        settings: &GlobalSettings,
    ) {
        self.locked_point = None;
        let point = self.to_canvas(event.position);

        if self.draw_mode {
            self.start_drawing(point, settings);
            return;
        }

        let (id, handle) = match target {
            PointerTarget::Canvas => {
                let base = if event.modifier {
                    self.selection.ids().to_vec()
                } else {
                    self.selection.clear();
                    Vec::new()
                };
                self.session = Some(Session::Marquee {
                    origin: point,
                    base,
                });
                return;
            }
            PointerTarget::Component(id) => (id, None),
            PointerTarget::Handle(id, handle) => (id, Some(handle)),
        };

        let Some(reference) = self.layout.get(&id).cloned() else {
            tracing::debug!("Pointer down on unknown component {}", id);
            return;
        };

        if event.modifier {
            if !self.selection.toggle(&id) && self.selection.is_empty() {
                return;
            }
        } else if !self.selection.contains(&id) {
            self.selection.select_only(id.clone());
        }

        let snapshots: HashMap<ComponentId, _> = self
            .layout
            .iter()
            .filter(|c| self.selection.contains(&c.id))
            .map(|c| (c.id.clone(), c.geometry()))
            .collect();
        let multi = self.selection.len() > 1;

        let resize_handle = match (handle, &reference.shape) {
            (Some(h), Shape::Line(_)) if h.is_line_endpoint() => {
                if multi {
                    tracing::debug!("Ignoring endpoint handle with {} selected", self.selection.len());
                    return;
                }
                Some(h)
            }
            (Some(h), Shape::Framed(_)) if !h.is_line_endpoint() => {
                if multi {
                    return;
                }
                Some(h)
            }
            _ => None,
        };

        match resize_handle {
            Some(handle) => {
                self.cursor = handle.cursor();
                self.session = Some(Session::Resizing {
                    origin: point,
                    id,
                    handle,
                    start: reference.geometry(),
                });
            }
            None => {
                self.cursor = Cursor::Move;
                self.session = Some(Session::Dragging {
                    origin: point,
                    reference_start: reference.bounds(),
                    single_line: reference.is_line() && !multi,
                    reference: id,
                    snapshots,
                });
            }
        }
    }

    fn start_drawing(&mut self, point: Point, settings: &GlobalSettings) {
        let ratio = if settings.structure_scale > 0.0 {
            settings.structure_scale / 100.0
        } else {
            1.0
        };
        let width = if self.draw.stroke_width > 0.0 {
            self.draw.stroke_width
        } else {
            1.0
        };
        let mut style = Style::stroke(width * ratio, &self.draw.stroke_color, self.draw.stroke_style);
        style.z_index = Some(crate::model::DRAWING_Z_INDEX);

        let shape = match self.draw.kind {
            DrawKind::Line => {
                let mut line = LineShape::new(point, point);
                line.lock = self.draw.lock_direction;
                Shape::Line(line)
            }
            DrawKind::Path => {
                style.fill_color = Some("none".to_string());
                Shape::Path(PathData::starting_at(point))
            }
        };

        let id = new_id();
        self.layout.push(Component::new(id.clone(), style, shape));
        tracing::debug!("Started drawing {:?} {}", self.draw.kind, id);
        self.session = Some(Session::Drawing {
            id,
            kind: self.draw.kind,
        });
    }

    /// Advances the active session. Does nothing when idle.
    pub fn pointer_move(&mut self, event: PointerEvent, settings: &GlobalSettings) {
        let point = self.to_canvas(event.position);
        let Some(session) = self.session.take() else {
            return;
        };
        match &session {
            Session::Drawing { id, kind } => self.draw_to(id, *kind, point),
            Session::Marquee { origin, base } => self.marquee_to(*origin, base, point),
            Session::Dragging {
                origin,
                reference_start,
                snapshots,
                single_line,
                reference,
            } => {
                let delta = (point.x - origin.x, point.y - origin.y);
                if *single_line {
                    self.drag_single_line(reference, snapshots, delta, settings);
                } else {
                    self.drag_selection(*reference_start, snapshots, delta, settings);
                }
            }
            Session::Resizing {
                origin,
                id,
                handle,
                start,
            } => {
                let delta = (point.x - origin.x, point.y - origin.y);
                self.resize(id, *handle, start, delta);
            }
        }
        self.session = Some(session);
    }

    /// Ends the active session and clears guides, snap lock, marquee and
    /// cursor. Returns the mode that ended.
    pub fn pointer_up(&mut self) -> InteractionMode {
        let mode = self.mode();
        self.reset_session();
        mode
    }

    fn reset_session(&mut self) {
        self.session = None;
        self.locked_point = None;
        self.guides.clear();
        self.snap_indicator = None;
        self.marquee = None;
        self.cursor = if self.draw_mode {
            Cursor::Crosshair
        } else {
            Cursor::Default
        };
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let len2 = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if len2 == 0.0 {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len2).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
}
