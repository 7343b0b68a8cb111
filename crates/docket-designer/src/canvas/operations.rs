//! Pointer-move handlers for each interaction mode.

use std::collections::HashMap;

use docket_core::{Point, Rect};

use super::types::{DrawKind, Handle};
use super::Canvas;
use crate::global_settings::GlobalSettings;
use crate::model::{ComponentId, Geometry, LineShape, LockDirection, Shape};
use crate::snap::{snap_line_endpoint, snap_to_alignment, AlignmentTargets, Guide, GuideKind};

/// Smallest width/height a resize can produce.
pub const MIN_COMPONENT_SIZE: f64 = 5.0;
/// Size an edge handle stops at before the opposite edge.
const HANDLE_STOP: f64 = 10.0;

impl Canvas {
    pub(super) fn draw_to(&mut self, id: &str, kind: DrawKind, point: Point) {
        match kind {
            DrawKind::Path => {
                if let Some(path) = self.layout.get_mut(id).and_then(|c| c.path_mut()) {
                    path.line_to(point);
                }
            }
            DrawKind::Line => {
                let Some(line) = self.layout.get(id).and_then(|c| c.line()).copied() else {
                    return;
                };
                let lock = self.draw.lock_direction;
                let mut target = point;
                match lock {
                    LockDirection::Horizontal => target.y = line.start.y,
                    LockDirection::Vertical => target.x = line.start.x,
                    LockDirection::None => {}
                }
                let end = self.snap_endpoint(id, line.start, target, lock);
                if let Some(l) = self.layout.get_mut(id).and_then(|c| c.line_mut()) {
                    l.end = end;
                }
            }
        }
    }

    /// Runs the intersection snap against every other line and records
    /// the resulting guides and indicator.
    fn snap_endpoint(&mut self, id: &str, fixed: Point, moving: Point, lock: LockDirection) -> Point {
        let others: Vec<LineShape> = self.layout.lines_except(id).copied().collect();
        let snap = snap_line_endpoint(
            fixed,
            moving,
            &others,
            lock,
            &mut self.locked_point,
            &self.snap,
        );
        self.guides = snap.guides;
        self.snap_indicator = snap.indicator;
        snap.point
    }

    pub(super) fn marquee_to(&mut self, origin: Point, base: &[ComponentId], point: Point) {
        let rect = Rect::from_corners(origin, point);
        self.marquee = Some(rect);

        let mut ids = base.to_vec();
        ids.extend(
            self.layout
                .iter()
                .filter(|c| rect.overlaps(&c.bounds()))
                .map(|c| c.id.clone()),
        );
        self.selection.set(ids);
    }

    /// Moves a lone line by the pointer delta; its midpoint jumps to the
    /// paper center when close.
    pub(super) fn drag_single_line(
        &mut self,
        id: &str,
        snapshots: &HashMap<ComponentId, Geometry>,
        (mut dx, mut dy): (f64, f64),
        settings: &GlobalSettings,
    ) {
        let Some(Geometry::Line(start, end)) = snapshots.get(id) else {
            tracing::debug!("No line snapshot for {}", id);
            return;
        };
        let paper = settings.paper();
        let threshold = self.snap.line_center_threshold;
        let center = Point::new(
            (start.x + end.x) / 2.0 + dx,
            (start.y + end.y) / 2.0 + dy,
        );

        self.guides.clear();
        if (center.x - paper.width / 2.0).abs() < threshold {
            dx += paper.width / 2.0 - center.x;
            self.guides
                .vertical
                .push(Guide::new(paper.width / 2.0, GuideKind::Canvas));
        }
        if (center.y - paper.height / 2.0).abs() < threshold {
            dy += paper.height / 2.0 - center.y;
            self.guides
                .horizontal
                .push(Guide::new(paper.height / 2.0, GuideKind::Canvas));
        }

        if let Some(line) = self.layout.get_mut(id).and_then(|c| c.line_mut()) {
            line.start = start.offset(dx, dy).rounded();
            line.end = end.offset(dx, dy).rounded();
        }
    }

    /// Moves every selected component by one effective delta.
    ///
    /// The reference component's candidate position goes through the
    /// alignment snap; the snapped offset is then applied to each
    /// component's own start geometry. Paths do not follow.
    pub(super) fn drag_selection(
        &mut self,
        reference_start: Rect,
        snapshots: &HashMap<ComponentId, Geometry>,
        (dx, dy): (f64, f64),
        settings: &GlobalSettings,
    ) {
        let candidate = Rect::new(
            reference_start.x + dx,
            reference_start.y + dy,
            reference_start.w,
            reference_start.h,
        );

        let position = if self.snap.enabled {
            let targets =
                AlignmentTargets::collect(&self.layout, self.selection.ids(), settings.paper());
            let snapped = snap_to_alignment(candidate, &targets, self.snap.align_threshold);
            self.guides = snapped.guides;
            snapped.position
        } else {
            self.guides.clear();
            candidate.origin()
        };
        let (fdx, fdy) = (position.x - reference_start.x, position.y - reference_start.y);

        for component in self.layout.iter_mut() {
            let Some(start) = snapshots.get(&component.id) else {
                continue;
            };
            match (&mut component.shape, start) {
                (Shape::Framed(f), Geometry::Frame(r)) => {
                    f.frame.x = (r.x + fdx).round();
                    f.frame.y = (r.y + fdy).round();
                }
                (Shape::Line(l), Geometry::Line(s, e)) => {
                    l.start = s.offset(fdx, fdy).rounded();
                    l.end = e.offset(fdx, fdy).rounded();
                }
                _ => {}
            }
        }
    }

    pub(super) fn resize(&mut self, id: &str, handle: Handle, start: &Geometry, (dx, dy): (f64, f64)) {
        match start {
            Geometry::Frame(r) => {
                let Some(component) = self.layout.get_mut(id) else {
                    return;
                };
                let is_table = component.is_table();
                let resized = resize_frame(*r, handle, dx, dy, is_table);
                if let Some(frame) = component.frame_mut() {
                    *frame = resized;
                }
            }
            Geometry::Line(s, e) => self.move_line_endpoint(id, handle, *s, *e, dx, dy),
            Geometry::Path(_) => {}
        }
    }

    fn move_line_endpoint(&mut self, id: &str, handle: Handle, s: Point, e: Point, dx: f64, dy: f64) {
        let Some(line) = self.layout.get(id).and_then(|c| c.line()).copied() else {
            return;
        };
        let moving_start = handle == Handle::LineStart;
        let (initial, fixed) = if moving_start {
            (s, line.end)
        } else {
            (e, line.start)
        };

        let mut target = initial.offset(dx, dy).rounded();
        match line.lock {
            LockDirection::Horizontal => target.y = fixed.y,
            LockDirection::Vertical => target.x = fixed.x,
            LockDirection::None => {}
        }
        let mut snapped = self.snap_endpoint(id, fixed, target, line.lock);
        match line.lock {
            LockDirection::Horizontal => snapped.y = fixed.y,
            LockDirection::Vertical => snapped.x = fixed.x,
            LockDirection::None => {}
        }

        if let Some(l) = self.layout.get_mut(id).and_then(|c| c.line_mut()) {
            if moving_start {
                l.start = snapped;
            } else {
                l.end = snapped;
            }
        }
    }
}

/// Applies a handle drag to a box.
///
/// Right/bottom handles grow from the fixed edge, left/top handles move
/// the edge but stop short of the opposite one. Heights of tables are
/// never touched. The result is rounded and never smaller than
/// [`MIN_COMPONENT_SIZE`].
pub fn resize_frame(start: Rect, handle: Handle, dx: f64, dy: f64, is_table: bool) -> Rect {
    let mut r = start;
    if handle.moves_right() {
        r.w = (start.w + dx).max(HANDLE_STOP);
    }
    if handle.moves_left() {
        let d = dx.min(start.w - HANDLE_STOP);
        r.x += d;
        r.w -= d;
    }
    if !is_table {
        if handle.moves_bottom() {
            r.h = (start.h + dy).max(HANDLE_STOP);
        }
        if handle.moves_top() {
            let d = dy.min(start.h - HANDLE_STOP);
            r.y += d;
            r.h -= d;
        }
        r.h = r.h.max(MIN_COMPONENT_SIZE).round();
    }
    r.w = r.w.max(MIN_COMPONENT_SIZE).round();
    r.x = r.x.round();
    r.y = r.y.round();
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_handle_stops_before_right_edge() {
        let r = resize_frame(Rect::new(0.0, 0.0, 100.0, 50.0), Handle::Left, 500.0, 0.0, false);
        assert_eq!(r, Rect::new(90.0, 0.0, 10.0, 50.0));
    }

    #[test]
    fn test_table_height_is_fixed() {
        let r = resize_frame(Rect::new(0.0, 0.0, 100.0, 50.0), Handle::BottomRight, 10.0, 80.0, true);
        assert_eq!(r, Rect::new(0.0, 0.0, 110.0, 50.0));
    }

    #[test]
    fn test_tiny_frame_clamped() {
        let r = resize_frame(Rect::new(0.0, 0.0, 2.0, 2.0), Handle::Top, 0.0, 0.0, false);
        assert!(r.w >= MIN_COMPONENT_SIZE && r.h >= MIN_COMPONENT_SIZE);
    }
}
