//! Snapping used while dragging boxes and moving line endpoints.
//!
//! Two mechanisms live here:
//! - alignment snap: a dragged box aligns its start/center/end edges with
//!   the paper and with other components;
//! - line intersection snap: a moving line endpoint locks onto the
//!   crossing with another line, with hysteresis so it does not jitter.

use docket_core::{distance, line_intersection, Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::global_settings::Paper;
use crate::layout::Layout;
use crate::model::{LineShape, LockDirection};

/// Snap thresholds in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Alignment snap on/off for box drags.
    pub enabled: bool,
    pub align_threshold: f64,
    /// Distance at which a dragged line's midpoint jumps to the paper center.
    pub line_center_threshold: f64,
    pub intersection_entrance: f64,
    pub intersection_exit: f64,
    /// Distance at which a free endpoint aligns with its fixed endpoint.
    pub axis_guide_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            align_threshold: 4.0,
            line_center_threshold: 5.0,
            intersection_entrance: 15.0,
            intersection_exit: 50.0,
            axis_guide_threshold: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideKind {
    Canvas,
    #[serde(rename = "comp")]
    Component,
}

/// A transient alignment indicator at `pos` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub pos: f64,
    pub kind: GuideKind,
}

impl Guide {
    pub fn new(pos: f64, kind: GuideKind) -> Self {
        Self { pos, kind }
    }
}

/// Guides currently shown. `vertical` guides are x positions,
/// `horizontal` guides are y positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    pub vertical: SmallVec<[Guide; 2]>,
    pub horizontal: SmallVec<[Guide; 2]>,
}

impl Guides {
    pub fn clear(&mut self) {
        self.vertical.clear();
        self.horizontal.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Candidate alignment positions per axis.
#[derive(Debug, Clone, Default)]
pub struct AlignmentTargets {
    pub x: Vec<Guide>,
    pub y: Vec<Guide>,
}

impl AlignmentTargets {
    /// Paper edges and center, plus the start/center/end edges of every
    /// component that is not selected and not a line or path. Tables only
    /// contribute their top edge vertically.
    pub fn collect(layout: &Layout, selected: &[String], paper: Paper) -> Self {
        let mut targets = Self {
            x: vec![
                Guide::new(0.0, GuideKind::Canvas),
                Guide::new(paper.width / 2.0, GuideKind::Canvas),
                Guide::new(paper.width, GuideKind::Canvas),
            ],
            y: vec![
                Guide::new(0.0, GuideKind::Canvas),
                Guide::new(paper.height / 2.0, GuideKind::Canvas),
                Guide::new(paper.height, GuideKind::Canvas),
            ],
        };

        for component in layout {
            if selected.contains(&component.id) {
                continue;
            }
            let Some(frame) = component.frame() else {
                continue;
            };
            targets.x.extend(
                edges(frame.x, frame.w)
                    .into_iter()
                    .map(|p| Guide::new(p, GuideKind::Component)),
            );
            if component.is_table() {
                targets.y.push(Guide::new(frame.y, GuideKind::Component));
            } else {
                targets.y.extend(
                    edges(frame.y, frame.h)
                        .into_iter()
                        .map(|p| Guide::new(p, GuideKind::Component)),
                );
            }
        }
        targets
    }
}

fn edges(start: f64, size: f64) -> [f64; 3] {
    [start, start + size / 2.0, start + size]
}

/// Signed offset to the closest target within `threshold`, if any.
fn nearest_target(targets: &[Guide], points: [f64; 3], threshold: f64) -> Option<(f64, Guide)> {
    let mut best: Option<(f64, Guide)> = None;
    let mut min_abs = threshold + 1.0;
    for target in targets {
        for p in points {
            let diff = target.pos - p;
            if diff.abs() < min_abs {
                min_abs = diff.abs();
                best = Some((diff, *target));
            }
        }
    }
    best.filter(|(diff, _)| diff.abs() <= threshold)
}

/// Result of aligning a dragged box.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignSnap {
    pub position: Point,
    pub guides: Guides,
}

/// Shifts `candidate` per axis onto the nearest alignment target.
pub fn snap_to_alignment(candidate: Rect, targets: &AlignmentTargets, threshold: f64) -> AlignSnap {
    let mut position = candidate.origin();
    let mut guides = Guides::default();

    if let Some((dx, guide)) = nearest_target(&targets.x, edges(candidate.x, candidate.w), threshold) {
        position.x += dx;
        guides.vertical.push(guide);
    }
    if let Some((dy, guide)) = nearest_target(&targets.y, edges(candidate.y, candidate.h), threshold) {
        position.y += dy;
        guides.horizontal.push(guide);
    }

    AlignSnap { position, guides }
}

/// Result of snapping a moving line endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSnap {
    pub point: Point,
    /// Locked intersection shown as a snap marker.
    pub indicator: Option<Point>,
    pub guides: Guides,
}

/// Snaps the moving endpoint of the segment `fixed -> moving`.
///
/// `locked` carries the snap-lock between pointer moves. While locked the
/// locked point wins until the pointer moves more than the exit threshold
/// away from it. A new lock is taken when the nearest intersection with
/// one of `others` is closer than the entrance threshold. Intersections
/// off a locked axis by more than one unit are ignored.
pub fn snap_line_endpoint<'a>(
    fixed: Point,
    moving: Point,
    others: impl IntoIterator<Item = &'a LineShape>,
    lock: LockDirection,
    locked: &mut Option<Point>,
    config: &SnapConfig,
) -> LineSnap {
    let mut nearest: Option<(f64, Point)> = None;
    for other in others {
        let Some(hit) = line_intersection(fixed, moving, other.start, other.end) else {
            continue;
        };
        match lock {
            LockDirection::Horizontal if (hit.y - moving.y).abs() > 1.0 => continue,
            LockDirection::Vertical if (hit.x - moving.x).abs() > 1.0 => continue,
            _ => {}
        }
        let dist = distance(hit, moving);
        if nearest.map_or(true, |(best, _)| dist < best) {
            nearest = Some((dist, hit));
        }
    }

    if let Some(point) = *locked {
        if distance(point, moving) > config.intersection_exit {
            tracing::trace!("Releasing snap lock at ({}, {})", point.x, point.y);
            *locked = None;
        } else {
            return LineSnap {
                point,
                indicator: Some(point),
                guides: Guides::default(),
            };
        }
    }

    if let Some((dist, hit)) = nearest {
        if dist < config.intersection_entrance {
            *locked = Some(hit);
            return LineSnap {
                point: hit,
                indicator: Some(hit),
                guides: Guides::default(),
            };
        }
    }

    let mut point = moving;
    let mut guides = Guides::default();
    if lock == LockDirection::None {
        if (moving.y - fixed.y).abs() < config.axis_guide_threshold {
            point.y = fixed.y;
            guides
                .horizontal
                .push(Guide::new(fixed.y, GuideKind::Component));
        }
        if (moving.x - fixed.x).abs() < config.axis_guide_threshold {
            point.x = fixed.x;
            guides
                .vertical
                .push(Guide::new(fixed.x, GuideKind::Component));
        }
    }
    LineSnap {
        point,
        indicator: None,
        guides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Content, Style};

    fn cross() -> LineShape {
        LineShape::new(Point::new(100.0, 0.0), Point::new(100.0, 200.0))
    }

    #[test]
    fn test_alignment_snaps_to_paper_center() {
        let layout = Layout::new();
        let targets = AlignmentTargets::collect(&layout, &[], Paper::new(800.0, 1000.0));
        // center at 398 + 0 -> within 4 of 400
        let snap = snap_to_alignment(Rect::new(348.0, 123.0, 100.0, 50.0), &targets, 4.0);
        assert_eq!(snap.position, Point::new(350.0, 123.0));
        assert_eq!(snap.guides.vertical[0], Guide::new(400.0, GuideKind::Canvas));
        assert!(snap.guides.horizontal.is_empty());
    }

    #[test]
    fn test_alignment_ignores_selected_and_uses_table_top_only() {
        let layout = Layout::from_components(vec![
            Component::framed(
                "sel",
                Style::default(),
                Rect::new(300.0, 300.0, 10.0, 10.0),
                Content::Rectangle,
            ),
            Component::framed(
                "table",
                Style::default(),
                Rect::new(500.0, 600.0, 100.0, 200.0),
                Content::Table(Default::default()),
            ),
        ]);
        let targets =
            AlignmentTargets::collect(&layout, &["sel".to_string()], Paper::new(2000.0, 2000.0));
        assert!(!targets.x.iter().any(|g| g.pos == 300.0));
        assert!(targets.y.iter().any(|g| g.pos == 600.0));
        assert!(!targets.y.iter().any(|g| g.pos == 800.0));
    }

    #[test]
    fn test_intersection_lock_hysteresis() {
        let config = SnapConfig::default();
        let mut locked = None;
        let others = [cross()];
        let fixed = Point::new(0.0, 100.0);

        // pointer at x=110 crosses the vertical line at x=100, 10 units away
        let snap = snap_line_endpoint(
            fixed,
            Point::new(110.0, 130.0),
            &others,
            LockDirection::None,
            &mut locked,
            &config,
        );
        assert!(locked.is_some());
        let lock_point = snap.point;

        // still within exit distance: stays locked
        let snap = snap_line_endpoint(
            fixed,
            Point::new(140.0, 140.0),
            &others,
            LockDirection::None,
            &mut locked,
            &config,
        );
        assert_eq!(snap.point, lock_point);

        // far away: released and no intersection within entrance
        let snap = snap_line_endpoint(
            fixed,
            Point::new(400.0, 400.0),
            &others,
            LockDirection::None,
            &mut locked,
            &config,
        );
        assert!(locked.is_none());
        assert_eq!(snap.point, Point::new(400.0, 400.0));
    }

    #[test]
    fn test_axis_guide_when_unlocked() {
        let mut locked = None;
        let snap = snap_line_endpoint(
            Point::new(0.0, 50.0),
            Point::new(300.0, 56.0),
            std::iter::empty(),
            LockDirection::None,
            &mut locked,
            &SnapConfig::default(),
        );
        assert_eq!(snap.point, Point::new(300.0, 50.0));
        assert_eq!(snap.guides.horizontal.len(), 1);

        let snap = snap_line_endpoint(
            Point::new(0.0, 50.0),
            Point::new(300.0, 56.0),
            std::iter::empty(),
            LockDirection::Vertical,
            &mut locked,
            &SnapConfig::default(),
        );
        assert_eq!(snap.point, Point::new(300.0, 56.0));
        assert!(snap.guides.is_empty());
    }
}
