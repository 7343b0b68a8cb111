//! The ordered component list and operations that act on it as a whole.

use docket_core::{Point, Rect, TemplateError};
use serde::{Deserialize, Serialize};

use crate::global_settings::Paper;
use crate::model::{Component, Content, LineShape, Shape};
use crate::serialization::ComponentRecord;

/// Direction of a centering or straightening operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Ordered sequence of components. Order is the base paint order; an
/// explicit z-index takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<serde_json::Value>", into = "Vec<ComponentRecord>")]
pub struct Layout {
    components: Vec<Component>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the component with the same id, returning false when absent.
    pub fn replace(&mut self, component: Component) -> bool {
        match self.get_mut(&component.id) {
            Some(slot) => {
                *slot = component;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Component> {
        let index = self.components.iter().position(|c| c.id == id)?;
        Some(self.components.remove(index))
    }

    pub fn retain<F: FnMut(&Component) -> bool>(&mut self, f: F) {
        self.components.retain(f);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Component> {
        self.components.iter_mut()
    }

    /// Components sorted by z-index, ties kept in layout order.
    pub fn paint_order(&self) -> Vec<&Component> {
        let mut ordered: Vec<&Component> = self.components.iter().collect();
        ordered.sort_by_key(|c| c.z_index());
        ordered
    }

    /// Line components other than `exclude`.
    pub fn lines_except<'a>(&'a self, exclude: &'a str) -> impl Iterator<Item = &'a LineShape> {
        self.components
            .iter()
            .filter(move |c| c.id != exclude)
            .filter_map(|c| c.line())
    }

    /// Translates every component. Box and line coordinates are rounded,
    /// path points move exactly.
    pub fn move_all(&mut self, dx: f64, dy: f64) {
        for component in &mut self.components {
            match &mut component.shape {
                Shape::Framed(f) => {
                    f.frame.x = (f.frame.x + dx).round();
                    f.frame.y = (f.frame.y + dy).round();
                }
                Shape::Line(l) => {
                    l.start = l.start.offset(dx, dy).rounded();
                    l.end = l.end.offset(dx, dy).rounded();
                }
                Shape::Path(p) => p.translate(dx, dy),
            }
        }
    }

    /// Proportionally rescales every component by `ratio`.
    ///
    /// Geometry is kept unrounded so scaling by `r` and then `1 / r`
    /// restores it exactly; whole units are applied when rendering. Tables
    /// keep their stored height and scale their row height and data font
    /// size instead, since their rendered height follows from the row
    /// count. Font sizes and stroke widths scale for every component.
    pub fn scale_all(&mut self, ratio: f64) {
        for component in &mut self.components {
            component.style.scale(ratio);
            match &mut component.shape {
                Shape::Framed(f) => {
                    f.frame.x = tidy(f.frame.x * ratio);
                    f.frame.y = tidy(f.frame.y * ratio);
                    f.frame.w = tidy(f.frame.w * ratio);
                    match &mut f.content {
                        Content::Table(table) => {
                            table.row_height = tidy(table.row_height * ratio);
                            table.data_font_size = tidy(table.data_font_size * ratio);
                        }
                        _ => f.frame.h = tidy(f.frame.h * ratio),
                    }
                }
                Shape::Line(l) => {
                    let (start, end) = (l.start.scaled(ratio), l.end.scaled(ratio));
                    l.start = Point::new(tidy(start.x), tidy(start.y));
                    l.end = Point::new(tidy(end.x), tidy(end.y));
                }
                Shape::Path(p) => p.scale(ratio),
            }
        }
    }

    /// Bounding box of the printed content. Tables use their estimated
    /// rendered height rather than the stored frame height.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.components
            .iter()
            .filter_map(|c| match &c.shape {
                Shape::Framed(f) => match &f.content {
                    Content::Table(t) => Some(Rect::new(
                        f.frame.x,
                        f.frame.y,
                        f.frame.w,
                        t.estimated_height(),
                    )),
                    _ => Some(f.frame),
                },
                Shape::Line(_) => Some(c.bounds()),
                Shape::Path(p) => p.bounds(),
            })
            .reduce(|acc, r| acc.union(&r))
    }

    /// Moves all content so its bounding box is centered on the paper
    /// along `axis`. Returns false when there is nothing to move.
    pub fn center_content(&mut self, axis: Axis, paper: Paper) -> bool {
        let Some(bounds) = self.content_bounds() else {
            return false;
        };
        let center = bounds.center();
        match axis {
            Axis::Horizontal => self.move_all(paper.width / 2.0 - center.x, 0.0),
            Axis::Vertical => self.move_all(0.0, paper.height / 2.0 - center.y),
        }
        true
    }

    /// Centers a single component on the paper.
    ///
    /// Paths are refused, and so is vertical centering of tables whose
    /// height is not known until render time.
    pub fn center_component(
        &mut self,
        id: &str,
        axis: Axis,
        paper: Paper,
    ) -> Result<(), TemplateError> {
        let component = self
            .get_mut(id)
            .ok_or_else(|| TemplateError::ComponentNotFound { id: id.to_string() })?;
        let is_table = component.is_table();

        match &mut component.shape {
            Shape::Path(_) => Err(TemplateError::NotAllowed {
                reason: "路径组件暂不支持自动居中".to_string(),
            }),
            Shape::Line(l) => {
                let (delta, dx, dy) = match axis {
                    Axis::Horizontal => {
                        let span = (l.end.x - l.start.x).abs();
                        let d = (paper.width - span) / 2.0 - l.start.x.min(l.end.x);
                        (d, d, 0.0)
                    }
                    Axis::Vertical => {
                        let span = (l.end.y - l.start.y).abs();
                        let d = (paper.height - span) / 2.0 - l.start.y.min(l.end.y);
                        (d, 0.0, d)
                    }
                };
                tracing::debug!("Centering line {} by {}", id, delta);
                l.start = l.start.offset(dx, dy).rounded();
                l.end = l.end.offset(dx, dy).rounded();
                Ok(())
            }
            Shape::Framed(f) => match axis {
                Axis::Horizontal => {
                    f.frame.x = ((paper.width - f.frame.w) / 2.0).round();
                    Ok(())
                }
                Axis::Vertical if is_table => Err(TemplateError::NotAllowed {
                    reason: "表格组件建议仅使用水平居中".to_string(),
                }),
                Axis::Vertical => {
                    f.frame.y = ((paper.height - f.frame.h) / 2.0).round();
                    Ok(())
                }
            },
        }
    }

    /// Straightens a line: horizontal moves the end to the start's y,
    /// vertical moves it to the start's x.
    pub fn align_line(&mut self, id: &str, axis: Axis) -> Result<(), TemplateError> {
        let line = self
            .get_mut(id)
            .and_then(|c| c.line_mut())
            .ok_or_else(|| TemplateError::ComponentNotFound { id: id.to_string() })?;
        match axis {
            Axis::Horizontal => line.end.y = line.start.y,
            Axis::Vertical => line.end.x = line.start.x,
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

/// Step sizes of the global move and scale operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalOpsConfig {
    /// Distance moved per keyboard-style canvas move.
    pub move_step: f64,
    /// Structure scale change per zoom step, in percent.
    pub scale_step: f64,
    /// Lowest structure scale, in percent.
    pub min_scale: f64,
}

impl Default for GlobalOpsConfig {
    fn default() -> Self {
        Self {
            move_step: 10.0,
            scale_step: 10.0,
            min_scale: 10.0,
        }
    }
}

/// Next structure scale after one zoom step in `direction`.
///
/// Positive directions grow by `step`, anything else shrinks down to `min`.
pub fn next_structure_scale(current: f64, direction: i32, step: f64, min: f64) -> f64 {
    if direction > 0 {
        current + step
    } else {
        (current - step).max(min)
    }
}

/// Drops floating point noise below a millionth of a unit.
fn tidy(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
