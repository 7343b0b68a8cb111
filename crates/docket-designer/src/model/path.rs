//! Freehand path geometry.
//!
//! Paths are stored as a sequence of absolute move/line commands. The SVG
//! path-data string only exists at the persistence and rendering edges.

use docket_core::{number_string, Point, Rect};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    MoveTo,
    LineTo,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub command: PathCommand,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathParseError {
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),
    #[error("path must start with a move command")]
    MissingMove,
    #[error("expected a number at '{0}'")]
    ExpectedNumber(String),
    #[error("odd number of coordinates")]
    DanglingCoordinate,
}

/// Parsed freehand path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    /// Starts a new path at `start`.
    pub fn starting_at(start: Point) -> Self {
        Self {
            segments: vec![PathSegment {
                command: PathCommand::MoveTo,
                point: start,
            }],
        }
    }

    /// Parses absolute `M`/`L` path data such as `"M 10 20 L 30 40"`.
    ///
    /// Commas are accepted as separators and coordinate pairs following a
    /// command repeat it (a pair after `M` is an implicit `L`).
    pub fn parse(data: &str) -> Result<Self, PathParseError> {
        let mut segments = Vec::new();
        let mut command: Option<PathCommand> = None;
        let mut pending: Option<f64> = None;

        for token in tokenize(data) {
            match token {
                "M" => command = Some(PathCommand::MoveTo),
                "L" => command = Some(PathCommand::LineTo),
                t if t.len() == 1 && t.chars().all(|c| c.is_ascii_alphabetic()) => {
                    let c = t.chars().next().unwrap_or('?');
                    return Err(PathParseError::UnsupportedCommand(c));
                }
                t => {
                    let value: f64 = t
                        .parse()
                        .map_err(|_| PathParseError::ExpectedNumber(t.to_string()))?;
                    let cmd = command.ok_or(PathParseError::MissingMove)?;
                    match pending.take() {
                        None => pending = Some(value),
                        Some(x) => {
                            if segments.is_empty() && cmd != PathCommand::MoveTo {
                                return Err(PathParseError::MissingMove);
                            }
                            segments.push(PathSegment {
                                command: cmd,
                                point: Point::new(x, value),
                            });
                            if cmd == PathCommand::MoveTo {
                                command = Some(PathCommand::LineTo);
                            }
                        }
                    }
                }
            }
        }

        if pending.is_some() {
            return Err(PathParseError::DanglingCoordinate);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.segments.first().map(|s| s.point)
    }

    /// Appends a straight segment to `point`.
    pub fn line_to(&mut self, point: Point) {
        let command = if self.segments.is_empty() {
            PathCommand::MoveTo
        } else {
            PathCommand::LineTo
        };
        self.segments.push(PathSegment { command, point });
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for segment in &mut self.segments {
            segment.point = segment.point.offset(dx, dy);
        }
    }

    pub fn scale(&mut self, ratio: f64) {
        for segment in &mut self.segments {
            segment.point = segment.point.scaled(ratio);
        }
    }

    /// Bounding box of all points, `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.first_point()?;
        let (mut min, mut max) = (first, first);
        for s in &self.segments[1..] {
            min.x = min.x.min(s.point.x);
            min.y = min.y.min(s.point.y);
            max.x = max.x.max(s.point.x);
            max.y = max.y.max(s.point.y);
        }
        Some(Rect::from_corners(min, max))
    }

    /// Serializes to SVG path data.
    pub fn to_svg(&self) -> String {
        self.segments
            .iter()
            .map(|s| {
                let cmd = match s.command {
                    PathCommand::MoveTo => 'M',
                    PathCommand::LineTo => 'L',
                };
                format!(
                    "{} {} {}",
                    cmd,
                    number_string(s.point.x),
                    number_string(s.point.y)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Splits path data into command letters and number tokens.
fn tokenize(data: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in data.char_indices() {
        let is_separator = c.is_whitespace() || c == ',';
        let is_command = c.is_ascii_alphabetic() && c != 'e' && c != 'E';
        // a sign starts a new number unless it follows an exponent marker
        let starts_signed = (c == '-' || c == '+')
            && start.is_some()
            && !data[..i].ends_with(['e', 'E']);

        if is_separator || is_command || starts_signed {
            if let Some(s) = start.take() {
                tokens.push(&data[s..i]);
            }
        }
        if is_command {
            tokens.push(&data[i..i + c.len_utf8()]);
        } else if !is_separator && start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&data[s..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drawn_path() {
        let path = PathData::parse("M 10 20 L 30.5 40 L 35 -2").expect("valid path");
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[0].command, PathCommand::MoveTo);
        assert_eq!(path.segments()[2].point, Point::new(35.0, -2.0));
        assert_eq!(path.to_svg(), "M 10 20 L 30.5 40 L 35 -2");
    }

    #[test]
    fn test_parse_compact_syntax() {
        let path = PathData::parse("M10,20L30-40 50 60").expect("valid path");
        assert_eq!(
            path.segments().iter().map(|s| s.point).collect::<Vec<_>>(),
            vec![
                Point::new(10.0, 20.0),
                Point::new(30.0, -40.0),
                Point::new(50.0, 60.0)
            ]
        );
    }

    #[test]
    fn test_parse_rejects_curves_and_garbage() {
        assert_eq!(
            PathData::parse("M 0 0 C 1 1 2 2 3 3"),
            Err(PathParseError::UnsupportedCommand('C'))
        );
        assert!(PathData::parse("10 20").is_err());
        assert_eq!(
            PathData::parse("M 1 2 L 3"),
            Err(PathParseError::DanglingCoordinate)
        );
    }

    #[test]
    fn test_translate_scale_bounds() {
        let mut path = PathData::starting_at(Point::new(10.0, 10.0));
        path.line_to(Point::new(20.0, 5.0));
        path.translate(5.0, 5.0);
        assert_eq!(path.bounds(), Some(Rect::new(15.0, 10.0, 10.0, 5.0)));
        path.scale(2.0);
        assert_eq!(path.first_point(), Some(Point::new(30.0, 30.0)));
        assert!(PathData::default().bounds().is_none());
    }
}
