//! Plane geometry and numeric parsing helpers.
//!
//! All coordinates are canvas units (CSS pixels at 100% render scale) with
//! the origin in the top-left corner of the paper and y growing downwards.

use serde::{Deserialize, Serialize};

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns this point with both coordinates multiplied by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Self {
        Self::new(self.x * ratio, self.y * ratio)
    }

    /// Returns this point with both coordinates rounded to whole units.
    pub fn rounded(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Builds the rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Overlap test with touching edges counted as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x > other.right()
            || self.right() < other.x
            || self.y > other.bottom()
            || self.bottom() < other.y)
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Intersection of segment `p0-p1` with segment `p2-p3`.
///
/// Returns `None` for disjoint segments. Parallel and collinear segments
/// produce a zero denominator, the parameters become non-finite and fail
/// the range check, so they are reported as disjoint as well.
pub fn line_intersection(p0: Point, p1: Point, p2: Point, p3: Point) -> Option<Point> {
    let s1 = Point::new(p1.x - p0.x, p1.y - p0.y);
    let s2 = Point::new(p3.x - p2.x, p3.y - p2.y);
    let denom = -s2.x * s1.y + s1.x * s2.y;

    let s = (-s1.y * (p0.x - p2.x) + s1.x * (p0.y - p2.y)) / denom;
    let t = (s2.x * (p0.y - p2.y) - s2.y * (p0.x - p2.x)) / denom;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(Point::new(p0.x + t * s1.x, p0.y + t * s1.y))
    } else {
        None
    }
}

/// Parses the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped, an optional sign, digits with an optional
/// fractional part and an optional exponent are accepted. Trailing garbage
/// is ignored (`"12.5kg"` parses as `12.5`). Returns `None` when no digits
/// are present.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Lenient numeric coercion: the parsed prefix of `input` when it is a
/// finite number, `default` otherwise.
pub fn safe_float(input: &str, default: f64) -> f64 {
    match parse_leading_float(input) {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}
