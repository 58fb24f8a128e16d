//! Point, distance and bounds helpers shared by the stroke pipeline.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pressure assumed for input devices that do not report one.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// A single captured input sample in logical drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Normalized pressure in `[0, 1]`, if the device reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Stylus tilt in degrees along X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_x: Option<f64>,
    /// Stylus tilt in degrees along Y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_y: Option<f64>,
    /// Stylus rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twist: Option<f64>,
}

impl StrokePoint {
    /// Create a point without pressure or stylus data.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Create a point with a pressure reading.
    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
            ..Self::default()
        }
    }

    /// Pressure, falling back to [`DEFAULT_PRESSURE`] when absent.
    pub fn pressure_or_default(&self) -> f64 {
        self.pressure.unwrap_or(DEFAULT_PRESSURE)
    }

    /// Tilt magnitude in degrees, if the device reported any tilt.
    pub fn tilt_magnitude(&self) -> Option<f64> {
        match (self.tilt_x, self.tilt_y) {
            (None, None) => None,
            (tx, ty) => {
                let tx = tx.unwrap_or(0.0);
                let ty = ty.unwrap_or(0.0);
                Some((tx * tx + ty * ty).sqrt())
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for StrokePoint {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Anything with a 2D position that the simplifier can work on.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl Positioned for StrokePoint {
    fn position(&self) -> Point {
        self.to_point()
    }
}

/// Distance from `point` to the infinite line through `line_start` and `line_end`.
///
/// Degenerates to the Euclidean distance to `line_start` when the line has no length.
pub fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;

    if dx == 0.0 && dy == 0.0 {
        return (point - line_start).hypot();
    }

    let numerator =
        (dy * point.x - dx * point.y + line_end.x * line_start.y - line_end.y * line_start.x).abs();
    numerator / (dx * dx + dy * dy).sqrt()
}

/// Distance from a point to the line segment `a -> b`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Test if two line segments (a-b) and (c-d) intersect, including touching endpoints.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}

/// Whether the segment `a -> b` touches the rectangle (either end inside, or crossing an edge).
pub fn segment_intersects_rect(a: Point, b: Point, rect: Rect) -> bool {
    if rect.contains(a) || rect.contains(b) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    (0..4).any(|i| segments_intersect(a, b, corners[i], corners[(i + 1) % 4]))
}

/// Unit vector perpendicular to `v` (rotated 90 degrees), or zero for a zero-length `v`.
pub fn unit_perpendicular(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 && len.is_finite() {
        Vec2::new(-v.y / len, v.x / len)
    } else {
        Vec2::ZERO
    }
}

/// Axis-aligned box in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a box from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of the given points grown by `padding` on every side.
    ///
    /// Returns `None` when there are no finite points.
    pub fn from_points<P: Positioned>(points: &[P], padding: f64) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points.iter().map(Positioned::position) {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if min_x > max_x {
            return None;
        }

        let x = min_x - padding;
        let y = min_y - padding;
        Some(Self::new(x, y, max_x + padding - x, max_y + padding - y))
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both `self` and `other`.
    pub fn merge(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }

    /// Merge into an optional accumulator.
    pub fn merge_into(acc: Option<Bounds>, other: Bounds) -> Bounds {
        match acc {
            Some(existing) => existing.merge(&other),
            None => other,
        }
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the boxes overlap or touch.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Whether the point lies inside or on the edge of this box.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Convert to a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Bounds::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}
