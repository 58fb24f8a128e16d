//! Variable-width stroke outlines.
//!
//! A stroke's centerline plus per-point pressure and tilt is turned into a
//! closed silhouette that renderers fill. Width follows a single thinning law
//! (see [`OutlineParams::width_at`]); callers fall back to a plain stroked
//! centerline at [`average_width`] whenever the outline comes back empty.

use crate::geometry::{DEFAULT_PRESSURE, StrokePoint, unit_perpendicular};
use crate::smooth::{Join, extend_smooth};
use kurbo::{BezPath, Circle, Point, Shape as _, Vec2};
use serde::{Deserialize, Serialize};

/// Accuracy used when flattening circles into Bezier segments.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Parameters of the pressure-to-width law and outline post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineParams {
    /// How strongly pressure modulates width (0 = constant width).
    pub thinning: f64,
    /// Pressure multiplier at pressure 0 and pressure 1.
    pub pressure_range: (f64, f64),
    /// Lower bound on the full width at any point.
    pub min_width: f64,
    /// Widen up to 50% for tilted styluses.
    pub tilt_widening: bool,
    /// Tilt magnitude (degrees) that yields full widening.
    pub max_tilt: f64,
    /// Fraction of the stroke over which the width ramps down to zero.
    pub taper_end: f64,
    /// Minimum travel between resampled points.
    pub spacing: f64,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            thinning: 0.6,
            pressure_range: (0.5, 1.5),
            min_width: 0.5,
            tilt_widening: true,
            max_tilt: 90.0,
            taper_end: 0.0,
            spacing: 0.15,
        }
    }
}

impl OutlineParams {
    /// Full stroke width at `point` for a stroke of `base_width`.
    ///
    /// `width = base * (1 - thinning + thinning * lerp(range, pressure))`,
    /// optionally widened by tilt, never below `min_width`.
    pub fn width_at(&self, point: &StrokePoint, base_width: f64) -> f64 {
        let pressure = point
            .pressure
            .filter(|p| p.is_finite())
            .unwrap_or(DEFAULT_PRESSURE)
            .clamp(0.0, 1.0);

        let (low, high) = self.pressure_range;
        let multiplier = low + pressure * (high - low);
        let mut width = base_width * (1.0 - self.thinning + self.thinning * multiplier);

        if self.tilt_widening && self.max_tilt > 0.0 {
            if let Some(tilt) = point.tilt_magnitude().filter(|t| t.is_finite()) {
                width *= 1.0 + 0.5 * (tilt / self.max_tilt).min(1.0);
            }
        }

        width.max(self.min_width)
    }
}

/// A closed, fillable stroke silhouette.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Nothing to fill; render the centerline fallback instead.
    Empty,
    /// A single dab.
    Circle { center: Point, radius: f64 },
    /// Left and right silhouettes of equal length, in stroke order.
    Polygon { left: Vec<Point>, right: Vec<Point> },
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        matches!(self, Outline::Empty)
    }

    /// The closed vertex loop: left silhouette forward, right silhouette reversed.
    ///
    /// Circles have no vertex loop and return an empty list.
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Outline::Polygon { left, right } => {
                left.iter().chain(right.iter().rev()).copied().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Full width of the silhouette at vertex `index`.
    pub fn width_at_vertex(&self, index: usize) -> Option<f64> {
        match self {
            Outline::Polygon { left, right } => {
                Some((*left.get(index)? - *right.get(index)?).hypot())
            }
            Outline::Circle { radius, .. } if index == 0 => Some(radius * 2.0),
            _ => None,
        }
    }

    /// Path data for filling. Each silhouette goes through the smoothing helper.
    pub fn to_path(&self) -> BezPath {
        match self {
            Outline::Empty => BezPath::new(),
            Outline::Circle { center, radius } => {
                Circle::new(*center, *radius).to_path(CIRCLE_TOLERANCE)
            }
            Outline::Polygon { left, right } => {
                let mut path = BezPath::new();
                extend_smooth(&mut path, left, Join::MoveTo);
                let reversed: Vec<Point> = right.iter().rev().copied().collect();
                extend_smooth(&mut path, &reversed, Join::LineTo);
                path.close_path();
                path
            }
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            Outline::Empty => true,
            Outline::Circle { center, radius } => center.is_finite() && radius.is_finite(),
            Outline::Polygon { left, right } => {
                left.iter().chain(right.iter()).all(|p| p.is_finite())
            }
        }
    }
}

/// Build the filled outline of a stroke.
///
/// Never fails: malformed or degenerate input yields [`Outline::Empty`].
pub fn build_outline(points: &[StrokePoint], base_width: f64, params: &OutlineParams) -> Outline {
    let finite: Vec<StrokePoint> = points.iter().copied().filter(StrokePoint::is_finite).collect();
    if finite.len() != points.len() {
        log::warn!(
            "Dropped {} non-finite stroke points",
            points.len() - finite.len()
        );
    }
    let points = resample(&finite, params.spacing);

    let outline = match points.as_slice() {
        [] => Outline::Empty,
        [only] => Outline::Circle {
            center: only.to_point(),
            radius: params.width_at(only, base_width) / 2.0,
        },
        [a, b] => capsule(a, b, base_width, params),
        _ => silhouette(&points, base_width, params),
    };

    if outline.is_finite() {
        outline
    } else {
        log::warn!("Outline produced non-finite geometry, falling back");
        Outline::Empty
    }
}

/// Mean width over the stroke, used for the stroked-centerline fallback.
pub fn average_width(points: &[StrokePoint], base_width: f64, params: &OutlineParams) -> f64 {
    let widths: Vec<f64> = points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| params.width_at(p, base_width))
        .filter(|w| w.is_finite())
        .collect();

    if widths.is_empty() {
        return base_width.max(params.min_width);
    }
    widths.iter().sum::<f64>() / widths.len() as f64
}

/// Keep a point once the accumulated travel since the last kept point reaches
/// `spacing`. The last point is always kept.
fn resample(points: &[StrokePoint], spacing: f64) -> Vec<StrokePoint> {
    if points.len() < 2 || spacing <= 0.0 {
        return points.to_vec();
    }

    let mut sampled = vec![points[0]];
    let mut last_kept = 0;
    let mut accumulated = 0.0;

    for i in 1..points.len() {
        accumulated += (points[i].to_point() - points[i - 1].to_point()).hypot();
        if accumulated >= spacing {
            sampled.push(points[i]);
            last_kept = i;
            accumulated = 0.0;
        }
    }

    if last_kept != points.len() - 1 {
        sampled.push(points[points.len() - 1]);
    }
    sampled
}

fn capsule(a: &StrokePoint, b: &StrokePoint, base_width: f64, params: &OutlineParams) -> Outline {
    let (pa, pb) = (a.to_point(), b.to_point());
    let dir = pb - pa;
    if dir.hypot() == 0.0 {
        return Outline::Empty;
    }

    let perp = unit_perpendicular(dir);
    let wa = params.width_at(a, base_width) / 2.0;
    let wb = params.width_at(b, base_width) / 2.0;

    Outline::Polygon {
        left: vec![pa + perp * wa, pb + perp * wb],
        right: vec![pa - perp * wa, pb - perp * wb],
    }
}

fn silhouette(points: &[StrokePoint], base_width: f64, params: &OutlineParams) -> Outline {
    let n = points.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);

    for (i, point) in points.iter().enumerate() {
        let mut half_width = params.width_at(point, base_width) / 2.0;

        let t = i as f64 / (n - 1) as f64;
        if params.taper_end > 0.0 && t > 1.0 - params.taper_end {
            half_width *= (1.0 - t) / params.taper_end;
        }

        let perp = unit_perpendicular(tangent(points, i));
        let center = point.to_point();
        left.push(center + perp * half_width);
        right.push(center - perp * half_width);
    }

    Outline::Polygon { left, right }
}

/// Direction of travel at `i`: forward difference at the start, backward at
/// the end, central difference in between.
fn tangent(points: &[StrokePoint], i: usize) -> Vec2 {
    let last = points.len() - 1;
    let (from, to) = match i {
        0 => (0, 1),
        i if i == last => (last - 1, last),
        i => (i - 1, i + 1),
    };
    points[to].to_point() - points[from].to_point()
}
