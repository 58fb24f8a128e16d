//! Centerline nodes: ink strokes and eraser strokes.

use super::{NodeId, SerializableColor};
use crate::geometry::{Bounds, StrokePoint, point_to_segment_dist};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_opacity() -> f64 {
    1.0
}

/// A finished ink stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeNode {
    pub(crate) id: NodeId,
    /// Simplified centerline in logical coordinates.
    pub points: Vec<StrokePoint>,
    pub color: SerializableColor,
    /// Base width before pressure modulation.
    pub width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Render as a variable-width filled outline instead of a plain stroke.
    #[serde(default)]
    pub pressure_sensitive: bool,
    pub bounds: Bounds,
    #[serde(default)]
    pub locked: bool,
}

impl StrokeNode {
    /// Create a stroke whose bounds are its points padded by `width`.
    pub fn new(points: Vec<StrokePoint>, color: SerializableColor, width: f64) -> Self {
        let bounds = Bounds::from_points(&points, width).unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
            opacity: 1.0,
            pressure_sensitive: false,
            bounds,
            locked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Whether a disc of `radius` at `point` touches this stroke's ink.
    pub fn touches(&self, point: Point, radius: f64) -> bool {
        polyline_touches(&self.points, point, radius + self.width / 2.0)
    }
}

/// A stroke painted with the background color to hide ink beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraserStrokeNode {
    pub(crate) id: NodeId,
    pub points: Vec<StrokePoint>,
    pub width: f64,
    pub bounds: Bounds,
    #[serde(default)]
    pub locked: bool,
}

impl EraserStrokeNode {
    pub fn new(points: Vec<StrokePoint>, width: f64) -> Self {
        let bounds = Bounds::from_points(&points, width).unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            points,
            width,
            bounds,
            locked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn touches(&self, point: Point, radius: f64) -> bool {
        polyline_touches(&self.points, point, radius + self.width / 2.0)
    }
}

/// Whether `point` lies within `threshold` of any vertex or segment of the polyline.
fn polyline_touches(points: &[StrokePoint], point: Point, threshold: f64) -> bool {
    match points {
        [] => false,
        [only] => (only.to_point() - point).hypot() <= threshold,
        _ => points
            .windows(2)
            .any(|w| point_to_segment_dist(point, w[0].to_point(), w[1].to_point()) <= threshold),
    }
}
