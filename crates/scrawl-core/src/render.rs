//! Render geometry for nodes and tool overlays.
//!
//! The core does not rasterize. It hands hosts fill or stroke paths with a
//! resolved color, which map directly onto any 2D backend or onto SVG.

use crate::geometry::StrokePoint;
use crate::nodes::{Node, SerializableColor};
use crate::outline::{OutlineParams, average_width, build_outline};
use crate::smooth::smooth_path;
use kurbo::{BezPath, Circle, Point, Shape as _};
use peniko::Color;

/// Color eraser strokes are painted with.
pub const BACKGROUND_COLOR: SerializableColor = SerializableColor {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

const DOT_TOLERANCE: f64 = 0.1;

/// How a path is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeGeometry {
    /// A closed outline to fill.
    Fill(BezPath),
    /// An open centerline stroked with round caps and joins.
    Stroke { path: BezPath, width: f64 },
}

impl StrokeGeometry {
    pub fn path(&self) -> &BezPath {
        match self {
            StrokeGeometry::Fill(path) => path,
            StrokeGeometry::Stroke { path, .. } => path,
        }
    }
}

/// One paintable item.
#[derive(Debug, Clone)]
pub struct RenderItem {
    pub geometry: StrokeGeometry,
    pub color: Color,
}

/// Geometry for a stroke centerline.
///
/// Pressure-sensitive strokes are filled outlines, falling back to a stroked
/// centerline at the average width when the outline is empty. Plain strokes
/// are stroked centerlines; a single point becomes a filled dot. Returns
/// `None` when no finite point remains.
pub fn stroke_geometry(
    points: &[StrokePoint],
    width: f64,
    pressure_sensitive: bool,
    params: &OutlineParams,
) -> Option<StrokeGeometry> {
    if pressure_sensitive {
        let outline = build_outline(points, width, params);
        if !outline.is_empty() {
            return Some(StrokeGeometry::Fill(outline.to_path()));
        }
        log::debug!("Empty outline for {} points, stroking centerline", points.len());
        let centerline = finite_centerline(points);
        if centerline.is_empty() {
            return None;
        }
        return Some(StrokeGeometry::Stroke {
            path: smooth_path(&centerline),
            width: average_width(points, width, params),
        });
    }

    let centerline = finite_centerline(points);
    match centerline.as_slice() {
        [] => None,
        [only] => Some(StrokeGeometry::Fill(
            Circle::new(*only, width / 2.0).to_path(DOT_TOLERANCE),
        )),
        _ => Some(StrokeGeometry::Stroke {
            path: smooth_path(&centerline),
            width,
        }),
    }
}

fn finite_centerline(points: &[StrokePoint]) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.is_finite())
        .map(StrokePoint::to_point)
        .collect()
}

/// Append the render items for `node` to `out`, back to front.
///
/// Images and text are laid out by the host and produce no items here.
pub fn render_node(node: &Node, params: &OutlineParams, out: &mut Vec<RenderItem>) {
    match node {
        Node::Stroke(stroke) => {
            if let Some(geometry) =
                stroke_geometry(&stroke.points, stroke.width, stroke.pressure_sensitive, params)
            {
                out.push(RenderItem {
                    geometry,
                    color: stroke.color.with_opacity(stroke.opacity),
                });
            }
        }
        Node::EraserStroke(eraser) => {
            if let Some(geometry) = stroke_geometry(&eraser.points, eraser.width, false, params) {
                out.push(RenderItem {
                    geometry,
                    color: BACKGROUND_COLOR.into(),
                });
            }
        }
        Node::Group(group) => {
            for child in &group.children {
                render_node(child, params, out);
            }
        }
        Node::Image(_) | Node::Text(_) => {}
    }
}

/// Render items for a whole node list in paint order.
pub fn render_nodes(nodes: &[Node], params: &OutlineParams) -> Vec<RenderItem> {
    let mut items = Vec::new();
    for node in nodes {
        render_node(node, params, &mut items);
    }
    items
}
