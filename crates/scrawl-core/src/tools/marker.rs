//! Marker and pen: ink strokes from the session path.

use super::{ToolContext, ToolError, ToolHandler, ToolKind, ToolResult, ToolSettings};
use crate::geometry::StrokePoint;
use crate::nodes::{Node, SerializableColor, StrokeNode};
use crate::outline::OutlineParams;
use crate::render::{RenderItem, stroke_geometry};
use crate::simplify::tolerance_for_width;
use kurbo::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKER_WIDTH: f64 = 14.0;
pub const DEFAULT_PEN_WIDTH: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerTool {
    pub color: SerializableColor,
    pub width: f64,
    pub opacity: f64,
    /// Render strokes as variable-width outlines.
    pub pressure_sensitive: bool,
}

impl Default for MarkerTool {
    fn default() -> Self {
        Self {
            color: SerializableColor::yellow(),
            width: DEFAULT_MARKER_WIDTH,
            opacity: 1.0,
            pressure_sensitive: false,
        }
    }
}

impl MarkerTool {
    /// A thin, pressure-sensitive black pen.
    pub fn pen() -> Self {
        Self {
            color: SerializableColor::black(),
            width: DEFAULT_PEN_WIDTH,
            opacity: 1.0,
            pressure_sensitive: true,
        }
    }

    fn check_width(&self) -> ToolResult<()> {
        if self.width > 0.0 && self.width.is_finite() {
            Ok(())
        } else {
            Err(ToolError::InvalidWidth(self.width))
        }
    }
}

impl ToolHandler for MarkerTool {
    fn kind(&self) -> ToolKind {
        if self.pressure_sensitive {
            ToolKind::Pen
        } else {
            ToolKind::Marker
        }
    }

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.check_width()
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.check_width()?;
        if ctx.path.is_empty() {
            return Ok(());
        }

        let mut stroke = StrokeNode::new(ctx.path.to_vec(), self.color, self.width);
        stroke.opacity = self.opacity;
        stroke.pressure_sensitive = self.pressure_sensitive;
        log::debug!("Marker stroke with {} points", stroke.points.len());
        ctx.add_node(Node::Stroke(stroke));
        Ok(())
    }

    fn simplify_tolerance(&self, base_epsilon: f64) -> f64 {
        tolerance_for_width(base_epsilon, self.width)
    }

    fn settings(&self) -> ToolSettings {
        ToolSettings {
            kind: self.kind(),
            color: Some(self.color),
            width: Some(self.width),
            opacity: Some(self.opacity),
        }
    }

    fn overlay(
        &self,
        path: &[StrokePoint],
        _pointer: Option<Point>,
        params: &OutlineParams,
    ) -> Vec<RenderItem> {
        stroke_geometry(path, self.width, self.pressure_sensitive, params)
            .map(|geometry| RenderItem {
                geometry,
                color: self.color.with_opacity(self.opacity),
            })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeChange;

    fn path() -> Vec<StrokePoint> {
        vec![StrokePoint::new(0.0, 0.0), StrokePoint::new(10.0, 10.0)]
    }

    #[test]
    fn test_up_adds_stroke() {
        let mut tool = MarkerTool::default();
        let path = path();
        let mut ctx = ToolContext::new(path[1], &path, &[]);
        tool.on_pointer_up(&mut ctx).unwrap();

        let changes = ctx.into_changes();
        let [NodeChange::Add(Node::Stroke(stroke))] = changes.as_slice() else {
            panic!("expected one stroke, got {changes:?}");
        };
        assert_eq!(stroke.points, path);
        assert_eq!(stroke.color, SerializableColor::yellow());
        assert!(!stroke.pressure_sensitive);
        assert!((stroke.bounds.x + DEFAULT_MARKER_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_is_pressure_sensitive() {
        let mut tool = MarkerTool::pen();
        assert_eq!(tool.kind(), ToolKind::Pen);
        let path = path();
        let mut ctx = ToolContext::new(path[1], &path, &[]);
        tool.on_pointer_up(&mut ctx).unwrap();
        let Some(NodeChange::Add(Node::Stroke(stroke))) = ctx.changes().first() else {
            panic!("expected a stroke");
        };
        assert!(stroke.pressure_sensitive);
    }

    #[test]
    fn test_empty_path_adds_nothing() {
        let mut tool = MarkerTool::default();
        let mut ctx = ToolContext::new(StrokePoint::new(0.0, 0.0), &[], &[]);
        tool.on_pointer_up(&mut ctx).unwrap();
        assert!(ctx.changes().is_empty());
    }

    #[test]
    fn test_invalid_width_rejected() {
        let mut tool = MarkerTool {
            width: 0.0,
            ..MarkerTool::default()
        };
        let mut ctx = ToolContext::new(StrokePoint::new(0.0, 0.0), &[], &[]);
        assert_eq!(tool.on_pointer_down(&mut ctx), Err(ToolError::InvalidWidth(0.0)));
    }

    #[test]
    fn test_tolerance_scales_with_width() {
        let tool = MarkerTool::default();
        assert!((tool.simplify_tolerance(0.5) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_overlay_previews_path() {
        let tool = MarkerTool::default();
        let items = tool.overlay(&path(), None, &OutlineParams::default());
        assert_eq!(items.len(), 1);
        assert!(tool.overlay(&[], None, &OutlineParams::default()).is_empty());
    }
}
