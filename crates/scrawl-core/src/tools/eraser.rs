//! Eraser: deletes touched nodes, or paints over them.

use super::{ToolContext, ToolHandler, ToolKind, ToolResult, ToolSettings, cursor_ring};
use crate::geometry::{StrokePoint, segment_intersects_rect, segments_intersect};
use crate::nodes::{EraserStrokeNode, Node, NodeId};
use crate::outline::OutlineParams;
use crate::render::{BACKGROUND_COLOR, RenderItem, stroke_geometry};
use crate::simplify::tolerance_for_width;
use kurbo::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ERASER_WIDTH: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraserMode {
    /// Delete whole nodes the eraser passes over.
    #[default]
    Node,
    /// Paint a background-colored stroke.
    Draw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EraserTool {
    pub mode: EraserMode,
    pub width: f64,
    /// Nodes hit so far in this session, in hit order.
    hits: Vec<NodeId>,
}

impl Default for EraserTool {
    fn default() -> Self {
        Self::new(EraserMode::Node)
    }
}

impl EraserTool {
    pub fn new(mode: EraserMode) -> Self {
        Self {
            mode,
            width: DEFAULT_ERASER_WIDTH,
            hits: Vec::new(),
        }
    }

    /// Nodes marked for deletion in the current session.
    pub fn pending(&self) -> &[NodeId] {
        &self.hits
    }

    fn radius(&self) -> f64 {
        self.width / 2.0
    }

    fn collect_hits(&mut self, a: Point, b: Point, nodes: &[Node]) {
        let radius = self.radius();
        for node in nodes {
            if node.is_locked() || self.hits.contains(&node.id()) {
                continue;
            }
            if segment_hits_node(a, b, radius, node) {
                log::debug!("Eraser hit node {}", node.id());
                self.hits.push(node.id());
            }
        }
    }
}

/// Whether the eraser segment `a -> b` with the given radius touches `node`.
fn segment_hits_node(a: Point, b: Point, radius: f64, node: &Node) -> bool {
    match node {
        Node::Stroke(stroke) => {
            stroke.touches(a, radius)
                || stroke.touches(b, radius)
                || crosses_polyline(a, b, &stroke.points)
        }
        Node::EraserStroke(eraser) => {
            eraser.touches(a, radius)
                || eraser.touches(b, radius)
                || crosses_polyline(a, b, &eraser.points)
        }
        _ => {
            let rect = node.bounds().to_rect().inflate(radius, radius);
            segment_intersects_rect(a, b, rect)
        }
    }
}

fn crosses_polyline(a: Point, b: Point, points: &[StrokePoint]) -> bool {
    points
        .windows(2)
        .any(|w| segments_intersect(a, b, w[0].to_point(), w[1].to_point()))
}

impl ToolHandler for EraserTool {
    fn kind(&self) -> ToolKind {
        match self.mode {
            EraserMode::Node => ToolKind::Eraser,
            EraserMode::Draw => ToolKind::DrawEraser,
        }
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.hits.clear();
        if self.mode == EraserMode::Node {
            let p = ctx.point.to_point();
            self.collect_hits(p, p, ctx.nodes());
        }
        Ok(())
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        if self.mode != EraserMode::Node {
            return Ok(());
        }
        let b = ctx.point.to_point();
        let a = match ctx.path {
            [.., prev, _] => prev.to_point(),
            _ => b,
        };
        self.collect_hits(a, b, ctx.nodes());
        Ok(())
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        match self.mode {
            EraserMode::Node => {
                let hits = std::mem::take(&mut self.hits);
                if !hits.is_empty() {
                    log::debug!("Erasing {} nodes", hits.len());
                }
                ctx.delete_nodes(hits);
            }
            EraserMode::Draw => {
                if !ctx.path.is_empty() {
                    ctx.add_node(Node::EraserStroke(EraserStrokeNode::new(
                        ctx.path.to_vec(),
                        self.width,
                    )));
                }
            }
        }
        Ok(())
    }

    fn on_pointer_cancel(&mut self) {
        self.hits.clear();
    }

    fn simplify_tolerance(&self, base_epsilon: f64) -> f64 {
        match self.mode {
            EraserMode::Node => 0.0,
            EraserMode::Draw => tolerance_for_width(base_epsilon, self.width),
        }
    }

    fn settings(&self) -> ToolSettings {
        ToolSettings {
            width: Some(self.width),
            ..ToolSettings::new(self.kind())
        }
    }

    fn overlay(
        &self,
        path: &[StrokePoint],
        pointer: Option<Point>,
        params: &OutlineParams,
    ) -> Vec<RenderItem> {
        let mut items = Vec::new();
        if self.mode == EraserMode::Draw {
            if let Some(geometry) = stroke_geometry(path, self.width, false, params) {
                items.push(RenderItem {
                    geometry,
                    color: BACKGROUND_COLOR.into(),
                });
            }
        }
        if let Some(pointer) = pointer {
            items.push(cursor_ring(pointer, self.radius()));
        }
        items
    }
}
