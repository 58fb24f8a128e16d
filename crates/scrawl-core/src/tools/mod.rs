//! Tool system: strategies that turn pointer sessions into node changes.
//!
//! The session owns the pointer; tools only see a [`ToolContext`] per event
//! and describe the node changes they want. Changes are applied to the
//! document after the callback returns `Ok`.

mod eraser;
mod group;
mod image;
mod marker;
mod text;

pub use eraser::{DEFAULT_ERASER_WIDTH, EraserMode, EraserTool};
pub use group::GroupTool;
pub use image::{DEFAULT_IMAGE_SIZE, ImageTool};
pub use marker::{DEFAULT_MARKER_WIDTH, DEFAULT_PEN_WIDTH, MarkerTool};
pub use text::{DEFAULT_FONT_SIZE, TextTool};

use crate::document::NodeChange;
use crate::geometry::StrokePoint;
use crate::nodes::{Node, NodeId, SerializableColor};
use crate::outline::OutlineParams;
use crate::render::{RenderItem, StrokeGeometry};
use kurbo::{Circle, Point, Shape as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a tool can report from a pointer callback.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToolError {
    #[error("Invalid stroke width: {0}")]
    InvalidWidth(f64),
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f64),
    #[error("No image source selected")]
    MissingImageSource,
}

/// Result type for tool callbacks.
pub type ToolResult<T> = Result<T, ToolError>;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Marker,
    Pen,
    Eraser,
    DrawEraser,
    Image,
    Text,
    Group,
}

/// What a tool draws with, for toolbars and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub kind: ToolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ToolSettings {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            color: None,
            width: None,
            opacity: None,
        }
    }
}

/// Everything a tool callback may see and do.
///
/// `path` is the raw path on down/move and the simplified path on up.
#[derive(Debug)]
pub struct ToolContext<'a> {
    /// Current sample in logical coordinates.
    pub point: StrokePoint,
    pub path: &'a [StrokePoint],
    nodes: &'a [Node],
    changes: Vec<NodeChange>,
}

impl<'a> ToolContext<'a> {
    pub fn new(point: StrokePoint, path: &'a [StrokePoint], nodes: &'a [Node]) -> Self {
        Self {
            point,
            path,
            nodes,
            changes: Vec::new(),
        }
    }

    /// The document's nodes as they were before this callback.
    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn add_node(&mut self, node: Node) {
        self.changes.push(NodeChange::Add(node));
    }

    pub fn delete_nodes(&mut self, ids: Vec<NodeId>) {
        if !ids.is_empty() {
            self.changes.push(NodeChange::Delete(ids));
        }
    }

    pub fn changes(&self) -> &[NodeChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<NodeChange> {
        self.changes
    }
}

/// The contract the pointer session drives.
pub trait ToolHandler {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(&mut self, _ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        Ok(())
    }

    fn on_pointer_move(&mut self, _ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        Ok(())
    }

    fn on_pointer_up(&mut self, _ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        Ok(())
    }

    /// The session was discarded; drop any per-session state.
    fn on_pointer_cancel(&mut self) {}

    /// Douglas-Peucker tolerance applied to the raw path before `on_pointer_up`.
    /// Zero disables simplification.
    fn simplify_tolerance(&self, _base_epsilon: f64) -> f64 {
        0.0
    }

    fn settings(&self) -> ToolSettings {
        ToolSettings::new(self.kind())
    }

    /// Preview geometry for the in-progress path and the hover position.
    fn overlay(
        &self,
        _path: &[StrokePoint],
        _pointer: Option<Point>,
        _params: &OutlineParams,
    ) -> Vec<RenderItem> {
        Vec::new()
    }
}

/// The active tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Marker(MarkerTool),
    Eraser(EraserTool),
    Image(ImageTool),
    Text(TextTool),
    Group(GroupTool),
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Marker(MarkerTool::default())
    }
}

impl Tool {
    /// A tool of the given kind with default settings.
    pub fn from_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Marker => Tool::Marker(MarkerTool::default()),
            ToolKind::Pen => Tool::Marker(MarkerTool::pen()),
            ToolKind::Eraser => Tool::Eraser(EraserTool::default()),
            ToolKind::DrawEraser => Tool::Eraser(EraserTool::new(EraserMode::Draw)),
            ToolKind::Image => Tool::Image(ImageTool::default()),
            ToolKind::Text => Tool::Text(TextTool::default()),
            ToolKind::Group => Tool::Group(GroupTool::default()),
        }
    }

    fn handler(&self) -> &dyn ToolHandler {
        match self {
            Tool::Marker(tool) => tool,
            Tool::Eraser(tool) => tool,
            Tool::Image(tool) => tool,
            Tool::Text(tool) => tool,
            Tool::Group(tool) => tool,
        }
    }

    fn handler_mut(&mut self) -> &mut dyn ToolHandler {
        match self {
            Tool::Marker(tool) => tool,
            Tool::Eraser(tool) => tool,
            Tool::Image(tool) => tool,
            Tool::Text(tool) => tool,
            Tool::Group(tool) => tool,
        }
    }
}

impl ToolHandler for Tool {
    fn kind(&self) -> ToolKind {
        self.handler().kind()
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.handler_mut().on_pointer_down(ctx)
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.handler_mut().on_pointer_move(ctx)
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        self.handler_mut().on_pointer_up(ctx)
    }

    fn on_pointer_cancel(&mut self) {
        self.handler_mut().on_pointer_cancel()
    }

    fn simplify_tolerance(&self, base_epsilon: f64) -> f64 {
        self.handler().simplify_tolerance(base_epsilon)
    }

    fn settings(&self) -> ToolSettings {
        self.handler().settings()
    }

    fn overlay(
        &self,
        path: &[StrokePoint],
        pointer: Option<Point>,
        params: &OutlineParams,
    ) -> Vec<RenderItem> {
        self.handler().overlay(path, pointer, params)
    }
}

/// Hairline circle around the pointer.
pub(crate) fn cursor_ring(center: Point, radius: f64) -> RenderItem {
    RenderItem {
        geometry: StrokeGeometry::Stroke {
            path: Circle::new(center, radius).to_path(0.1),
            width: 1.0,
        },
        color: SerializableColor::new(128, 128, 128, 255).into(),
    }
}
