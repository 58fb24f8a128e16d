//! Canvas state: document, pointer session, and active tool.

use crate::config::DrawingConfig;
use crate::document::Document;
use crate::input::PointerEvent;
use crate::nodes::Node;
use crate::render::{RenderItem, render_nodes};
use crate::session::{NoCapture, PointerCapture, Session, Transition};
use crate::tools::{Tool, ToolHandler, ToolKind};
use crate::viewport::Viewport;
use kurbo::{Point, Rect};

/// A drawing surface. Hosts forward pointer events and the pan modifier,
/// and paint whatever [`Canvas::render`] returns.
pub struct Canvas {
    document: Document,
    session: Session,
    tool: Tool,
    capture: Box<dyn PointerCapture>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Viewport::default(), DrawingConfig::default())
    }
}

impl Canvas {
    pub fn new(viewport: Viewport, config: DrawingConfig) -> Self {
        Self {
            document: Document::with_padding(config.bounds_padding),
            session: Session::new(viewport, config),
            tool: Tool::default(),
            capture: Box::new(NoCapture),
        }
    }

    /// Use the host's native pointer capture.
    pub fn with_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the drawing with previously persisted nodes.
    pub fn load_nodes(&mut self, nodes: Vec<Node>) {
        self.session.reset(&mut self.tool, self.capture.as_mut());
        self.document = Document::from_nodes(nodes, self.session.config().bounds_padding);
        log::info!("Loaded {} nodes", self.document.len());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn viewport(&self) -> &Viewport {
        self.session.viewport()
    }

    pub fn config(&self) -> &DrawingConfig {
        self.session.config()
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Adjust the active tool's settings in place.
    pub fn tool_mut(&mut self) -> &mut Tool {
        &mut self.tool
    }

    /// Switch tools, abandoning any session in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.session.reset(&mut self.tool, self.capture.as_mut());
        log::debug!("Tool changed: {:?} -> {:?}", self.tool.kind(), tool.kind());
        self.tool = tool;
    }

    pub fn select_tool(&mut self, kind: ToolKind) {
        self.set_tool(Tool::from_kind(kind));
    }

    /// Report whether the pan modifier is held.
    pub fn set_pan_trigger(&mut self, active: bool) {
        self.session.set_pan_trigger(active);
    }

    pub fn resize_surface(&mut self, surface: Rect) {
        self.session.viewport_mut().resize(surface);
    }

    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.session.viewport_mut().zoom_at(screen_point, factor);
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Transition {
        self.session.handle(
            event,
            &mut self.tool,
            &mut self.document,
            self.capture.as_mut(),
        )
    }

    /// Everything to paint, back to front: document nodes, then the tool overlay.
    pub fn render(&self) -> Vec<RenderItem> {
        let params = &self.session.config().outline;
        let mut items = render_nodes(self.document.nodes(), params);
        items.extend(
            self.tool
                .overlay(self.session.raw_path(), self.session.pointer(), params),
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StrokePoint;
    use crate::nodes::{ImageNode, SerializableColor, StrokeNode};
    use crate::session::SessionMode;
    use crate::tools::{EraserMode, EraserTool, MarkerTool};

    fn stroke(canvas: &mut Canvas, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        canvas.handle_pointer(&PointerEvent::down(1, Point::new(first.0, first.1)));
        for &(x, y) in rest {
            canvas.handle_pointer(&PointerEvent::moved(1, Point::new(x, y)));
        }
        let last = points.last().unwrap();
        canvas.handle_pointer(&PointerEvent::up(1, Point::new(last.0, last.1)));
    }

    #[test]
    fn test_marker_stroke_lands_in_document() {
        let mut canvas = Canvas::default();
        stroke(&mut canvas, &[(10.0, 10.0), (20.0, 10.0), (30.0, 12.0)]);

        assert_eq!(canvas.document().len(), 1);
        let Node::Stroke(node) = &canvas.document().nodes()[0] else {
            panic!("expected a stroke");
        };
        assert_eq!(node.color, SerializableColor::yellow());
        assert!(canvas.document().content_bounds().is_some());
        assert_eq!(canvas.render().len(), 1);
    }

    #[test]
    fn test_overlay_while_drawing() {
        let mut canvas = Canvas::default();
        canvas.handle_pointer(&PointerEvent::down(1, Point::new(10.0, 10.0)));
        canvas.handle_pointer(&PointerEvent::moved(1, Point::new(20.0, 10.0)));
        assert!(canvas.document().is_empty());
        assert_eq!(canvas.render().len(), 1);
    }

    #[test]
    fn test_set_tool_cancels_session() {
        let mut canvas = Canvas::default();
        canvas.handle_pointer(&PointerEvent::down(1, Point::new(10.0, 10.0)));
        canvas.select_tool(ToolKind::Text);

        assert_eq!(canvas.session().mode(), SessionMode::Idle);
        assert_eq!(canvas.tool().kind(), ToolKind::Text);
        let transition = canvas.handle_pointer(&PointerEvent::up(1, Point::new(10.0, 10.0)));
        assert_eq!(transition, Transition::Ignored);
        assert!(canvas.document().is_empty());
    }

    #[test]
    fn test_node_eraser_removes_stroke() {
        let mut canvas = Canvas::default();
        stroke(&mut canvas, &[(10.0, 50.0), (90.0, 50.0)]);
        assert_eq!(canvas.document().len(), 1);

        canvas.set_tool(Tool::Eraser(EraserTool::new(EraserMode::Node)));
        stroke(&mut canvas, &[(50.0, 10.0), (50.0, 90.0)]);
        assert!(canvas.document().is_empty());
        assert!(canvas.document().content_bounds().is_none());
    }

    #[test]
    fn test_tool_mut_changes_settings() {
        let mut canvas = Canvas::default();
        if let Tool::Marker(marker) = canvas.tool_mut() {
            *marker = MarkerTool {
                color: SerializableColor::black(),
                ..MarkerTool::default()
            };
        }
        stroke(&mut canvas, &[(0.0, 0.0), (5.0, 5.0)]);
        let Node::Stroke(node) = &canvas.document().nodes()[0] else {
            panic!("expected a stroke");
        };
        assert_eq!(node.color, SerializableColor::black());
    }

    #[test]
    fn test_load_nodes_uses_configured_padding() {
        let config = DrawingConfig {
            bounds_padding: 5.0,
            ..DrawingConfig::default()
        };
        let mut canvas = Canvas::new(Viewport::default(), config);
        canvas.load_nodes(vec![
            Node::Stroke(StrokeNode::new(
                vec![StrokePoint::new(0.0, 0.0)],
                SerializableColor::black(),
                2.0,
            )),
            Node::Image(ImageNode::new("a.png", Point::new(100.0, 0.0), 10.0, 10.0)),
        ]);
        let bounds = canvas.document().content_bounds().unwrap();
        assert!((bounds.x + 5.0).abs() < f64::EPSILON);
        assert!((bounds.right() - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_and_zoom() {
        let mut canvas = Canvas::default();
        canvas.resize_surface(Rect::new(0.0, 0.0, 200.0, 200.0));
        canvas.zoom_at(Point::new(100.0, 100.0), 2.0);
        assert!((canvas.viewport().view_box.width - 50.0).abs() < 1e-9);
    }
}
