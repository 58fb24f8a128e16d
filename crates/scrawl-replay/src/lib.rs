//! Replay recorded pointer scripts through a [`Canvas`] and export SVG.
//!
//! A script is a JSON document describing the surface and a list of steps
//! (pointer events, pan modifier changes, tool switches, zooms). Replaying it
//! drives the same session and tools a live host would.

use kurbo::{Point, Rect, Size};
use scrawl_core::config::ConfigError;
use scrawl_core::nodes::{ImageNode, TextNode};
use scrawl_core::render::{BACKGROUND_COLOR, render_node};
use scrawl_core::{
    Canvas, DrawingConfig, Node, OutlineParams, PointerEvent, RenderItem, SerializableColor,
    StrokeGeometry, Tool, ToolHandler as _, ToolKind, Transition, ViewBox, Viewport,
};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("SVG formatting failed")]
    Format(#[from] std::fmt::Error),
    #[error("Surface must have a positive size, got {0}x{1}")]
    InvalidSurface(f64, f64),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted input.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Pointer(PointerEvent),
    PanTrigger { active: bool },
    Tool { tool: ToolKind },
    Zoom { x: f64, y: f64, factor: f64 },
    Resize { width: f64, height: f64 },
}

/// A recorded drawing session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub surface: Size,
    /// Defaults to the surface rectangle at the origin.
    #[serde(default)]
    pub view_box: Option<ViewBox>,
    #[serde(default)]
    pub tool: ToolKind,
    /// Source used by the image tool.
    #[serde(default)]
    pub image_uri: Option<String>,
    /// Drawing to start from.
    #[serde(default)]
    pub nodes: Vec<Node>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn make_tool(&self, kind: ToolKind) -> Tool {
        let mut tool = Tool::from_kind(kind);
        if let (Tool::Image(image), Some(uri)) = (&mut tool, &self.image_uri) {
            image.uri = uri.clone();
        }
        tool
    }
}

/// Run every step of `script` through a fresh canvas.
pub fn replay(script: &Script, config: DrawingConfig) -> ReplayResult<Canvas> {
    let Size { width, height } = script.surface;
    if !(width > 0.0 && height > 0.0) {
        return Err(ReplayError::InvalidSurface(width, height));
    }

    let view_box = script
        .view_box
        .unwrap_or_else(|| ViewBox::new(0.0, 0.0, width, height));
    let surface = Rect::from_origin_size(Point::ORIGIN, script.surface);
    let mut canvas = Canvas::new(Viewport::new(view_box, surface), config);
    if !script.nodes.is_empty() {
        canvas.load_nodes(script.nodes.clone());
    }
    canvas.set_tool(script.make_tool(script.tool));

    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Pointer(event) => {
                if let Transition::Aborted(err) = canvas.handle_pointer(event) {
                    log::warn!("Step {index}: {err}");
                }
            }
            Step::PanTrigger { active } => canvas.set_pan_trigger(*active),
            Step::Tool { tool } => canvas.set_tool(script.make_tool(*tool)),
            Step::Zoom { x, y, factor } => canvas.zoom_at(Point::new(*x, *y), *factor),
            Step::Resize { width, height } => {
                canvas.resize_surface(Rect::new(0.0, 0.0, *width, *height))
            }
        }
    }

    log::info!(
        "Replayed {} steps with {:?}: {} nodes",
        script.steps.len(),
        canvas.tool().kind(),
        canvas.document().len()
    );
    Ok(canvas)
}

/// Serialize the canvas's drawing as a standalone SVG document.
pub fn to_svg(canvas: &Canvas) -> ReplayResult<String> {
    let viewport = canvas.viewport();
    let vb = viewport.view_box;
    let mut svg = String::new();

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        viewport.surface.width(),
        viewport.surface.height(),
        vb.x,
        vb.y,
        vb.width,
        vb.height
    )?;
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        vb.x,
        vb.y,
        vb.width,
        vb.height,
        BACKGROUND_COLOR.to_hex()
    )?;

    let params = &canvas.config().outline;
    for node in canvas.document().nodes() {
        write_node(&mut svg, node, params)?;
    }
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn write_node(out: &mut String, node: &Node, params: &OutlineParams) -> std::fmt::Result {
    match node {
        Node::Image(image) => write_image(out, image),
        Node::Text(text) => write_text(out, text),
        Node::Group(group) => {
            writeln!(out, r#"<g id="{}">"#, group.id())?;
            for child in &group.children {
                write_node(out, child, params)?;
            }
            writeln!(out, "</g>")
        }
        Node::Stroke(_) | Node::EraserStroke(_) => {
            let mut items = Vec::new();
            render_node(node, params, &mut items);
            for item in &items {
                write_item(out, item)?;
            }
            Ok(())
        }
    }
}

fn write_item(out: &mut String, item: &RenderItem) -> std::fmt::Result {
    let color = SerializableColor::from(item.color);
    let opacity = f64::from(color.a) / 255.0;
    match &item.geometry {
        StrokeGeometry::Fill(path) => writeln!(
            out,
            r#"<path d="{}" fill="{}" fill-opacity="{:.3}"/>"#,
            path.to_svg(),
            color.to_hex(),
            opacity
        ),
        StrokeGeometry::Stroke { path, width } => writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{:.3}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path.to_svg(),
            color.to_hex(),
            opacity,
            width
        ),
    }
}

fn write_image(out: &mut String, image: &ImageNode) -> std::fmt::Result {
    let b = image.bounds;
    writeln!(
        out,
        r#"<image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
        escape(&image.uri),
        b.x,
        b.y,
        b.width,
        b.height
    )
}

fn write_text(out: &mut String, text: &TextNode) -> std::fmt::Result {
    let b = text.bounds;
    writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
        b.x,
        b.y,
        text.font_size,
        text.color.to_hex(),
        escape(&text.content)
    )
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
