//! Drawing nodes created and deleted by tools.

mod group;
mod image;
mod stroke;
mod text;

pub use group::GroupNode;
pub use image::ImageNode;
pub use stroke::{EraserStrokeNode, StrokeNode};
pub use text::TextNode;

use crate::geometry::{Bounds, StrokePoint};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for nodes.
pub type NodeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn yellow() -> Self {
        Self::new(255, 255, 0, 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// This color as a peniko Color with `opacity` folded into alpha.
    pub fn with_opacity(&self, opacity: f64) -> Color {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Enum wrapper for all node types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Stroke(StrokeNode),
    EraserStroke(EraserStrokeNode),
    Image(ImageNode),
    Text(TextNode),
    Group(GroupNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Stroke(n) => n.id,
            Node::EraserStroke(n) => n.id,
            Node::Image(n) => n.id,
            Node::Text(n) => n.id,
            Node::Group(n) => n.id,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Node::Stroke(n) => n.bounds,
            Node::EraserStroke(n) => n.bounds,
            Node::Image(n) => n.bounds,
            Node::Text(n) => n.bounds,
            Node::Group(n) => n.bounds(),
        }
    }

    pub fn is_locked(&self) -> bool {
        match self {
            Node::Stroke(n) => n.locked,
            Node::EraserStroke(n) => n.locked,
            Node::Image(n) => n.locked,
            Node::Text(n) => n.locked,
            Node::Group(n) => n.locked,
        }
    }

    /// Stroke points, for nodes that are drawn from a centerline.
    pub fn points(&self) -> Option<&[StrokePoint]> {
        match self {
            Node::Stroke(n) => Some(&n.points),
            Node::EraserStroke(n) => Some(&n.points),
            _ => None,
        }
    }

    /// Region this node contributes to the scrollable canvas area.
    ///
    /// Centerline nodes use their raw points grown by `padding`; everything
    /// else uses its own bounds.
    pub fn content_bounds(&self, padding: f64) -> Option<Bounds> {
        match self {
            Node::Group(group) => group
                .children
                .iter()
                .filter_map(|child| child.content_bounds(padding))
                .reduce(|acc, b| acc.merge(&b)),
            _ => match self.points() {
                Some(points) => Bounds::from_points(points, padding),
                None => Some(self.bounds()),
            },
        }
    }
}
