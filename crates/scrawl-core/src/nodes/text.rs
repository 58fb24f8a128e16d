//! Text node.

use super::{NodeId, SerializableColor};
use crate::geometry::Bounds;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of a freshly placed text box.
pub const DEFAULT_TEXT_BOX_WIDTH: f64 = 200.0;

/// A text box. Content is edited by the host; the core only places it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub(crate) id: NodeId,
    pub content: String,
    pub font_size: f64,
    pub color: SerializableColor,
    pub bounds: Bounds,
    #[serde(default)]
    pub locked: bool,
}

impl TextNode {
    /// Create an empty text box at `position`, two lines tall.
    pub fn new(position: Point, font_size: f64, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: String::new(),
            font_size,
            color,
            bounds: Bounds::new(position.x, position.y, DEFAULT_TEXT_BOX_WIDTH, font_size * 2.0),
            locked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}
