//! Image placement node.

use super::NodeId;
use crate::geometry::Bounds;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image referenced by URI; loading and decoding happen outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub(crate) id: NodeId,
    pub uri: String,
    pub bounds: Bounds,
    #[serde(default)]
    pub locked: bool,
}

impl ImageNode {
    /// Place an image with its top-left corner at `position`.
    pub fn new(uri: impl Into<String>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri: uri.into(),
            bounds: Bounds::new(position.x, position.y, width, height),
            locked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}
