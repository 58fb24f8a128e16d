//! Group node for combining multiple nodes.

use super::{Node, NodeId};
use crate::geometry::Bounds;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of nodes handled as a single unit.
/// Groups can contain other groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    pub(crate) id: NodeId,
    pub children: Vec<Node>,
    #[serde(default)]
    pub locked: bool,
}

impl GroupNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            locked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Merged bounds of all children; zero-sized when empty.
    pub fn bounds(&self) -> Bounds {
        self.children
            .iter()
            .map(Node::bounds)
            .reduce(|acc, b| acc.merge(&b))
            .unwrap_or_default()
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Node> {
        self.children
    }
}
