//! Ordered node list with incrementally maintained content bounds.

use crate::geometry::Bounds;
use crate::nodes::{Node, NodeId};
use std::collections::HashSet;

/// Padding around stroke points when computing the scrollable content area.
pub const DEFAULT_CONTENT_PADDING: f64 = 50.0;

/// A node mutation requested by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Add(Node),
    Delete(Vec<NodeId>),
}

/// The drawing's nodes in paint order (back to front).
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    content_bounds: Option<Bounds>,
    padding: f64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_padding(DEFAULT_CONTENT_PADDING)
    }

    pub fn with_padding(padding: f64) -> Self {
        Self {
            nodes: Vec::new(),
            content_bounds: None,
            padding,
        }
    }

    /// Build a document from existing nodes.
    pub fn from_nodes(nodes: Vec<Node>, padding: f64) -> Self {
        let mut document = Self {
            nodes,
            content_bounds: None,
            padding,
        };
        document.recalculate_bounds();
        document
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Union of every node's content area, or `None` for an empty drawing.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.content_bounds
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Append a node on top, growing the content bounds incrementally.
    pub fn add(&mut self, node: Node) {
        if let Some(bounds) = node.content_bounds(self.padding) {
            self.content_bounds = Some(Bounds::merge_into(self.content_bounds, bounds));
        }
        self.nodes.push(node);
    }

    /// Remove nodes by ID, returning how many were removed.
    pub fn delete(&mut self, ids: &[NodeId]) -> usize {
        let ids: HashSet<NodeId> = ids.iter().copied().collect();
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(&n.id()));
        let removed = before - self.nodes.len();
        if removed > 0 {
            self.recalculate_bounds();
        }
        removed
    }

    /// Apply tool-requested changes in order.
    pub fn apply(&mut self, changes: Vec<NodeChange>) {
        for change in changes {
            match change {
                NodeChange::Add(node) => self.add(node),
                NodeChange::Delete(ids) => {
                    let removed = self.delete(&ids);
                    if removed != ids.len() {
                        log::debug!("Deleted {} of {} requested nodes", removed, ids.len());
                    }
                }
            }
        }
    }

    fn recalculate_bounds(&mut self) {
        let padding = self.padding;
        self.content_bounds = self
            .nodes
            .iter()
            .filter_map(|n| n.content_bounds(padding))
            .reduce(|acc, b| acc.merge(&b));
    }
}
