//! Image placement.

use super::{ToolContext, ToolError, ToolHandler, ToolKind, ToolResult, ToolSettings};
use crate::nodes::{ImageNode, Node};
use serde::{Deserialize, Serialize};

/// Side length of a freshly placed image.
pub const DEFAULT_IMAGE_SIZE: f64 = 200.0;

/// Places the selected image with its top-left corner at the press point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTool {
    /// Source chosen by the host's asset picker; empty until one is chosen.
    pub uri: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ImageTool {
    fn default() -> Self {
        Self::new("")
    }
}

impl ImageTool {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl ToolHandler for ImageTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Image
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        if self.uri.trim().is_empty() {
            return Err(ToolError::MissingImageSource);
        }
        ctx.add_node(Node::Image(ImageNode::new(
            self.uri.clone(),
            ctx.point.to_point(),
            self.width,
            self.height,
        )));
        Ok(())
    }

    fn settings(&self) -> ToolSettings {
        ToolSettings {
            width: Some(self.width),
            ..ToolSettings::new(ToolKind::Image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeChange;
    use crate::geometry::{Bounds, StrokePoint};

    #[test]
    fn test_places_image_at_point() {
        let mut tool = ImageTool::new("cat.png");
        let mut ctx = ToolContext::new(StrokePoint::new(30.0, 40.0), &[], &[]);
        tool.on_pointer_down(&mut ctx).unwrap();

        let [NodeChange::Add(Node::Image(image))] = ctx.changes() else {
            panic!("expected an image");
        };
        assert_eq!(image.uri, "cat.png");
        assert_eq!(image.bounds, Bounds::new(30.0, 40.0, 200.0, 200.0));
    }

    #[test]
    fn test_missing_source_is_error() {
        let mut tool = ImageTool::default();
        let mut ctx = ToolContext::new(StrokePoint::new(0.0, 0.0), &[], &[]);
        assert_eq!(tool.on_pointer_down(&mut ctx), Err(ToolError::MissingImageSource));
        assert!(ctx.changes().is_empty());
    }
}
