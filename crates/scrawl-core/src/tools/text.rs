//! Text box placement.

use super::{ToolContext, ToolError, ToolHandler, ToolKind, ToolResult, ToolSettings};
use crate::nodes::{Node, SerializableColor, TextNode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Drops an empty text box where the pointer is released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTool {
    pub font_size: f64,
    pub color: SerializableColor,
}

impl Default for TextTool {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: SerializableColor::black(),
        }
    }
}

impl ToolHandler for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        if !(self.font_size > 0.0 && self.font_size.is_finite()) {
            return Err(ToolError::InvalidFontSize(self.font_size));
        }
        ctx.add_node(Node::Text(TextNode::new(
            ctx.point.to_point(),
            self.font_size,
            self.color,
        )));
        Ok(())
    }

    fn settings(&self) -> ToolSettings {
        ToolSettings {
            color: Some(self.color),
            ..ToolSettings::new(ToolKind::Text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeChange;
    use crate::geometry::{Bounds, StrokePoint};

    #[test]
    fn test_text_box_on_release() {
        let mut tool = TextTool::default();
        let mut ctx = ToolContext::new(StrokePoint::new(5.0, 6.0), &[], &[]);
        tool.on_pointer_down(&mut ctx).unwrap();
        assert!(ctx.changes().is_empty());

        tool.on_pointer_up(&mut ctx).unwrap();
        let [NodeChange::Add(Node::Text(text))] = ctx.changes() else {
            panic!("expected a text node");
        };
        assert!(text.content.is_empty());
        assert_eq!(text.bounds, Bounds::new(5.0, 6.0, 200.0, 48.0));
    }

    #[test]
    fn test_invalid_font_size() {
        let mut tool = TextTool {
            font_size: -1.0,
            ..TextTool::default()
        };
        let mut ctx = ToolContext::new(StrokePoint::new(0.0, 0.0), &[], &[]);
        assert_eq!(tool.on_pointer_up(&mut ctx), Err(ToolError::InvalidFontSize(-1.0)));
    }
}
