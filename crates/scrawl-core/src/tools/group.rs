//! Rubber-band grouping.

use super::{ToolContext, ToolHandler, ToolKind, ToolResult};
use crate::geometry::{Bounds, StrokePoint};
use crate::nodes::{GroupNode, Node};
use crate::outline::OutlineParams;
use crate::render::{RenderItem, StrokeGeometry};
use kurbo::{Point, Rect, Shape as _};
use peniko::Color;

/// Drag a selection rectangle; two or more selected nodes become a group,
/// and a lone selected group is dissolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTool;

/// Rectangle spanned by the first point of `path` and `end`.
fn selection_rect(path: &[StrokePoint], end: Point) -> Option<Rect> {
    let start = path.first()?.to_point();
    Some(Rect::from_points(start, end))
}

impl ToolHandler for GroupTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Group
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolResult<()> {
        let Some(rect) = selection_rect(ctx.path, ctx.point.to_point()) else {
            return Ok(());
        };
        let area = Bounds::from(rect);
        let selected: Vec<&Node> = ctx
            .nodes()
            .iter()
            .filter(|n| !n.is_locked() && n.bounds().intersects(&area))
            .collect();

        match selected.as_slice() {
            [Node::Group(group)] => {
                log::debug!("Ungrouping {} children", group.children.len());
                ctx.delete_nodes(vec![group.id()]);
                for child in group.clone().ungroup() {
                    ctx.add_node(child);
                }
            }
            [_, _, ..] => {
                log::debug!("Grouping {} nodes", selected.len());
                let ids = selected.iter().map(|n| n.id()).collect();
                let children = selected.iter().map(|&n| n.clone()).collect();
                ctx.delete_nodes(ids);
                ctx.add_node(Node::Group(GroupNode::new(children)));
            }
            _ => {}
        }
        Ok(())
    }

    fn overlay(
        &self,
        path: &[StrokePoint],
        pointer: Option<Point>,
        _params: &OutlineParams,
    ) -> Vec<RenderItem> {
        let end = pointer.or_else(|| path.last().map(StrokePoint::to_point));
        end.and_then(|end| selection_rect(path, end))
            .map(|rect| RenderItem {
                geometry: StrokeGeometry::Stroke {
                    path: rect.to_path(0.1),
                    width: 1.0,
                },
                color: Color::from_rgba8(0, 120, 215, 255),
            })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeChange;
    use crate::nodes::{ImageNode, SerializableColor, TextNode};

    fn image_at(x: f64, y: f64) -> Node {
        Node::Image(ImageNode::new("a.png", Point::new(x, y), 10.0, 10.0))
    }

    fn release(nodes: &[Node], from: (f64, f64), to: (f64, f64)) -> Vec<NodeChange> {
        let path = [StrokePoint::new(from.0, from.1), StrokePoint::new(to.0, to.1)];
        let mut ctx = ToolContext::new(path[1], &path, nodes);
        GroupTool.on_pointer_up(&mut ctx).unwrap();
        ctx.into_changes()
    }

    #[test]
    fn test_groups_two_selected_nodes() {
        let nodes = vec![image_at(0.0, 0.0), image_at(20.0, 20.0), image_at(500.0, 500.0)];
        let changes = release(&nodes, (-5.0, -5.0), (25.0, 25.0));

        let [NodeChange::Delete(ids), NodeChange::Add(Node::Group(group))] = changes.as_slice()
        else {
            panic!("expected delete then add, got {changes:?}");
        };
        assert_eq!(ids, &vec![nodes[0].id(), nodes[1].id()]);
        assert_eq!(group.children, nodes[..2].to_vec());
    }

    #[test]
    fn test_single_node_is_not_grouped() {
        let nodes = vec![image_at(0.0, 0.0), image_at(500.0, 500.0)];
        assert!(release(&nodes, (-5.0, -5.0), (5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_locked_nodes_excluded() {
        let mut locked = image_at(20.0, 20.0);
        if let Node::Image(image) = &mut locked {
            image.locked = true;
        }
        let nodes = vec![image_at(0.0, 0.0), locked];
        assert!(release(&nodes, (-5.0, -5.0), (40.0, 40.0)).is_empty());
    }

    #[test]
    fn test_lone_group_is_dissolved() {
        let children = vec![
            image_at(0.0, 0.0),
            Node::Text(TextNode::new(Point::new(0.0, 20.0), 10.0, SerializableColor::black())),
        ];
        let group = Node::Group(GroupNode::new(children.clone()));
        let group_id = group.id();
        let changes = release(&[group], (-1.0, -1.0), (1.0, 1.0));

        assert_eq!(changes[0], NodeChange::Delete(vec![group_id]));
        assert_eq!(changes[1], NodeChange::Add(children[0].clone()));
        assert_eq!(changes[2], NodeChange::Add(children[1].clone()));
    }

    #[test]
    fn test_overlay_rectangle() {
        let path = [StrokePoint::new(0.0, 0.0)];
        let items = GroupTool.overlay(&path, Some(Point::new(10.0, 10.0)), &OutlineParams::default());
        assert_eq!(items.len(), 1);
        assert!(GroupTool.overlay(&[], None, &OutlineParams::default()).is_empty());
    }
}
