//! The `svg` container element

use super::node::{Node, NodeId, NodeKind};
use super::shapes::{Color, Position, Shape, Size};
use super::tree::Tree;

/// Builder for `svg` canvas nodes
pub struct Canvas;

impl Canvas {
    /// An `svg` node whose `width`/`height` always come from `size`
    pub fn new(size: Size) -> Node {
        Node::with_kind("svg", NodeKind::Canvas(size))
    }

    /// The fixed demonstration pattern: a red row at y=50 and a blue row at
    /// y=250, five circles each, emitted red then blue per column
    pub fn demo_pattern() -> Vec<Node> {
        (0..5)
            .flat_map(|i| {
                let x = 50 + 100 * i;
                [(50, Color::RED), (250, Color::BLUE)].map(|(y, color)| {
                    Shape::circle(Position::new(x, y), 50)
                        .with_fill(color)
                        .with_opacity(1.0)
                        .into_node()
                })
            })
            .collect()
    }
}

impl Tree {
    /// Append the demonstration pattern to a canvas
    ///
    /// Returns false and leaves the tree alone if `canvas` is not a live
    /// canvas node.
    pub fn populate_demo(&mut self, canvas: NodeId) -> bool {
        match self.get(canvas) {
            Some(node) if matches!(node.kind(), NodeKind::Canvas(_)) && !node.is_removed() => {}
            _ => return false,
        }
        for circle in Canvas::demo_pattern() {
            self.append(canvas, circle);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canvas_size_overrides_attributes() {
        let node = Canvas::new(Size::new(500, 300))
            .with_attribute("width", 1)
            .with_attribute("xmlns", "http://www.w3.org/2000/svg");
        assert_eq!(
            node.attribute_string(),
            r#" width="500" xmlns="http://www.w3.org/2000/svg" height="300""#
        );
    }

    #[test]
    fn test_demo_pattern_layout() {
        let mut tree = Tree::new();
        let canvas = tree.insert(Canvas::new(Size::new(500, 300)));
        assert!(tree.populate_demo(canvas));

        let shapes: Vec<Shape> = tree
            .children(canvas)
            .iter()
            .map(|id| tree.get(*id).and_then(Node::shape).cloned().unwrap())
            .collect();
        assert_eq!(shapes.len(), 10);

        for (i, pair) in shapes.chunks(2).enumerate() {
            let x = 50 + 100 * i as i64;
            assert_eq!(
                pair[0],
                Shape::circle(Position::new(x, 50), 50).with_fill(Color::RED)
            );
            assert_eq!(
                pair[1],
                Shape::circle(Position::new(x, 250), 50).with_fill(Color::BLUE)
            );
        }
    }

    #[test]
    fn test_populate_demo_requires_canvas() {
        let mut tree = Tree::new();
        let div = tree.insert(Node::new("div"));
        assert!(!tree.populate_demo(div));
        assert!(tree.children(div).is_empty());
    }

    #[test]
    fn test_first_demo_circle_markup() {
        let mut tree = Tree::new();
        let canvas = tree.insert(Canvas::new(Size::new(500, 300)));
        tree.populate_demo(canvas);
        let first = tree.children(canvas)[0];
        assert_eq!(
            tree.render(first),
            r#"<circle cx="50" cy="50" r="50" fill="rgb(255, 0, 0)" fill-opacity="1.0"></circle>"#
        );
    }
}
