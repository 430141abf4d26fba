//! Graphics primitives and the shape elements built from them

use std::fmt;

use super::node::{AttrValue, Node, NodeKind};

/// An RGB color, rendered as `rgb(r, g, b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// A point on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Geometry and style of a graphics element
///
/// These fields are authoritative: when the element is rendered they
/// overwrite any caller attribute with the same name.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        position: Position,
        radius: i64,
        fill: Color,
        opacity: f64,
    },
    Rectangle {
        position: Position,
        width: i64,
        height: i64,
        fill: Color,
        opacity: f64,
    },
    Ellipse {
        position: Position,
        rx: i64,
        ry: i64,
        fill: Color,
        opacity: f64,
    },
    /// A text label anchored at a position; the text is the node content
    TextLabel { position: Position },
}

impl Shape {
    pub fn circle(position: Position, radius: i64) -> Self {
        Shape::Circle {
            position,
            radius,
            fill: Color::default(),
            opacity: 1.0,
        }
    }

    pub fn rectangle(position: Position, width: i64, height: i64) -> Self {
        Shape::Rectangle {
            position,
            width,
            height,
            fill: Color::default(),
            opacity: 1.0,
        }
    }

    pub fn ellipse(position: Position, rx: i64, ry: i64) -> Self {
        Shape::Ellipse {
            position,
            rx,
            ry,
            fill: Color::default(),
            opacity: 1.0,
        }
    }

    /// Replace the fill color; no effect on text labels
    pub fn with_fill(mut self, color: Color) -> Self {
        match &mut self {
            Shape::Circle { fill, .. }
            | Shape::Rectangle { fill, .. }
            | Shape::Ellipse { fill, .. } => *fill = color,
            Shape::TextLabel { .. } => {}
        }
        self
    }

    /// Replace the fill opacity; no effect on text labels
    pub fn with_opacity(mut self, value: f64) -> Self {
        match &mut self {
            Shape::Circle { opacity, .. }
            | Shape::Rectangle { opacity, .. }
            | Shape::Ellipse { opacity, .. } => *opacity = value,
            Shape::TextLabel { .. } => {}
        }
        self
    }

    /// SVG tag name
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Rectangle { .. } => "rect",
            Shape::Ellipse { .. } => "ellipse",
            Shape::TextLabel { .. } => "text",
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Shape::Circle { position, .. }
            | Shape::Rectangle { position, .. }
            | Shape::Ellipse { position, .. }
            | Shape::TextLabel { position } => *position,
        }
    }

    /// Attributes written over the caller's on render, in output order
    pub fn geometry_attributes(&self) -> Vec<(&'static str, AttrValue)> {
        match self {
            Shape::Circle {
                position,
                radius,
                fill,
                opacity,
            } => vec![
                ("cx", position.x.into()),
                ("cy", position.y.into()),
                ("r", (*radius).into()),
                ("fill", fill.to_string().into()),
                ("fill-opacity", (*opacity).into()),
            ],
            Shape::Rectangle {
                position,
                width,
                height,
                fill,
                opacity,
            } => vec![
                ("x", position.x.into()),
                ("y", position.y.into()),
                ("width", (*width).into()),
                ("height", (*height).into()),
                ("fill", fill.to_string().into()),
                ("fill-opacity", (*opacity).into()),
            ],
            Shape::Ellipse {
                position,
                rx,
                ry,
                fill,
                opacity,
            } => vec![
                ("cx", position.x.into()),
                ("cy", position.y.into()),
                ("rx", (*rx).into()),
                ("ry", (*ry).into()),
                ("fill", fill.to_string().into()),
                ("fill-opacity", (*opacity).into()),
            ],
            Shape::TextLabel { position } => {
                vec![("x", position.x.into()), ("y", position.y.into())]
            }
        }
    }

    /// Wrap the shape in a node
    ///
    /// Shapes are paired with inline content, so an empty circle renders as
    /// `<circle ...></circle>`.
    pub fn into_node(self) -> Node {
        let tag = self.tag();
        Node::with_kind(tag, NodeKind::Shape(self)).with_indented_content(false)
    }
}

impl Node {
    /// A text label at `position` showing `text`
    pub fn text_label(position: Position, text: impl Into<String>) -> Self {
        Shape::TextLabel { position }.into_node().with_content(text)
    }

    /// The shape carried by this node, if any
    pub fn shape(&self) -> Option<&Shape> {
        match &self.kind {
            NodeKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}

impl From<Shape> for Node {
    fn from(shape: Shape) -> Self {
        shape.into_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(150, 0, 255).to_string(), "rgb(150, 0, 255)");
        assert_eq!(Color::default(), Color::RED);
    }

    #[test]
    fn test_circle_attributes() {
        let node = Shape::circle(Position::new(25, 25), 50)
            .with_fill(Color::rgb(150, 0, 255))
            .into_node();
        assert_eq!(
            node.attribute_string(),
            r#" cx="25" cy="25" r="50" fill="rgb(150, 0, 255)" fill-opacity="1.0""#
        );
    }

    #[test]
    fn test_rectangle_attributes() {
        let node = Shape::rectangle(Position::new(100, 100), 100, 50)
            .with_opacity(0.4)
            .into_node();
        assert_eq!(
            node.attribute_string(),
            r#" x="100" y="100" width="100" height="50" fill="rgb(255, 0, 0)" fill-opacity="0.4""#
        );
    }

    #[test]
    fn test_ellipse_attributes() {
        let node = Shape::ellipse(Position::new(300, 100), 100, 50)
            .with_fill(Color::BLUE)
            .into_node();
        assert_eq!(
            node.attribute_string(),
            r#" cx="300" cy="100" rx="100" ry="50" fill="rgb(0, 0, 255)" fill-opacity="1.0""#
        );
    }

    #[test]
    fn test_geometry_overwrites_caller_attributes() {
        let node = Shape::circle(Position::new(10, 20), 5)
            .into_node()
            .with_attribute("id", "dot")
            .with_attribute("cx", 999);
        assert_eq!(
            node.attribute_string(),
            r#" id="dot" cx="10" cy="20" r="5" fill="rgb(255, 0, 0)" fill-opacity="1.0""#
        );
        // the caller's value is still stored, it just never renders
        assert_eq!(node.attributes().get("cx"), Some(&AttrValue::Int(999)));
    }

    #[test]
    fn test_text_label() {
        let node = Node::text_label(Position::new(5, 15), "hello");
        assert_eq!(node.tag(), "text");
        assert!(node.is_paired());
        assert!(!node.has_indented_content());
        assert_eq!(node.content(), Some("hello"));
        assert_eq!(node.attribute_string(), r#" x="5" y="15""#);
    }

    #[test]
    fn test_style_setters_ignore_text_labels() {
        let label = Shape::TextLabel {
            position: Position::new(1, 2),
        };
        assert_eq!(label.clone().with_fill(Color::BLUE).with_opacity(0.1), label);
    }
}
