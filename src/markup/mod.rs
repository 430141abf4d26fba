//! Markup tree model and renderer
//!
//! Nodes are stored in a [`Tree`] arena and serialized to indented HTML/SVG
//! text. Shapes and canvases carry typed geometry that is written over any
//! caller attribute of the same name when rendered.

pub mod canvas;
pub mod document;
pub mod node;
pub mod shapes;
pub mod tree;

pub use canvas::Canvas;
pub use document::Document;
pub use node::{AttrValue, Attributes, Node, NodeId, NodeKind};
pub use shapes::{Color, Position, Shape, Size};
pub use tree::{Tree, INDENT};
