//! Core node types for the markup tree

use std::fmt;

use indexmap::IndexMap;

use super::shapes::{Shape, Size};

/// Identifier of a node stored in a [`Tree`](super::Tree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An attribute value, coerced to text when rendered
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on whole numbers: 1.0, not 1
            AttrValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<u8> for AttrValue {
    fn from(value: u8) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// Insertion-ordered attribute mapping
pub type Attributes = IndexMap<String, AttrValue>;

/// What a node is, beyond its generic tag/content/attribute data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A plain element rendered purely from its tag, content and attributes
    Element,
    /// `<!--text-->`, never has children
    Comment(String),
    /// Pre-formatted text injected line by line, never has children
    Raw(String),
    /// The `svg` container; its size wins over caller attributes
    Canvas(Size),
    /// A graphics element; its geometry wins over caller attributes
    Shape(Shape),
}

/// A single element of the markup tree
///
/// Parent and child links are owned by the [`Tree`](super::Tree) the node is
/// inserted into; a freshly built node is detached.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) content: Option<String>,
    pub(crate) attributes: Attributes,
    pub(crate) kind: NodeKind,
    pub(crate) paired: bool,
    pub(crate) indented_content: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) removed: bool,
}

impl Node {
    /// Create a paired, indented element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_kind(tag, NodeKind::Element)
    }

    pub(crate) fn with_kind(tag: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            tag: tag.into(),
            content: None,
            attributes: Attributes::new(),
            kind,
            paired: true,
            indented_content: true,
            parent: None,
            children: vec![],
            removed: false,
        }
    }

    /// Create an HTML comment node
    pub fn comment(text: impl Into<String>) -> Self {
        let mut node = Self::with_kind("!--", NodeKind::Comment(text.into()));
        node.paired = false;
        node
    }

    /// Create a raw text node, emitted line by line without tags
    pub fn raw(text: impl Into<String>) -> Self {
        Self::with_kind("", NodeKind::Raw(text.into()))
    }

    /// Set the text content emitted before any children
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add or replace an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set whether the element has a closing tag
    pub fn with_paired(mut self, paired: bool) -> Self {
        self.paired = paired;
        self
    }

    /// Set whether content and the closing tag go on their own lines
    pub fn with_indented_content(mut self, indented: bool) -> Self {
        self.indented_content = indented;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_paired(&self) -> bool {
        self.paired
    }

    pub fn has_indented_content(&self) -> bool {
        self.indented_content
    }

    /// Caller-supplied attributes, before any geometry is applied
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    /// Replace the text of a comment or raw node
    ///
    /// Returns false for any other kind of node.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.kind {
            NodeKind::Comment(t) | NodeKind::Raw(t) => {
                *t = text.into();
                true
            }
            _ => false,
        }
    }

    /// The node's own text, emitted between its tags
    ///
    /// Leaf nodes render their text themselves and yield nothing here.
    pub fn content(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Comment(_) | NodeKind::Raw(_) => None,
            _ => self.content.as_deref(),
        }
    }

    /// Whether children may be attached to this node
    pub fn accepts_children(&self) -> bool {
        !matches!(self.kind, NodeKind::Comment(_) | NodeKind::Raw(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has been taken out of its tree by a removal
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Attributes as rendered: caller attributes overlaid with the node's
    /// own geometry, which always wins
    pub fn effective_attributes(&self) -> Attributes {
        let mut attributes = self.attributes.clone();
        match &self.kind {
            NodeKind::Canvas(size) => {
                attributes.insert("width".to_string(), size.width.into());
                attributes.insert("height".to_string(), size.height.into());
            }
            NodeKind::Shape(shape) => {
                for (key, value) in shape.geometry_attributes() {
                    attributes.insert(key.to_string(), value);
                }
            }
            NodeKind::Element | NodeKind::Comment(_) | NodeKind::Raw(_) => {}
        }
        attributes
    }

    /// Render attributes as ` key="value"` pairs in insertion order
    pub fn attribute_string(&self) -> String {
        self.effective_attributes()
            .iter()
            .map(|(key, value)| format!(" {}=\"{}\"", key, value))
            .collect()
    }
}
