//! Arena-backed markup tree and its text serialization

use log::debug;

use super::node::{Node, NodeId, NodeKind};

/// One level of indentation in rendered output
pub const INDENT: &str = "    ";

/// Split text into lines on every Unicode line boundary
///
/// `\r\n` counts as one break, and a trailing break does not start an empty
/// final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = vec![];
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some((j, '\n')) = chars.peek().copied() {
                chars.next();
                end = j + 1;
            }
        }
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Owns every node and the parent/child links between them
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever inserted, removed ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a node without attaching it anywhere
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        node.removed = false;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// Returns the child for chaining, or `None` without touching the tree if
    /// the parent cannot hold children, the child is already attached or was
    /// removed, or the link would form a cycle.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        if !self.can_attach(parent, child) {
            debug!("rejected child {:?} for parent {:?}", child, parent);
            return None;
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Some(child)
    }

    /// Insert `node` and attach it to `parent` in one step
    ///
    /// Nothing is stored when the parent refuses children.
    pub fn append(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        match self.get(parent) {
            Some(p) if p.accepts_children() && !p.removed => {}
            _ => {
                debug!("rejected new <{}> for parent {:?}", node.tag, parent);
                return None;
            }
        }
        let id = self.insert(node);
        self.add(parent, id)
    }

    fn can_attach(&self, parent: NodeId, child: NodeId) -> bool {
        let (Some(p), Some(c)) = (self.get(parent), self.get(child)) else {
            return false;
        };
        if !p.accepts_children() || p.removed || c.removed || c.parent.is_some() {
            return false;
        }
        // walk up from the parent; meeting the child means a cycle
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return false;
            }
            cursor = self.parent(id);
        }
        true
    }

    /// Detach a node from its parent and break up its whole subtree
    ///
    /// Every descendant ends up parentless and childless. Removed nodes can
    /// never be attached again. Their slots stay in the arena until the tree
    /// itself is dropped, so a tree that keeps adding and removing only grows.
    pub fn remove(&mut self, id: NodeId) {
        if id.0 >= self.nodes.len() {
            return;
        }
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.parent = None;
            node.removed = true;
            stack.append(&mut node.children);
        }
    }

    /// Serialize a node and its descendants
    pub fn render(&self, id: NodeId) -> String {
        self.render_at(id, 0)
    }

    /// Serialize a node nested `depth` levels deep
    pub fn render_at(&self, id: NodeId, depth: usize) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        let tabs = INDENT.repeat(depth);

        match &node.kind {
            NodeKind::Comment(text) => return format!("{}<!--{}-->", tabs, text),
            NodeKind::Raw(text) => {
                return split_lines(text)
                    .into_iter()
                    .map(|line| format!("{}{}", tabs, line))
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            NodeKind::Element | NodeKind::Canvas(_) | NodeKind::Shape(_) => {}
        }

        let mut out = format!("{}<{}{}>", tabs, node.tag, node.attribute_string());
        if !node.paired {
            out.push('\n');
            return out;
        }

        if let Some(content) = node.content() {
            if node.indented_content {
                out.push('\n');
                out.push_str(&tabs);
                out.push_str(INDENT);
            }
            out.push_str(content);
        }

        // children always start on a new line, indented or not
        for child in &node.children {
            out.push('\n');
            out.push_str(&self.render_at(*child, depth + 1));
        }

        if node.indented_content {
            out.push('\n');
            out.push_str(&tabs);
        }
        out.push_str(&format!("</{}>", node.tag));
        out
    }
}
