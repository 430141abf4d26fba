//! HTML document skeleton and its output sink

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use log::debug;
use rand::Rng;

use crate::error::ShapeError;
use crate::generator::{RandomShape, ShapeConfig};
use crate::Error;

use super::canvas::Canvas;
use super::node::{Node, NodeId};
use super::shapes::Size;
use super::tree::Tree;

/// File extension appended to document names that lack it
pub const EXTENSION: &str = ".html";

/// Base name used when none is given
pub const DEFAULT_NAME: &str = "document";

/// Canvas size used by the art generators
pub const ART_SIZE: Size = Size {
    width: 500,
    height: 300,
};

/// Append [`EXTENSION`] unless the name already ends with it
pub fn file_name_for(name: &str) -> String {
    if name.ends_with(EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, EXTENSION)
    }
}

/// An `html`/`head`/`body` tree bound to the sink it is written to
///
/// The sink is held for the document's whole lifetime and released once,
/// either through [`Document::into_sink`] or when the document is dropped.
pub struct Document<W: Write = File> {
    file_name: String,
    tree: Tree,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    sink: W,
}

impl Document<File> {
    /// Create `<name>.html` and the document skeleton
    pub fn create(name: &str) -> Result<Self, Error> {
        let file_name = file_name_for(name);
        let file = File::create(&file_name).map_err(|source| Error::Io {
            path: PathBuf::from(&file_name),
            source,
        })?;
        Ok(Self::with_sink(&file_name, file))
    }
}

impl<W: Write> Document<W> {
    /// Build the skeleton around an already acquired sink
    pub fn with_sink(name: &str, sink: W) -> Self {
        let mut tree = Tree::new();
        let root = tree.insert(Node::new("html"));
        let head = tree.insert(Node::new("head"));
        let body = tree.insert(Node::new("body"));
        tree.add(root, head);
        tree.add(root, body);

        Self {
            file_name: file_name_for(name),
            tree,
            root,
            head,
            body,
            sink,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn add_title(&mut self) {
        self.tree.append(
            self.head,
            Node::new("title")
                .with_content("My Art")
                .with_indented_content(false),
        );
    }

    fn add_canvas(&mut self) -> Option<NodeId> {
        let canvas = self.tree.append(self.body, Canvas::new(ART_SIZE))?;
        self.tree
            .append(canvas, Node::comment("Define SVG drawing box"));
        Some(canvas)
    }

    /// Add a page title and a canvas filled with the demonstration pattern
    pub fn gen_art(&mut self) {
        self.add_title();
        if let Some(canvas) = self.add_canvas() {
            self.tree.populate_demo(canvas);
        }
    }

    /// Add a page title and a canvas filled with `count` random shapes
    ///
    /// Returns the sampled shapes in drawing order.
    pub fn gen_random_art<R: Rng + ?Sized>(
        &mut self,
        config: &ShapeConfig,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<RandomShape>, ShapeError> {
        let shapes = (0..count)
            .map(|_| RandomShape::sample_with(config, &mut *rng))
            .collect::<Vec<_>>();
        let nodes = shapes
            .iter()
            .map(RandomShape::to_node)
            .collect::<Result<Vec<_>, _>>()?;

        self.add_title();
        if let Some(canvas) = self.add_canvas() {
            for node in nodes {
                self.tree.append(canvas, node);
            }
        }
        Ok(shapes)
    }

    /// Serialize the whole document
    pub fn render(&self) -> String {
        self.tree.render(self.root)
    }

    /// Write the serialized document to the sink
    pub fn output(&mut self) -> Result<(), Error> {
        let html = self.render();
        debug!("writing {} bytes to {}", html.len(), self.file_name);
        self.sink
            .write_all(html.as_bytes())
            .and_then(|_| self.sink.flush())
            .map_err(|source| Error::Io {
                path: PathBuf::from(&self.file_name),
                source,
            })
    }

    /// Give up the document and hand back its sink
    pub fn into_sink(self) -> W {
        self.sink
    }
}
