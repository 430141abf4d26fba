//! PyArt - HTML documents with generated SVG art
//!
//! This library provides a small markup tree renderer and a random shape
//! generator that feeds it.
//!
//! # Example
//!
//! ```rust
//! use pyart::render_demo;
//!
//! let html = render_demo();
//! assert!(html.starts_with("<html>"));
//! assert!(html.contains("<svg width=\"500\" height=\"300\">"));
//! ```

pub mod error;
pub mod generator;
pub mod markup;

use std::io;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ShapeError};
pub use generator::{RandomShape, RangeSpec, ShapeConfig, ShapeKey};
pub use markup::{Canvas, Color, Document, Node, NodeId, Position, Shape, Size, Tree};

use thiserror::Error;

/// Errors that can occur while producing a document
#[derive(Debug, Error)]
pub enum Error {
    /// The output file could not be created or written
    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error in the shape configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A sampled shape could not be turned into markup
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Render the demonstration document without writing it anywhere
///
/// # Example
///
/// ```rust
/// let html = pyart::render_demo();
/// assert_eq!(html.matches("<circle").count(), 10);
/// ```
pub fn render_demo() -> String {
    let mut doc = Document::with_sink(markup::document::DEFAULT_NAME, io::sink());
    doc.gen_art();
    doc.render()
}

/// Load a shape configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ShapeConfig, Error> {
    Ok(ShapeConfig::from_file(path)?)
}

/// Write the demonstration document to `<name>.html`
///
/// Returns the name of the file written.
pub fn write_demo(name: &str) -> Result<String, Error> {
    let mut doc = Document::create(name)?;
    doc.gen_art();
    doc.output()?;
    Ok(doc.file_name().to_string())
}
