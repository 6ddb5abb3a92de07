#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Markdown ⇄ editable document tree conversion with YAML front matter.
//!
//! ```
//! let doc = mdslate_core::split("---\ntitle: Hello\n---\n# Welcome\n").unwrap();
//! assert_eq!(doc.front_matter.get("title").and_then(|v| v.as_str()), Some("Hello"));
//!
//! let text = mdslate_core::merge(&doc.front_matter, &doc.body).unwrap();
//! assert_eq!(text, "---\ntitle: Hello\n---\n\n# Welcome\n");
//! ```

pub mod config;
pub mod document;
pub mod frontmatter;
pub mod markdown_ast;
pub mod nodes;
pub mod schema;

pub use document::{Document, DocumentCodec, DocumentError, LoadedDocument, merge, split};
pub use frontmatter::Frontmatter;
pub use nodes::{Element, ElementKind, Marks, Node, NodePath, Text};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
