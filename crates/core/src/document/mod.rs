//! Split/merge boundary between file text and editable documents.
//!
//! Markdown files become a [`Document`] (front matter plus body tree).
//! YAML and JSON data files load as plain values.

pub mod codec;
pub mod types;

pub use codec::{DocumentCodec, merge, split};
pub use types::{Document, DocumentError, DocumentKind, LoadedDocument};
