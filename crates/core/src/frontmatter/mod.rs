//! Frontmatter parsing and serialization.
//!
//! This module provides functionality to:
//! - Split a leading `---` fenced YAML block from a markdown document
//! - Parse it into an ordered mapping
//! - Dump a mapping back in front of a body, with optional key ordering

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, parse, parse_yaml, split_raw};
pub use serializer::{
    FrontmatterSerializeError, attach, frontmatter_to_yaml, serialize, serialize_with_order,
};
pub use types::{DumpOptions, Frontmatter, ParsedDocument};
