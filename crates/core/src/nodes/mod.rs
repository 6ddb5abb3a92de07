//! Editable document tree.
//!
//! This module provides:
//! - The node model shared with the rich-text editor (`types`)
//! - Its JSON form and a lenient decoder for external trees (`json`)
//! - Leaf normalization (`normalize`)
//! - Copy-on-write edits addressed by child-index paths (`edit`)

pub mod edit;
pub mod json;
pub mod normalize;
pub mod types;

pub use edit::{EditError, NodePath, insert_node, node_at, remove_node, replace_node};
pub use json::{NodeDecodeError, decode_node, decode_nodes};
pub use normalize::normalize;
pub use types::{Element, ElementKind, HeadingLevel, Marks, Node, Text};
