//! Leaf normalization.

use super::types::{ElementKind, Node, Text};

/// Merge adjacent text leaves that carry the same marks and drop empty
/// leaves, recursively.
///
/// Images keep exactly one empty placeholder child and code blocks keep
/// exactly one unmarked text child holding the whole code.
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                if let Some(Node::Text(prev)) = out.last_mut()
                    && prev.marks == text.marks
                {
                    prev.text.push_str(&text.text);
                    continue;
                }
                out.push(Node::Text(text));
            }
            Node::Element(mut element) => {
                element.children = match element.kind {
                    ElementKind::Image { .. } => vec![Node::Text(Text::default())],
                    ElementKind::Code { .. } => {
                        let code: String =
                            element.children.iter().map(Node::plain_text).collect();
                        vec![Node::text(code)]
                    }
                    _ => normalize(std::mem::take(&mut element.children)),
                };
                out.push(Node::Element(element));
            }
        }
    }

    out
}
