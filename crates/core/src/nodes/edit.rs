//! Copy-on-write edits over a node sequence.
//!
//! Every operation takes the current children by reference and returns a new
//! sequence, so readers holding the previous tree never observe a partial
//! update.

use std::fmt;

use thiserror::Error;

use super::types::Node;

/// Child indices leading from the body root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len].to_vec())
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("node path is empty")]
    EmptyPath,

    #[error("no node at {0}")]
    OutOfBounds(NodePath),

    #[error("node at {0} is a text leaf and has no children")]
    NotAnElement(NodePath),
}

/// Borrow the node at `path`.
pub fn node_at<'a>(nodes: &'a [Node], path: &NodePath) -> Result<&'a Node, EditError> {
    let (&last, parents) = path.indices().split_last().ok_or(EditError::EmptyPath)?;

    let mut children = nodes;
    for (depth, &index) in parents.iter().enumerate() {
        children = match children.get(index) {
            Some(Node::Element(element)) => &element.children,
            Some(Node::Text(_)) => return Err(EditError::NotAnElement(path.prefix(depth + 1))),
            None => return Err(EditError::OutOfBounds(path.prefix(depth + 1))),
        };
    }

    children.get(last).ok_or_else(|| EditError::OutOfBounds(path.clone()))
}

/// Return a copy of `nodes` with the node at `path` replaced.
pub fn replace_node(
    nodes: &[Node],
    path: &NodePath,
    node: Node,
) -> Result<Vec<Node>, EditError> {
    rebuild(nodes, path, 0, |children, index| {
        let slot =
            children.get_mut(index).ok_or_else(|| EditError::OutOfBounds(path.clone()))?;
        *slot = node;
        Ok(())
    })
}

/// Return a copy of `nodes` with `node` inserted at `path`.
///
/// The last index may equal the number of siblings to append.
pub fn insert_node(
    nodes: &[Node],
    path: &NodePath,
    node: Node,
) -> Result<Vec<Node>, EditError> {
    rebuild(nodes, path, 0, |children, index| {
        if index > children.len() {
            return Err(EditError::OutOfBounds(path.clone()));
        }
        children.insert(index, node);
        Ok(())
    })
}

/// Return a copy of `nodes` without the node at `path`, plus the removed node.
pub fn remove_node(nodes: &[Node], path: &NodePath) -> Result<(Vec<Node>, Node), EditError> {
    let mut removed = None;
    let rebuilt = rebuild(nodes, path, 0, |children, index| {
        if index >= children.len() {
            return Err(EditError::OutOfBounds(path.clone()));
        }
        removed = Some(children.remove(index));
        Ok(())
    })?;

    removed.map(|node| (rebuilt, node)).ok_or_else(|| EditError::OutOfBounds(path.clone()))
}

/// Clone the spine from the root down to the parent addressed by `path` and
/// apply `edit` to that parent's children.
fn rebuild<F>(
    nodes: &[Node],
    path: &NodePath,
    depth: usize,
    edit: F,
) -> Result<Vec<Node>, EditError>
where
    F: FnOnce(&mut Vec<Node>, usize) -> Result<(), EditError>,
{
    let indices = path.indices();
    let index = *indices.get(depth).ok_or(EditError::EmptyPath)?;
    let mut out = nodes.to_vec();

    if depth + 1 == indices.len() {
        edit(&mut out, index)?;
        return Ok(out);
    }

    match out.get_mut(index) {
        Some(Node::Element(element)) => {
            element.children = rebuild(&element.children, path, depth + 1, edit)?;
            Ok(out)
        }
        Some(Node::Text(_)) => Err(EditError::NotAnElement(path.prefix(depth + 1))),
        None => Err(EditError::OutOfBounds(path.prefix(depth + 1))),
    }
}
