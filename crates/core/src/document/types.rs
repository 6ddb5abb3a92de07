//! Document types and errors.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::frontmatter::{Frontmatter, FrontmatterParseError, FrontmatterSerializeError};
use crate::markdown_ast::MarkdownAstError;
use crate::nodes::json::kind_name;
use crate::nodes::{
    EditError, Node, NodeDecodeError, NodePath, decode_nodes, insert_node, node_at, remove_node,
    replace_node,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterParseError),

    #[error(transparent)]
    FrontmatterDump(#[from] FrontmatterSerializeError),

    #[error(transparent)]
    Markdown(#[from] MarkdownAstError),

    #[error(transparent)]
    Nodes(#[from] NodeDecodeError),

    #[error("expected a document object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid frontMatter: {0}")]
    InvalidFrontMatter(#[source] serde_json::Error),

    #[error("unhandled document type: {0}")]
    UnhandledDocumentType(String),

    #[error("cannot save {found} content to {path}")]
    KindMismatch { path: String, found: &'static str },

    #[error("invalid YAML in {0}: {1}")]
    Yaml(String, #[source] serde_yaml::Error),

    #[error("invalid JSON in {0}: {1}")]
    Json(String, #[source] serde_json::Error),
}

/// File kinds the loader understands, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Markdown,
    Yaml,
    Json,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "md" | "markdown" => Ok(DocumentKind::Markdown),
            "yml" | "yaml" => Ok(DocumentKind::Yaml),
            "json" => Ok(DocumentKind::Json),
            _ => Err(DocumentError::UnhandledDocumentType(path.display().to_string())),
        }
    }
}

/// Front matter plus body tree, as edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub front_matter: Frontmatter,
    pub body: Vec<Node>,
}

impl Document {
    pub fn new(front_matter: Frontmatter, body: Vec<Node>) -> Self {
        Self { front_matter, body }
    }

    /// Decode `{"frontMatter": {...}, "body": [...]}` as sent by the editor.
    ///
    /// Both keys are optional. Unknown nodes in `body` are pruned.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DocumentError> {
        let object = value.as_object().ok_or_else(|| DocumentError::NotAnObject(kind_name(value)))?;

        let front_matter = match object.get("frontMatter") {
            None | Some(serde_json::Value::Null) => Frontmatter::default(),
            Some(fm) => serde_json::from_value(fm.clone())
                .map_err(DocumentError::InvalidFrontMatter)?,
        };

        let body = match object.get("body") {
            Some(body) => decode_nodes(body)?,
            None => Vec::new(),
        };

        Ok(Self { front_matter, body })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn node_at(&self, path: &NodePath) -> Result<&Node, EditError> {
        node_at(&self.body, path)
    }

    /// A copy of this document with the node at `path` replaced.
    pub fn with_replaced(&self, path: &NodePath, node: Node) -> Result<Self, EditError> {
        let body = replace_node(&self.body, path, node)?;
        Ok(Self { front_matter: self.front_matter.clone(), body })
    }

    pub fn with_inserted(&self, path: &NodePath, node: Node) -> Result<Self, EditError> {
        let body = insert_node(&self.body, path, node)?;
        Ok(Self { front_matter: self.front_matter.clone(), body })
    }

    pub fn with_removed(&self, path: &NodePath) -> Result<(Self, Node), EditError> {
        let (body, removed) = remove_node(&self.body, path)?;
        Ok((Self { front_matter: self.front_matter.clone(), body }, removed))
    }
}

/// A loaded file: an editable markdown document or plain structured data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadedDocument {
    Markdown(Document),
    Data(serde_yaml::Value),
}

impl LoadedDocument {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LoadedDocument::Markdown(_) => "markdown",
            LoadedDocument::Data(_) => "data",
        }
    }

    /// The structured part of the file: front matter for markdown, the whole
    /// value for data files.
    pub fn meta(&self) -> serde_yaml::Value {
        match self {
            LoadedDocument::Markdown(doc) => {
                serde_yaml::Value::Mapping(doc.front_matter.fields.clone())
            }
            LoadedDocument::Data(value) => value.clone(),
        }
    }
}
