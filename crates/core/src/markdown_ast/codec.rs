use crate::markdown_ast::types::{MarkdownAstError, RenderOptions};
use crate::markdown_ast::{parser, serializer};
use crate::nodes::Node;

/// High-level API for converting Markdown bodies to and from node trees.
#[derive(Debug, Clone, Default)]
pub struct MarkdownCodec {
    options: RenderOptions,
}

impl MarkdownCodec {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parse a Markdown body into block nodes
    ///
    /// Unsupported constructs (tables, raw HTML, thematic breaks, ...) are
    /// dropped with a warning; the rest of the document still converts.
    pub fn parse(&self, input: &str) -> Vec<Node> {
        parser::parse_body(input)
    }

    /// Render block nodes back to Markdown
    ///
    /// # Errors
    /// * `RenderError` - The CommonMark formatter failed to write
    /// * `InvalidUtf8` - The formatter produced invalid UTF-8
    pub fn render(&self, nodes: &[Node]) -> Result<String, MarkdownAstError> {
        serializer::render_body(nodes, &self.options)
    }
}
