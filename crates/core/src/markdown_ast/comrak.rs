//! comrak configuration shared by the parser and the serializer.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{ListStyleType, Options};

use crate::markdown_ast::types::{ListMarker, RenderOptions};

/// Options used to parse document bodies.
pub(crate) fn parse_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // Recognised so they can be dropped as a whole instead of read as text
    options.extension.table = true;

    // Don't convert quotes/dashes
    options.parse.smart = false;

    options
}

/// Options used to render document bodies back to CommonMark.
pub(crate) fn render_options(render: &RenderOptions) -> Options<'static> {
    let mut options = parse_options();
    options.render.hardbreaks = false;
    options.render.list_style = match render.list_marker {
        ListMarker::Dash => ListStyleType::Dash,
        ListMarker::Star => ListStyleType::Star,
        ListMarker::Plus => ListStyleType::Plus,
    };
    options
}

/// Plain text below `node`, with soft breaks read as spaces.
pub(crate) fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match child.data.borrow().value {
            NodeValue::Text(ref t) => text.push_str(t),
            NodeValue::Code(ref code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
