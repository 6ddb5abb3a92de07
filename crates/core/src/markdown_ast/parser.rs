//! CommonMark → node tree.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, parse_document};
use tracing::warn;

use crate::markdown_ast::comrak::{collect_text, parse_options};
use crate::nodes::{Element, ElementKind, HeadingLevel, Marks, Node, Text, normalize};

/// Parse a Markdown body (without front matter) into block nodes.
///
/// Never fails: CommonMark has no invalid input, and constructs outside the
/// supported set are dropped with a warning.
pub fn parse_body(input: &str) -> Vec<Node> {
    let arena = Arena::new();
    let root = parse_document(&arena, input, &parse_options());
    normalize(transform_children(root, Marks::NONE))
}

fn transform_children<'a>(node: &'a AstNode<'a>, marks: Marks) -> Vec<Node> {
    node.children().flat_map(|child| transform(child, marks)).collect()
}

/// Translate one comrak node. Inline wrappers (strong, emphasis,
/// strikethrough) dissolve into their children with the mark added, so a
/// single node may yield several.
fn transform<'a>(node: &'a AstNode<'a>, marks: Marks) -> Vec<Node> {
    let ast = node.data.borrow();

    match ast.value {
        // Blocks left empty by pruning would not survive rendering.
        NodeValue::Paragraph => non_empty_block(ElementKind::Paragraph, node, marks),
        NodeValue::BlockQuote => non_empty_block(ElementKind::Quote, node, marks),
        NodeValue::Heading(ref heading) => match HeadingLevel::new(heading.level) {
            Some(level) => {
                vec![element(ElementKind::Heading(level), transform_children(node, marks))]
            }
            None => {
                warn!(level = heading.level, "dropping heading with unsupported level");
                Vec::new()
            }
        },
        NodeValue::List(ref list) => {
            let kind = if list.list_type == ListType::Ordered {
                ElementKind::OrderedList
            } else {
                ElementKind::UnorderedList
            };
            vec![element(kind, transform_children(node, marks))]
        }
        NodeValue::Item(_) => vec![list_item(node, marks)],
        NodeValue::CodeBlock(ref block) => {
            let lang = block.info.split_whitespace().next().map(str::to_owned);
            let code = block.literal.strip_suffix('\n').unwrap_or(&block.literal);
            vec![Node::Element(Element::code(lang, code))]
        }
        NodeValue::Image(ref link) => {
            let alt = collect_text(node);
            vec![Node::Element(Element::image(
                link.url.clone(),
                non_empty(&link.title),
                non_empty(&alt),
            ))]
        }
        NodeValue::Link(ref link) => {
            let kind =
                ElementKind::Link { url: link.url.clone(), title: non_empty(&link.title) };
            vec![element(kind, transform_children(node, marks))]
        }
        NodeValue::Text(ref text) => leaf(text, marks),
        NodeValue::SoftBreak => leaf(" ", marks),
        NodeValue::LineBreak => vec![Node::text("\n")],
        NodeValue::Code(ref code) => leaf(&code.literal, marks.union(Marks::CODE)),
        NodeValue::Strong => transform_children(node, marks.union(Marks::BOLD)),
        NodeValue::Emph => transform_children(node, marks.union(Marks::ITALIC)),
        NodeValue::Strikethrough => transform_children(node, marks.union(Marks::STRIKETHROUGH)),
        ref other => {
            warn!(kind = dropped_kind(other), "dropping unsupported markdown node");
            Vec::new()
        }
    }
}

/// A list item whose only block is a paragraph holds that paragraph's inline
/// content directly; any other item keeps its blocks.
fn list_item<'a>(node: &'a AstNode<'a>, marks: Marks) -> Node {
    let blocks: Vec<&'a AstNode<'a>> = node.children().collect();

    let children = match blocks.as_slice() {
        [only] if matches!(only.data.borrow().value, NodeValue::Paragraph) => {
            transform_children(only, marks)
        }
        _ => transform_children(node, marks),
    };

    element(ElementKind::ListItem, children)
}

fn non_empty_block<'a>(kind: ElementKind, node: &'a AstNode<'a>, marks: Marks) -> Vec<Node> {
    let children = transform_children(node, marks);
    if children.is_empty() {
        return Vec::new();
    }
    vec![element(kind, children)]
}

fn dropped_kind(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::ThematicBreak => "thematic_break",
        NodeValue::HtmlBlock(_) => "html_block",
        NodeValue::HtmlInline(_) => "html_inline",
        NodeValue::Table(_) | NodeValue::TableRow(_) | NodeValue::TableCell => "table",
        NodeValue::FrontMatter(_) => "front_matter",
        NodeValue::FootnoteDefinition(_) | NodeValue::FootnoteReference(_) => "footnote",
        NodeValue::TaskItem(_) => "task_item",
        NodeValue::Math(_) => "math",
        _ => "other",
    }
}

fn element(kind: ElementKind, children: Vec<Node>) -> Node {
    Node::Element(Element::new(kind, children))
}

fn leaf(text: &str, marks: Marks) -> Vec<Node> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Node::Text(Text::styled(text, marks))]
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
