//! Node tree → CommonMark.
//!
//! The tree is rebuilt as a comrak AST and rendered with comrak's CommonMark
//! formatter, which takes care of escaping and block layout.

use std::cell::RefCell;

use comrak::arena_tree::Node as TreeNode;
use comrak::nodes::{
    Ast, AstNode, LineColumn, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading,
    NodeLink, NodeList, NodeValue,
};
use comrak::{Arena, format_commonmark};
use tracing::warn;

use crate::markdown_ast::comrak::render_options;
use crate::markdown_ast::types::{MarkdownAstError, RenderOptions};
use crate::nodes::{Element, ElementKind, Marks, Node};

/// Render block nodes as a Markdown body (no front matter).
///
/// An empty tree renders as an empty string; anything else ends with a
/// newline.
pub fn render_body(nodes: &[Node], options: &RenderOptions) -> Result<String, MarkdownAstError> {
    let arena = Arena::new();
    let builder = AstBuilder { arena: &arena, options };

    let root = builder.node(NodeValue::Document);
    for block in builder.blocks(nodes) {
        root.append(block);
    }
    if root.first_child().is_none() {
        return Ok(String::new());
    }

    let mut out = Vec::new();
    format_commonmark(root, &render_options(options), &mut out)?;
    Ok(String::from_utf8(out)?)
}

struct AstBuilder<'a, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o RenderOptions,
}

impl<'a> AstBuilder<'a, '_> {
    fn node(&self, value: NodeValue) -> &'a AstNode<'a> {
        let start = LineColumn { line: 1, column: 1 };
        self.arena.alloc(TreeNode::new(RefCell::new(Ast::new(value, start))))
    }

    /// Build block-level AST nodes. Runs of inline nodes are wrapped in a
    /// synthesized paragraph.
    fn blocks(&self, nodes: &[Node]) -> Vec<&'a AstNode<'a>> {
        let mut out = Vec::new();
        let mut inline_run: Vec<&Node> = Vec::new();

        for node in nodes {
            match node {
                Node::Element(element) if !element.kind.is_inline() => {
                    self.flush_paragraph(&mut inline_run, &mut out);
                    self.block(element, &mut out);
                }
                inline => inline_run.push(inline),
            }
        }
        self.flush_paragraph(&mut inline_run, &mut out);

        out
    }

    fn flush_paragraph(&self, run: &mut Vec<&Node>, out: &mut Vec<&'a AstNode<'a>>) {
        if run.is_empty() {
            return;
        }
        let paragraph = self.node(NodeValue::Paragraph);
        self.inlines(run.drain(..), paragraph);
        trim_trailing_breaks(paragraph);
        if paragraph.first_child().is_some() {
            out.push(paragraph);
        }
    }

    fn block(&self, element: &Element, out: &mut Vec<&'a AstNode<'a>>) {
        match &element.kind {
            ElementKind::Paragraph => {
                let mut run: Vec<&Node> = element.children.iter().collect();
                self.flush_paragraph(&mut run, out);
            }
            ElementKind::Heading(level) => {
                let heading = self.node(NodeValue::Heading(NodeHeading {
                    level: level.get(),
                    setext: false,
                    ..NodeHeading::default()
                }));
                self.inlines(&element.children, heading);
                trim_trailing_breaks(heading);
                out.push(heading);
            }
            ElementKind::Quote => {
                let quote = self.node(NodeValue::BlockQuote);
                for block in self.blocks(&element.children) {
                    quote.append(block);
                }
                out.push(quote);
            }
            ElementKind::OrderedList => out.push(self.list(ListType::Ordered, &element.children)),
            ElementKind::UnorderedList => out.push(self.list(ListType::Bullet, &element.children)),
            ElementKind::ListItem => {
                // An item outside a list contributes its content as plain blocks.
                out.extend(self.blocks(&element.children));
            }
            ElementKind::Code { lang } => {
                let code: String = element.children.iter().map(Node::plain_text).collect();
                let literal = if code.is_empty() || code.ends_with('\n') {
                    code
                } else {
                    format!("{code}\n")
                };
                let block = NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    info: lang.clone().unwrap_or_default(),
                    literal,
                    ..NodeCodeBlock::default()
                };
                out.push(self.node(NodeValue::CodeBlock(block.into())));
            }
            // Grouped into paragraphs by `blocks`.
            ElementKind::Link { .. } | ElementKind::Image { .. } => {}
        }
    }

    fn list(&self, list_type: ListType, children: &[Node]) -> &'a AstNode<'a> {
        let items: Vec<Vec<&'a AstNode<'a>>> = children
            .iter()
            .map(|child| match child {
                Node::Element(item) if item.kind == ElementKind::ListItem => {
                    self.blocks(&item.children)
                }
                other => self.blocks(std::slice::from_ref(other)),
            })
            .collect();

        // Two paragraphs in one item only survive in a loose list.
        let tight = !items.iter().any(|blocks| {
            blocks.windows(2).any(|pair| is_paragraph(pair[0]) && is_paragraph(pair[1]))
        });

        let list = NodeList {
            list_type,
            start: 1,
            delimiter: ListDelimType::Period,
            bullet_char: self.options.list_marker.as_char() as u8,
            tight,
            ..NodeList::default()
        };

        let list_node = self.node(NodeValue::List(list.clone()));
        for blocks in items {
            let item = self.node(NodeValue::Item(list.clone()));
            for block in blocks {
                item.append(block);
            }
            list_node.append(item);
        }
        list_node
    }

    fn inlines<'n>(&self, nodes: impl IntoIterator<Item = &'n Node>, parent: &'a AstNode<'a>) {
        let atoms = atoms(nodes);
        self.emit(&atoms, Marks::NONE, parent);
    }

    /// Emit `atoms` below `parent`, where `active` marks are already applied
    /// by enclosing wrappers. Adjacent atoms sharing a mark are wrapped
    /// together, so whitespace inside the span stays marked.
    fn emit(&self, atoms: &[Atom<'_>], active: Marks, parent: &'a AstNode<'a>) {
        let mut i = 0;
        while i < atoms.len() {
            let remaining = atoms[i].marks().difference(active);
            match widest_span(atoms, i, remaining) {
                Some((mark, end)) => {
                    self.wrap(&atoms[i..end], active, mark, parent);
                    i = end;
                }
                None => {
                    self.atom(&atoms[i], active, parent);
                    i += 1;
                }
            }
        }
    }

    /// Wrap a span in one strong/emphasis/strikethrough node. Whitespace at
    /// the edges of the span is moved outside the delimiters.
    fn wrap(&self, span: &[Atom<'_>], active: Marks, mark: Marks, parent: &'a AstNode<'a>) {
        let mut inner = span.to_vec();
        let mut lead = String::new();
        let mut trail = String::new();

        while let Some(&Atom::Text { text, marks }) = inner.first() {
            let trimmed = text.trim_start();
            lead.push_str(&text[..text.len() - trimmed.len()]);
            if trimmed.is_empty() {
                inner.remove(0);
            } else {
                inner[0] = Atom::Text { text: trimmed, marks };
                break;
            }
        }
        while let Some(&Atom::Text { text, marks }) = inner.last() {
            let trimmed = text.trim_end();
            trail.insert_str(0, &text[trimmed.len()..]);
            if trimmed.is_empty() {
                inner.pop();
            } else {
                let last = inner.len() - 1;
                inner[last] = Atom::Text { text: trimmed, marks };
                break;
            }
        }

        if !lead.is_empty() {
            parent.append(self.plain(&lead));
        }
        if !inner.is_empty() {
            let wrapper = self.node(wrapper_value(mark));
            self.emit(&inner, active.union(mark), wrapper);
            parent.append(wrapper);
        }
        if !trail.is_empty() {
            parent.append(self.plain(&trail));
        }
    }

    fn atom(&self, atom: &Atom<'_>, active: Marks, parent: &'a AstNode<'a>) {
        match *atom {
            Atom::Text { text, marks } => self.leaf(text, marks.code, parent),
            Atom::Break => parent.append(self.node(NodeValue::LineBreak)),
            Atom::Link { element, .. } => {
                let ElementKind::Link { url, title } = &element.kind else {
                    return;
                };
                let link = self.node(NodeValue::Link(
                    NodeLink { url: url.clone(), title: title.clone().unwrap_or_default() }.into(),
                ));
                self.emit(&atoms(&element.children), active, link);
                parent.append(link);
            }
            Atom::Image(element) => {
                let ElementKind::Image { url, title, alt } = &element.kind else {
                    return;
                };
                let image = self.node(NodeValue::Image(
                    NodeLink { url: url.clone(), title: title.clone().unwrap_or_default() }.into(),
                ));
                if let Some(alt) = alt
                    && !alt.is_empty()
                {
                    image.append(self.node(NodeValue::Text(alt.clone().into())));
                }
                parent.append(image);
            }
        }
    }

    /// Plain text, or an inline code span with surrounding whitespace kept
    /// outside the backticks.
    fn leaf(&self, text: &str, code: bool, parent: &'a AstNode<'a>) {
        let core = text.trim();
        if !code || core.is_empty() {
            parent.append(self.plain(text));
            return;
        }

        let lead = &text[..text.len() - text.trim_start().len()];
        let trail = &text[lead.len() + core.len()..];

        if !lead.is_empty() {
            parent.append(self.plain(lead));
        }
        parent.append(
            self.node(NodeValue::Code(NodeCode { num_backticks: 1, literal: core.to_owned() })),
        );
        if !trail.is_empty() {
            parent.append(self.plain(trail));
        }
    }

    fn plain(&self, text: &str) -> &'a AstNode<'a> {
        self.node(NodeValue::Text(text.to_owned().into()))
    }
}

/// Flattened inline content. Text is split at newlines into hard breaks.
#[derive(Debug, Clone, Copy)]
enum Atom<'n> {
    Text { text: &'n str, marks: Marks },
    Break,
    /// `marks` are the flags shared by every text leaf inside the link.
    Link { element: &'n Element, marks: Marks },
    Image(&'n Element),
}

impl Atom<'_> {
    fn marks(&self) -> Marks {
        match *self {
            Atom::Text { marks, .. } | Atom::Link { marks, .. } => marks,
            Atom::Break | Atom::Image(_) => Marks::NONE,
        }
    }
}

fn atoms<'n>(nodes: impl IntoIterator<Item = &'n Node>) -> Vec<Atom<'n>> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Text(text) => {
                for (i, piece) in text.text.split('\n').enumerate() {
                    if i > 0 {
                        out.push(Atom::Break);
                    }
                    if !piece.is_empty() {
                        out.push(Atom::Text { text: piece, marks: text.marks });
                    }
                }
            }
            Node::Element(element) => match &element.kind {
                ElementKind::Link { .. } => {
                    out.push(Atom::Link { element, marks: shared_marks(&element.children) });
                }
                ElementKind::Image { .. } => out.push(Atom::Image(element)),
                other => {
                    warn!(tag = other.tag(), "dropping block element found in inline position");
                }
            },
        }
    }
    out
}

/// Marks common to every text leaf below `nodes`; none when there is no text.
fn shared_marks(nodes: &[Node]) -> Marks {
    fn walk(nodes: &[Node], acc: &mut Option<Marks>) {
        for node in nodes {
            match node {
                Node::Text(text) if !text.is_empty() => {
                    *acc = Some(acc.map_or(text.marks, |m| m.intersection(text.marks)));
                }
                Node::Text(_) => {}
                Node::Element(element) => walk(&element.children, acc),
            }
        }
    }

    let mut acc = None;
    walk(nodes, &mut acc);
    acc.unwrap_or(Marks::NONE)
}

/// Delimited marks, outermost first when spans tie.
const WRAPPERS: [Marks; 3] = [Marks::BOLD, Marks::ITALIC, Marks::STRIKETHROUGH];

/// The mark from `remaining` covering the longest run of atoms starting at
/// `start`, with the end of that run.
fn widest_span(atoms: &[Atom<'_>], start: usize, remaining: Marks) -> Option<(Marks, usize)> {
    let mut best: Option<(Marks, usize)> = None;
    for mark in WRAPPERS {
        if !remaining.contains(mark) {
            continue;
        }
        let len = atoms[start..].iter().take_while(|a| a.marks().contains(mark)).count();
        if best.is_none_or(|(_, end)| start + len > end) {
            best = Some((mark, start + len));
        }
    }
    best
}

fn wrapper_value(mark: Marks) -> NodeValue {
    if mark.bold {
        NodeValue::Strong
    } else if mark.italic {
        NodeValue::Emph
    } else {
        NodeValue::Strikethrough
    }
}

fn is_paragraph<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(node.data.borrow().value, NodeValue::Paragraph)
}

/// A hard break cannot end a block: CommonMark would read it back as a
/// literal backslash.
fn trim_trailing_breaks<'a>(container: &'a AstNode<'a>) {
    while let Some(last) = container.last_child()
        && matches!(last.data.borrow().value, NodeValue::LineBreak)
    {
        last.detach();
    }
}
