//! Node model types.
//!
//! The same tree is produced by the Markdown parser, mutated by the rich-text
//! editor and consumed by the serializer. Nodes hold no parent links; callers
//! that need them track paths while walking (see [`super::edit::NodePath`]).

/// Style flags carried by a text leaf. Flags are independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Marks {
    pub const NONE: Marks =
        Marks { bold: false, italic: false, strikethrough: false, code: false };
    pub const BOLD: Marks = Marks { bold: true, ..Marks::NONE };
    pub const ITALIC: Marks = Marks { italic: true, ..Marks::NONE };
    pub const STRIKETHROUGH: Marks = Marks { strikethrough: true, ..Marks::NONE };
    pub const CODE: Marks = Marks { code: true, ..Marks::NONE };

    /// True when no flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough || self.code)
    }

    /// Flags set in either `self` or `other`.
    pub fn union(self, other: Marks) -> Marks {
        Marks {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            strikethrough: self.strikethrough || other.strikethrough,
            code: self.code || other.code,
        }
    }

    /// Flags set in both `self` and `other`.
    pub fn intersection(self, other: Marks) -> Marks {
        Marks {
            bold: self.bold && other.bold,
            italic: self.italic && other.italic,
            strikethrough: self.strikethrough && other.strikethrough,
            code: self.code && other.code,
        }
    }

    /// Flags set in `self` but not in `other`.
    pub fn difference(self, other: Marks) -> Marks {
        Marks {
            bold: self.bold && !other.bold,
            italic: self.italic && !other.italic,
            strikethrough: self.strikethrough && !other.strikethrough,
            code: self.code && !other.code,
        }
    }

    /// True when every flag set in `other` is also set in `self`.
    pub fn contains(self, other: Marks) -> bool {
        other.difference(self).is_plain()
    }
}

/// A text leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub marks: Marks,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), marks: Marks::NONE }
    }

    pub fn styled(text: impl Into<String>, marks: Marks) -> Self {
        Self { text: text.into(), marks }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Heading depth, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// The closed set of element kinds understood by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    Quote,
    Heading(HeadingLevel),
    OrderedList,
    UnorderedList,
    ListItem,
    Code { lang: Option<String> },
    Image { url: String, title: Option<String>, alt: Option<String> },
    Link { url: String, title: Option<String> },
}

impl ElementKind {
    /// The editor's type tag for this kind (`p`, `h2`, `ul`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Paragraph => "p",
            ElementKind::Quote => "quote",
            ElementKind::Heading(level) => HEADING_TAGS[usize::from(level.get() - 1)],
            ElementKind::OrderedList => "ol",
            ElementKind::UnorderedList => "ul",
            ElementKind::ListItem => "li",
            ElementKind::Code { .. } => "code",
            ElementKind::Image { .. } => "img",
            ElementKind::Link { .. } => "a",
        }
    }

    /// Links and images live inside paragraphs; everything else is a block.
    pub fn is_inline(&self) -> bool {
        matches!(self, ElementKind::Link { .. } | ElementKind::Image { .. })
    }

    /// Void elements carry no semantic children.
    pub fn is_void(&self) -> bool {
        matches!(self, ElementKind::Image { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::OrderedList | ElementKind::UnorderedList)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(ElementKind::Paragraph, children)
    }

    /// Build an image with the single empty placeholder child the editor
    /// requires on void elements.
    pub fn image(url: impl Into<String>, title: Option<String>, alt: Option<String>) -> Self {
        Self::new(
            ElementKind::Image { url: url.into(), title, alt },
            vec![Node::Text(Text::default())],
        )
    }

    pub fn code(lang: Option<String>, code: impl Into<String>) -> Self {
        Self::new(ElementKind::Code { lang }, vec![Node::text(code)])
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn styled(text: impl Into<String>, marks: Marks) -> Self {
        Node::Text(Text::styled(text, marks))
    }

    pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
        Node::Element(Element::new(kind, children))
    }

    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text(_) => true,
            Node::Element(element) => element.kind.is_inline(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Children of an element; text leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of every leaf below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_plain_text(self, &mut out);
        out
    }
}

fn collect_plain_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.text),
        Node::Element(element) => {
            for child in &element.children {
                collect_plain_text(child, out);
            }
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_bounds() {
        assert!(HeadingLevel::new(0).is_none());
        assert_eq!(HeadingLevel::new(1).map(HeadingLevel::get), Some(1));
        assert_eq!(HeadingLevel::new(6).map(HeadingLevel::get), Some(6));
        assert!(HeadingLevel::new(7).is_none());
    }

    #[test]
    fn tags_match_editor_names() {
        let h3 = ElementKind::Heading(HeadingLevel::new(3).unwrap());
        assert_eq!(h3.tag(), "h3");
        assert_eq!(ElementKind::Quote.tag(), "quote");
        assert_eq!(ElementKind::Code { lang: None }.tag(), "code");
        assert_eq!(
            ElementKind::Link { url: "https://x".into(), title: None }.tag(),
            "a"
        );
    }

    #[test]
    fn marks_union() {
        let marks = Marks::BOLD.union(Marks::ITALIC);
        assert!(marks.bold && marks.italic);
        assert!(!marks.code);
        assert!(Marks::NONE.is_plain());
        assert!(!marks.is_plain());
    }

    #[test]
    fn image_has_placeholder_child() {
        let img = Element::image("/media/a.png", None, Some("A".into()));
        assert_eq!(img.children, vec![Node::text("")]);
        assert!(img.kind.is_void());
        assert!(Node::from(img).is_inline());
    }

    #[test]
    fn plain_text_walks_descendants() {
        let node = Node::element(
            ElementKind::Paragraph,
            vec![
                Node::text("a "),
                Node::element(
                    ElementKind::Link { url: "u".into(), title: None },
                    vec![Node::styled("b", Marks::BOLD)],
                ),
            ],
        );
        assert_eq!(node.plain_text(), "a b");
    }
}
