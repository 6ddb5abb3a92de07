//! JSON form of the node tree as exchanged with the rich-text editor.
//!
//! ```json
//! {"type": "p", "children": [{"text": "Hi "}, {"text": "there", "bold": true}]}
//! ```
//!
//! Encoding is exact. Decoding is lenient: nodes with an unknown `type`, or
//! values that are neither elements nor text leaves, are pruned with a
//! warning and the rest of the tree still decodes.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::normalize::normalize;
use super::types::{Element, ElementKind, HeadingLevel, Marks, Node, Text};

#[derive(Debug, Error)]
pub enum NodeDecodeError {
    #[error("expected an array of nodes, found {0}")]
    NotAnArray(&'static str),
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Text(text) => text.serialize(serializer),
            Node::Element(element) => element.serialize(serializer),
        }
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("text", &self.text)?;
        for (name, set) in [
            ("bold", self.marks.bold),
            ("italic", self.marks.italic),
            ("strikethrough", self.marks.strikethrough),
            ("code", self.marks.code),
        ] {
            if set {
                map.serialize_entry(name, &true)?;
            }
        }
        map.end()
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.tag())?;
        match &self.kind {
            ElementKind::Code { lang: Some(lang) } => map.serialize_entry("lang", lang)?,
            ElementKind::Image { url, title, alt } => {
                map.serialize_entry("url", url)?;
                if let Some(title) = title {
                    map.serialize_entry("title", title)?;
                }
                if let Some(alt) = alt {
                    map.serialize_entry("alt", alt)?;
                }
            }
            ElementKind::Link { url, title } => {
                map.serialize_entry("url", url)?;
                if let Some(title) = title {
                    map.serialize_entry("title", title)?;
                }
            }
            _ => {}
        }
        map.serialize_entry("children", &self.children)?;
        map.end()
    }
}

/// Decode a JSON array of nodes, pruning anything unrecognised.
///
/// The result is normalized (see [`normalize`]).
pub fn decode_nodes(value: &Value) -> Result<Vec<Node>, NodeDecodeError> {
    let items = value.as_array().ok_or_else(|| NodeDecodeError::NotAnArray(kind_name(value)))?;
    Ok(normalize(decode_children(items)))
}

/// Decode a single node. Returns `None` (after logging) when the value is
/// not a node this model can represent.
pub fn decode_node(value: &Value) -> Option<Node> {
    let Some(object) = value.as_object() else {
        warn!(found = kind_name(value), "dropping non-object node");
        return None;
    };

    if let Some(tag) = object.get("type") {
        let Some(tag) = tag.as_str() else {
            warn!(found = kind_name(tag), "dropping node with non-string type");
            return None;
        };
        let Some(kind) = kind_from_tag(tag, object) else {
            warn!(tag, "dropping node of unknown type");
            return None;
        };
        let children = match object.get("children").and_then(Value::as_array) {
            Some(items) => decode_children(items),
            None => Vec::new(),
        };
        return Some(Node::Element(Element::new(kind, children)));
    }

    if let Some(text) = object.get("text").and_then(Value::as_str) {
        let flag = |name: &str| object.get(name).and_then(Value::as_bool).unwrap_or(false);
        let marks = Marks {
            bold: flag("bold"),
            italic: flag("italic"),
            strikethrough: flag("strikethrough"),
            code: flag("code"),
        };
        return Some(Node::Text(Text::styled(text, marks)));
    }

    warn!("dropping object that is neither an element nor a text leaf");
    None
}

fn decode_children(items: &[Value]) -> Vec<Node> {
    items.iter().filter_map(decode_node).collect()
}

fn kind_from_tag(tag: &str, object: &Map<String, Value>) -> Option<ElementKind> {
    let string = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_owned);

    let kind = match tag {
        "p" => ElementKind::Paragraph,
        "quote" => ElementKind::Quote,
        "ol" => ElementKind::OrderedList,
        "ul" => ElementKind::UnorderedList,
        "li" => ElementKind::ListItem,
        "code" => ElementKind::Code { lang: string("lang").filter(|l| !l.is_empty()) },
        "img" => ElementKind::Image {
            url: string("url").unwrap_or_default(),
            title: string("title"),
            alt: string("alt"),
        },
        "a" => ElementKind::Link { url: string("url").unwrap_or_default(), title: string("title") },
        "h1" => ElementKind::Heading(HeadingLevel::new(1)?),
        "h2" => ElementKind::Heading(HeadingLevel::new(2)?),
        "h3" => ElementKind::Heading(HeadingLevel::new(3)?),
        "h4" => ElementKind::Heading(HeadingLevel::new(4)?),
        "h5" => ElementKind::Heading(HeadingLevel::new(5)?),
        "h6" => ElementKind::Heading(HeadingLevel::new(6)?),
        _ => return None,
    };
    Some(kind)
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn encodes_editor_shape() {
        let nodes = vec![
            Node::element(
                ElementKind::Heading(HeadingLevel::new(1).unwrap()),
                vec![Node::text("Welcome")],
            ),
            Node::Element(Element::paragraph(vec![
                Node::text("This is "),
                Node::styled("bold", Marks::BOLD),
            ])),
        ];

        assert_eq!(
            serde_json::to_value(&nodes).unwrap(),
            json!([
                {"type": "h1", "children": [{"text": "Welcome"}]},
                {"type": "p", "children": [{"text": "This is "}, {"text": "bold", "bold": true}]}
            ])
        );
    }

    #[test]
    fn encodes_attributes() {
        let nodes = vec![
            Node::Element(Element::code(Some("rust".into()), "fn main() {}")),
            Node::Element(Element::image("/media/a.png", None, Some("A".into()))),
            Node::element(
                ElementKind::Link { url: "https://a.b".into(), title: Some("T".into()) },
                vec![Node::text("x")],
            ),
        ];

        assert_eq!(
            serde_json::to_value(&nodes).unwrap(),
            json!([
                {"type": "code", "lang": "rust", "children": [{"text": "fn main() {}"}]},
                {"type": "img", "url": "/media/a.png", "alt": "A", "children": [{"text": ""}]},
                {"type": "a", "url": "https://a.b", "title": "T", "children": [{"text": "x"}]}
            ])
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let value = json!([
            {"type": "h2", "children": [{"text": "Title", "italic": true}]},
            {"type": "ul", "children": [
                {"type": "li", "children": [{"text": "a", "code": true}]}
            ]},
            {"type": "quote", "children": [{"text": "gone", "strikethrough": true}]}
        ]);

        let nodes = decode_nodes(&value).unwrap();
        assert_eq!(serde_json::to_value(&nodes).unwrap(), value);
    }

    #[test]
    fn prunes_unknown_and_malformed_nodes() {
        let value = json!([
            {"type": "table", "children": [{"text": "cell"}]},
            {"type": "p", "children": [
                {"text": "kept"},
                {"type": "mention", "children": []},
                42,
                {"neither": true}
            ]},
            {"type": "h7", "children": [{"text": "no"}]},
            {"type": 3}
        ]);

        let nodes = decode_nodes(&value).unwrap();
        assert_eq!(nodes, vec![Node::Element(Element::paragraph(vec![Node::text("kept")]))]);
    }

    #[rstest]
    #[case::zero_padded("h01")]
    #[case::signed("h+1")]
    #[case::out_of_range("h7")]
    #[case::bare("h")]
    fn heading_tags_must_be_exact(#[case] tag: &str) {
        let value = json!([{"type": tag, "children": [{"text": "x"}]}]);
        assert_eq!(decode_nodes(&value).unwrap(), Vec::new());
    }

    #[test]
    fn restores_missing_image_placeholder() {
        let nodes = decode_nodes(&json!([{"type": "img", "url": "/a.png"}])).unwrap();
        assert_eq!(nodes, vec![Node::Element(Element::image("/a.png", None, None))]);
    }

    #[test]
    fn rejects_non_array_root() {
        let err = decode_nodes(&json!({"type": "p"})).unwrap_err();
        assert_eq!(err.to_string(), "expected an array of nodes, found an object");
    }
}
