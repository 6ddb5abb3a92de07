//! Frontmatter serialization back to markdown.

use std::borrow::Cow;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::types::{DumpOptions, Frontmatter, ParsedDocument};

#[derive(Debug, Error)]
pub enum FrontmatterSerializeError {
    #[error("failed to serialize frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Serialize a parsed document back to markdown string.
pub fn serialize(doc: &ParsedDocument) -> Result<String, FrontmatterSerializeError> {
    serialize_with_order(doc, &DumpOptions::default())
}

/// Serialize a parsed document with explicit key ordering.
pub fn serialize_with_order(
    doc: &ParsedDocument,
    options: &DumpOptions,
) -> Result<String, FrontmatterSerializeError> {
    attach(doc.frontmatter.as_ref(), &doc.body, options)
}

/// Prefix `body` with a `---` fenced YAML block.
///
/// Missing or empty frontmatter leaves the body untouched.
pub fn attach(
    frontmatter: Option<&Frontmatter>,
    body: &str,
    options: &DumpOptions,
) -> Result<String, FrontmatterSerializeError> {
    if let Some(fm) = frontmatter
        && !fm.is_empty()
    {
        let yaml = frontmatter_to_yaml(fm, options)?;
        return Ok(format!("---\n{}---\n\n{}", yaml, body));
    }
    Ok(body.to_string())
}

/// Serialize frontmatter to a YAML string (without delimiters).
pub fn frontmatter_to_yaml(
    fm: &Frontmatter,
    options: &DumpOptions,
) -> Result<String, FrontmatterSerializeError> {
    Ok(serde_yaml::to_string(&ordered_mapping(&fm.fields, options))?)
}

fn ordered_mapping(fields: &Mapping, options: &DumpOptions) -> Mapping {
    let mut mapping = Mapping::new();

    // 1. Add fields in specified order
    for key in &options.order {
        if let Some(value) = fields.get(key.as_str()) {
            mapping.insert(Value::String(key.clone()), value.clone());
        }
    }

    // 2. Add remaining fields, in source order unless sorting was asked for
    let mut remaining: Vec<(&Value, &Value)> =
        fields.iter().filter(|(key, _)| !mapping.contains_key(*key)).collect();
    if options.sort_keys {
        remaining.sort_by(|(a, _), (b, _)| key_text(a).cmp(&key_text(b)));
    }

    for (key, value) in remaining {
        mapping.insert(key.clone(), value.clone());
    }

    mapping
}

fn key_text(key: &Value) -> Cow<'_, str> {
    match key.as_str() {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(serde_yaml::to_string(key).unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::parse;

    fn fm(pairs: &[(&str, Value)]) -> Frontmatter {
        let mut fm = Frontmatter::new();
        for (key, value) in pairs {
            fm.insert(*key, value.clone());
        }
        fm
    }

    #[test]
    fn serialize_document_without_frontmatter() {
        let doc = ParsedDocument { frontmatter: None, body: "# Hello\n\nWorld".to_string() };
        assert_eq!(serialize(&doc).unwrap(), "# Hello\n\nWorld");
    }

    #[test]
    fn serialize_document_with_frontmatter() {
        let doc = ParsedDocument {
            frontmatter: Some(fm(&[("title", Value::String("Test".into()))])),
            body: "# Content".to_string(),
        };

        assert_eq!(serialize(&doc).unwrap(), "---\ntitle: Test\n---\n\n# Content");
    }

    #[test]
    fn empty_frontmatter_is_not_fenced() {
        let doc = ParsedDocument { frontmatter: Some(Frontmatter::new()), body: String::new() };
        assert_eq!(serialize(&doc).unwrap(), "");
    }

    #[test]
    fn roundtrip_frontmatter() {
        let original = "---\ntitle: Hello\ncount: 42\n---\n\n# Body";
        let parsed = parse(original).unwrap();
        let serialized = serialize(&parsed).unwrap();

        let reparsed = parse(&serialized).unwrap();
        assert_eq!(reparsed.frontmatter, parsed.frontmatter);
        assert!(reparsed.body.contains("# Body"));
    }

    #[test]
    fn order_then_source_order() {
        let fields = fm(&[
            ("title", Value::from("T")),
            ("tags", Value::from("x")),
            ("date", Value::from("today")),
        ]);
        let options =
            DumpOptions { order: vec!["date".into(), "missing".into()], sort_keys: false };

        let yaml = frontmatter_to_yaml(&fields, &options).unwrap();
        assert_eq!(yaml, "date: today\ntitle: T\ntags: x\n");
    }

    #[test]
    fn sorted_keys() {
        let fields = fm(&[("b", Value::from(1)), ("c", Value::from(2)), ("a", Value::from(3))]);
        let options = DumpOptions { order: Vec::new(), sort_keys: true };

        let yaml = frontmatter_to_yaml(&fields, &options).unwrap();
        assert_eq!(yaml, "a: 3\nb: 1\nc: 2\n");
    }
}
