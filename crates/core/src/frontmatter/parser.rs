//! Frontmatter parsing from markdown documents.

use serde_yaml::Value;
use thiserror::Error;

use super::types::{Frontmatter, ParsedDocument};

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` lines at the very start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// Without a closing delimiter the whole content is body.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    match split_raw(content) {
        Some((yaml, body)) => Ok(ParsedDocument {
            frontmatter: Some(parse_yaml(yaml)?),
            body: body.to_string(),
        }),
        None => Ok(ParsedDocument { frontmatter: None, body: content.to_string() }),
    }
}

/// Split `content` into raw YAML text and body without parsing the YAML.
pub fn split_raw(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    // No closing ---, treat as no frontmatter
    None
}

/// Parse a YAML block into frontmatter. Empty or `null` YAML yields an empty
/// mapping.
pub fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterParseError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Null => Ok(Frontmatter::default()),
        Value::Mapping(fields) => Ok(Frontmatter { fields }),
        other => Err(FrontmatterParseError::NotAMapping(yaml_kind(&other))),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

pub(crate) fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
