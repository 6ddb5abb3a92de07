//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Parsed YAML frontmatter. Keys keep the order they had in the source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(Value::String(key.into()), value)
    }
}

impl From<Mapping> for Frontmatter {
    fn from(fields: Mapping) -> Self {
        Self { fields }
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

/// Controls the key order of dumped frontmatter.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Keys written first, in this order, when present.
    pub order: Vec<String>,
    /// Sort the remaining keys alphabetically instead of keeping source order.
    pub sort_keys: bool,
}
