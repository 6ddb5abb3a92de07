use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frontmatter::DumpOptions;
use crate::markdown_ast::{ListMarker, RenderOptions};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub frontmatter: FrontmatterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Markdown output style.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownConfig {
    /// Bullet used for unordered lists (default: "-")
    #[serde(default)]
    pub list_marker: ListMarker,
}

impl From<MarkdownConfig> for RenderOptions {
    fn from(cfg: MarkdownConfig) -> Self {
        RenderOptions { list_marker: cfg.list_marker }
    }
}

/// Key ordering for dumped front matter.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct FrontmatterConfig {
    /// Sort keys not named in `order` alphabetically instead of keeping source order.
    #[serde(default)]
    pub sort_keys: bool,
    /// Keys emitted first, in this order.
    #[serde(default)]
    pub order: Vec<String>,
}

impl From<&FrontmatterConfig> for DumpOptions {
    fn from(cfg: &FrontmatterConfig) -> Self {
        DumpOptions { order: cfg.order.clone(), sort_keys: cfg.sort_keys }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedConfig {
    /// File the configuration was read from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub markdown: MarkdownConfig,
    pub frontmatter: FrontmatterConfig,
    pub logging: LoggingConfig,
}
