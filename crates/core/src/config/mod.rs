//! TOML configuration: output style for markdown and front matter, logging.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{FrontmatterConfig, LoggingConfig, MarkdownConfig, ResolvedConfig};
