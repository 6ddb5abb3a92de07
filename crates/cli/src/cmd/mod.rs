//! Subcommand implementations.

pub mod check;
pub mod doctor;
pub mod merge;
pub mod roundtrip;
pub mod schema;
pub mod split;

use std::fs;
use std::path::Path;

use mdslate_core::config::{ConfigError, ResolvedConfig};
use mdslate_core::{DocumentCodec, LoadedDocument};
use serde::Serialize;

use crate::OutputFormat;

/// Print `message` to stderr and exit with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    crate::logging::flush();
    std::process::exit(1);
}

pub fn require_config(loaded: Result<ResolvedConfig, ConfigError>) -> ResolvedConfig {
    loaded.unwrap_or_else(|e| fail(format!("Error loading config: {e}")))
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Error reading {}: {e}", path.display())))
}

/// Read and load `path` by its extension.
pub fn load_document(codec: &DocumentCodec, path: &Path) -> LoadedDocument {
    let content = read_file(path);
    codec
        .load(path, &content)
        .unwrap_or_else(|e| fail(format!("Error loading {}: {e}", path.display())))
}

pub fn print_value<T: Serialize>(value: &T, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => fail(format!("Error serializing output: {e}")),
    }
}
