use std::fs;

use mdslate_core::config::ResolvedConfig;
use mdslate_core::{Document, DocumentCodec};
use tracing::info;

use super::{fail, read_file};
use crate::MergeArgs;

pub fn run(rc: &ResolvedConfig, args: &MergeArgs) {
    let content = read_file(&args.file);
    let value: serde_json::Value = serde_json::from_str(&content)
        .unwrap_or_else(|e| fail(format!("Error parsing {}: {e}", args.file.display())));

    let doc = Document::from_json(&value)
        .unwrap_or_else(|e| fail(format!("Error decoding {}: {e}", args.file.display())));

    let markdown = DocumentCodec::from_config(rc)
        .merge_document(&doc)
        .unwrap_or_else(|e| fail(format!("Error rendering markdown: {e}")));

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &markdown) {
                fail(format!("Error writing {}: {e}", path.display()));
            }
            info!(path = %path.display(), bytes = markdown.len(), "wrote markdown");
        }
        None => print!("{markdown}"),
    }
}
