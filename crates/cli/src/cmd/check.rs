//! Round-trip stability check over a directory of Markdown files.

use std::fs;
use std::path::{Path, PathBuf};

use mdslate_core::config::ResolvedConfig;
use mdslate_core::document::DocumentKind;
use mdslate_core::DocumentCodec;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::fail;
use crate::CheckArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Stable,
    Unstable,
    Error,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report {
    checked: usize,
    unstable: usize,
    errors: usize,
    files: Vec<FileReport>,
}

pub fn run(rc: &ResolvedConfig, args: &CheckArgs) {
    if !args.dir.is_dir() {
        fail(format!("Not a directory: {}", args.dir.display()));
    }

    let codec = DocumentCodec::from_config(rc);
    let files: Vec<FileReport> =
        markdown_files(&args.dir).iter().map(|path| check_file(&codec, path)).collect();

    let count = |status: Status| files.iter().filter(|f| f.status == status).count();
    let report = Report {
        checked: files.len(),
        unstable: count(Status::Unstable),
        errors: count(Status::Error),
        files,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(format!("Error serializing report: {e}")),
        }
    } else {
        for file in report.files.iter().filter(|f| f.status != Status::Stable) {
            match &file.error {
                Some(error) => println!("ERROR    {}: {error}", file.path),
                None => println!("UNSTABLE {}", file.path),
            }
        }
        println!(
            "checked {} files: {} unstable, {} errors",
            report.checked, report.unstable, report.errors
        );
    }

    if report.unstable + report.errors > 0 {
        crate::logging::flush();
        std::process::exit(1);
    }
}

fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matches!(DocumentKind::from_path(path), Ok(DocumentKind::Markdown)))
        .collect();
    files.sort();
    files
}

/// Parse, render and parse again; the two trees must match.
fn check_file(codec: &DocumentCodec, path: &Path) -> FileReport {
    let display = path.display().to_string();
    debug!(path = %path.display(), "checking");

    let outcome = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| codec.split(&text).map_err(|e| e.to_string()))
        .and_then(|doc| {
            let saved = codec.merge_document(&doc).map_err(|e| e.to_string())?;
            let reparsed = codec.split(&saved).map_err(|e| e.to_string())?;
            Ok(reparsed == doc)
        });

    match outcome {
        Ok(true) => FileReport { path: display, status: Status::Stable, error: None },
        Ok(false) => FileReport { path: display, status: Status::Unstable, error: None },
        Err(e) => FileReport { path: display, status: Status::Error, error: Some(e) },
    }
}
