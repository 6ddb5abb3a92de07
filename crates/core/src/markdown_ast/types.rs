use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bullet character used for unordered lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListMarker {
    #[default]
    #[serde(rename = "-")]
    Dash,
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "+")]
    Plus,
}

impl ListMarker {
    pub fn as_char(self) -> char {
        match self {
            ListMarker::Dash => '-',
            ListMarker::Star => '*',
            ListMarker::Plus => '+',
        }
    }
}

/// Formatting choices for rendered Markdown. These never change the parsed
/// tree, only how it is spelled.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub list_marker: ListMarker,
}

#[derive(Debug, Error)]
pub enum MarkdownAstError {
    #[error("failed to render markdown: {0}")]
    RenderError(#[from] std::io::Error),

    #[error("rendered markdown is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
