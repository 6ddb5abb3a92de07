pub mod codec;
pub mod comrak;
pub mod parser;
pub mod serializer;
pub mod types;

// Re-export primary API
pub use codec::MarkdownCodec;
pub use parser::parse_body;
pub use serializer::render_body;
pub use types::{ListMarker, MarkdownAstError, RenderOptions};
