//! Form-field templates for editing front matter.

pub mod infer;
pub mod types;

pub use infer::{SEQUENCE_KEY, generate_fields, generate_template, is_image, wrap_meta};
pub use types::{Field, FieldConfig, FieldType, Template};
