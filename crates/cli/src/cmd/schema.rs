use mdslate_core::DocumentCodec;
use mdslate_core::config::ResolvedConfig;
use mdslate_core::schema::generate_template;

use super::{load_document, print_value};
use crate::SchemaArgs;

pub fn run(rc: &ResolvedConfig, args: &SchemaArgs) {
    let codec = DocumentCodec::from_config(rc);
    let doc = load_document(&codec, &args.file);

    let template = generate_template(&args.file.to_string_lossy(), &doc.meta());
    print_value(&template, args.format);
}
