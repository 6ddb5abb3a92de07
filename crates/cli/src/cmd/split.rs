use mdslate_core::DocumentCodec;
use mdslate_core::config::ResolvedConfig;

use super::{load_document, print_value};
use crate::SplitArgs;

pub fn run(rc: &ResolvedConfig, args: &SplitArgs) {
    let codec = DocumentCodec::from_config(rc);
    let doc = load_document(&codec, &args.file);
    print_value(&doc, args.format);
}
