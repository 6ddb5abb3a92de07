use mdslate_core::DocumentCodec;
use mdslate_core::config::ResolvedConfig;

use super::{fail, load_document};
use crate::RoundtripArgs;

pub fn run(rc: &ResolvedConfig, args: &RoundtripArgs) {
    let codec = DocumentCodec::from_config(rc);
    let path = args.file.as_path();

    let doc = load_document(&codec, path);
    let saved = codec
        .save(path, &doc)
        .unwrap_or_else(|e| fail(format!("Error saving {}: {e}", path.display())));

    if !args.check {
        print!("{saved}");
        return;
    }

    match codec.load(path, &saved) {
        Ok(reloaded) if reloaded == doc => println!("OK   {}", path.display()),
        Ok(_) => fail(format!(
            "UNSTABLE {}: saved text loads as a different document",
            path.display()
        )),
        Err(e) => {
            fail(format!("UNSTABLE {}: saved text does not load: {e}", path.display()))
        }
    }
}
