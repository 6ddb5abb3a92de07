use mdslate_core::config::loader::{ConfigError, default_config_path};
use mdslate_core::config::types::ResolvedConfig;
use std::path::Path;

pub fn run(config: Option<&Path>, loaded: Result<ResolvedConfig, ConfigError>) {
    match loaded {
        Ok(rc) => {
            println!("OK   mdslate doctor");
            match &rc.source {
                Some(path) => println!("path: {}", path.display()),
                None => {
                    println!("path: (defaults, no file at {})", default_config_path().display())
                }
            }
            println!("version: {}", mdslate_core::version());
            println!("markdown.list_marker: {}", rc.markdown.list_marker.as_char());
            println!("frontmatter.sort_keys: {}", rc.frontmatter.sort_keys);
            println!("frontmatter.order: [{}]", rc.frontmatter.order.join(", "));
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL mdslate doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
