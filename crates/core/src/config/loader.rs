use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `config_path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file falls back to
    /// built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let path = default_config_path();
                if !path.exists() {
                    debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(ResolvedConfig::default());
                }
                path
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let mut resolved = Self::from_toml_str(&s, &path.display().to_string())?;
        resolved.source = Some(path);
        Ok(resolved)
    }

    /// Parse and resolve configuration text. `origin` names the source in errors.
    pub fn from_toml_str(s: &str, origin: &str) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Ok(ResolvedConfig {
            source: None,
            markdown: cf.markdown,
            frontmatter: cf.frontmatter,
            logging: Self::resolve_logging(&cf.logging)?,
        })
    }

    fn resolve_logging(log_cfg: &LoggingConfig) -> Result<LoggingConfig, ConfigError> {
        // Resolve log file path if present
        if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&file.to_string_lossy())?;
            Ok(LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            })
        } else {
            Ok(log_cfg.clone())
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("mdslate").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("mdslate").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_ast::ListMarker;

    #[test]
    fn minimal_file_uses_defaults() {
        let rc = ConfigLoader::from_toml_str("version = 1\n", "test").unwrap();
        assert_eq!(rc.markdown.list_marker, ListMarker::Dash);
        assert!(!rc.frontmatter.sort_keys);
        assert!(rc.frontmatter.order.is_empty());
        assert_eq!(rc.logging.level, "info");
        assert!(rc.logging.file.is_none());
    }

    #[test]
    fn unknown_list_marker_is_a_parse_error() {
        let err = ConfigLoader::from_toml_str("version = 1\n[markdown]\nlist_marker = \"#\"\n", "t")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(origin, _) if origin == "t"));
    }

    #[test]
    fn log_file_is_expanded() {
        let toml = "version = 1\n[logging]\nfile = \"$MDSLATE_TEST_NO_SUCH_VAR_X/log\"\n";
        // An undefined variable cannot be expanded.
        assert!(matches!(ConfigLoader::from_toml_str(toml, "t"), Err(ConfigError::NoHome)));

        let toml = "version = 1\n[logging]\nfile = \"/var/log/mdslate.log\"\n";
        let rc = ConfigLoader::from_toml_str(toml, "t").unwrap();
        assert_eq!(rc.logging.file, Some(PathBuf::from("/var/log/mdslate.log")));
    }
}
