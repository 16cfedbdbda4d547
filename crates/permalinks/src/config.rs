use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::collect::CollectOptions;
use crate::extract::ExtractPolicy;

pub const DEFAULT_CONTENT_DIR: &str = "./content";

/// The file name looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "permalinks.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The directory to collect content files from.
    pub content_dir: PathBuf,
    pub policy: ExtractPolicy,
    pub max_open_dirs: Option<NonZeroUsize>,
    /// Sort collected paths before extracting, for reproducible output.
    pub sort: bool,
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            policy: ExtractPolicy::default(),
            max_open_dirs: None,
            sort: false,
            base_url: None,
        }
    }
}

impl Config {
    /// Loads the config at `path`.
    ///
    /// A relative `content_dir` is resolved against the directory holding the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;

        if config.content_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.content_dir = parent.join(&config.content_dir);
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            max_open_dirs: self.max_open_dirs,
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.content_dir, PathBuf::from("./content"));
        assert_eq!(config.policy, ExtractPolicy::Lenient);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(indoc! {r#"
            content_dir = "docs"
            policy = "strict"
            max_open_dirs = 16
            sort = true
            base_url = "https://example.com"
        "#})
        .unwrap();

        assert_eq!(
            config,
            Config {
                content_dir: PathBuf::from("docs"),
                policy: ExtractPolicy::Strict,
                max_open_dirs: NonZeroUsize::new(16),
                sort: true,
                base_url: Some("https://example.com".into()),
            }
        );
    }

    #[test]
    fn test_rejects_unknown_and_invalid_fields() {
        assert!(Config::from_toml_str("contnet_dir = \"x\"").is_err());
        assert!(Config::from_toml_str("max_open_dirs = 0").is_err());
        assert!(Config::from_toml_str("policy = \"sloppy\"").is_err());
    }

    #[test]
    fn test_from_path_resolves_content_dir() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("permalinks.toml");
        fs::write(&path, "content_dir = \"pages\"\n").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.content_dir, root.path().join("pages"));

        #[cfg(unix)]
        {
            fs::write(&path, "content_dir = \"/srv/content\"\n").unwrap();
            let config = Config::from_path(&path).unwrap();
            assert_eq!(config.content_dir, PathBuf::from("/srv/content"));
        }
    }

    #[test]
    fn test_from_path_errors() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("missing.toml");
        assert!(matches!(
            Config::from_path(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = root.path().join("broken.toml");
        fs::write(&broken, "sort = maybe").unwrap();
        assert!(matches!(
            Config::from_path(&broken),
            Err(ConfigError::Toml { .. })
        ));
    }
}
