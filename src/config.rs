use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub site: SiteConfig,
}

/// Where pages come from and where they are written
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub content: PathBuf,
    /// Copied verbatim into the output directory before pages are generated
    pub static_dir: Option<PathBuf>,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            static_dir: Some(PathBuf::from("static")),
            template: PathBuf::from("template.html"),
            output: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix substituted for root-relative `href="/` and `src="/` links
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
        }
    }
}

impl Config {
    /// The defaults bundled into the binary.
    ///
    /// `build.rs` type-checks every field of the bundled file.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if it
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
