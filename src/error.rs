use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid markdown: missing closing delimiter `{delimiter}`")]
    UnterminatedDelimiter { delimiter: &'static str },

    #[error("malformed <{tag}> element: {reason}")]
    MalformedElement { tag: String, reason: &'static str },

    #[error("no line starting with `# ` to use as the page title")]
    MissingTitle,

    #[error("Failed to build page {}: {source}", path.display())]
    Page {
        path: PathBuf,
        source: Box<Error>,
    },

    #[error("Failed to read template at {}: {source}", path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file at {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
