//! Error taxonomy shared by the scaffolder and the agent tool layer.
//!
//! Validation and not-found conditions are typed so callers (and the agent
//! runtime wrapping the tools) can branch on them; process-level failures
//! abort the CLI run with a non-zero exit.

use std::path::PathBuf;

use crate::tools::sandbox::PathViolation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Project name failed slug validation.
    #[error("invalid project name: {0}")]
    InvalidProjectName(&'static str),

    /// Scaffold target directory already exists.
    #[error("directory '{0}' already exists")]
    DirectoryExists(PathBuf),

    /// File already exists (create_file on an existing path).
    #[error("file already exists: {0}")]
    AlreadyExists(String),

    /// File or directory does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A requested path was rejected by the allow-list sandbox.
    #[error(transparent)]
    Sandbox(#[from] PathViolation),

    /// A spawned process exited non-zero.
    #[error("'{command}' exited with code {code}")]
    ExternalProcess { command: String, code: i32 },

    /// Malformed or incomplete template data.
    #[error("template error: {0}")]
    Template(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
