use std::path::PathBuf;

/// Errors that can occur across the codescout toolkit.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use scout_core::ScoutError;
///
/// let err = ScoutError::Config("repository path does not exist".into());
/// assert!(err.to_string().contains("does not exist"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid target path or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Git invocation failure.
    #[error("git error: {0}")]
    Git(String),

    /// Source extraction failure.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
