//! Error types for render-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from render-core
    #[error(transparent)]
    Core(#[from] render_core::Error),

    /// A mandatory flag is missing or empty, reported before any work begins
    #[error("missing required flag: {flag}")]
    Validation { flag: &'static str },
}
