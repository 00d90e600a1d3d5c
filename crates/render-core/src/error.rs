//! Error types for render-core

use std::path::PathBuf;

/// Result type for render-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Template source is not parseable
    #[error("Template {name} is not parseable: {message}")]
    TemplateSyntax { name: String, message: String },

    /// Template referenced an undefined value or a directive failed
    #[error("Template {name} failed to render: {message}")]
    TemplateExecution { name: String, message: String },

    /// A mandatory configuration layer could not be read
    #[error("Failed to read config layer at {path}: {source}")]
    LayerRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration layer is not a well-formed document
    #[error("Failed to parse config layer {layer}: {message}")]
    DocumentParse { layer: String, message: String },

    /// Merged configuration could not be serialized
    #[error("Failed to serialize merged config: {message}")]
    Serialize { message: String },

    /// A compiled-in asset is missing, which means a mis-packaged build
    #[error("Compiled-in asset not found: {key}")]
    MissingAsset { key: String },

    /// Filesystem error from render-fs
    #[error(transparent)]
    Fs(#[from] render_fs::Error),
}
