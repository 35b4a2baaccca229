//! # Errors
//!
//! Failures surfaced by payload loading, configuration and rendering.
//! Pointer hit tests never fail; they return `None` instead.

use thiserror::Error;

/// Errors produced by the visualization core.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot parse {field} time {value:?}")]
    InvalidTime { field: &'static str, value: String },

    #[error("payload has no time extent")]
    MissingTimeExtent,

    #[error("payload has no authors")]
    NoAuthors,

    #[error("payload has no files")]
    NoFiles,

    #[error("rendering failed: {0}")]
    Render(String),
}

pub type VizResult<T> = Result<T, VizError>;
