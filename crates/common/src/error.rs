//! Error types shared across AdForge crates.

use std::path::PathBuf;

/// Top-level error type for AdForge operations.
#[derive(Debug, thiserror::Error)]
pub enum AdforgeError {
    #[error("Catalog parse error: {message}")]
    Catalog { message: String },

    #[error("Catalog is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Failed to load image {source_ref}: {message}")]
    AssetLoad { source_ref: String, message: String },

    #[error("Drawing surface unavailable: {message}")]
    SurfaceUnavailable { message: String },

    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    #[error("Image encoding error: {message}")]
    Encode { message: String },

    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("No API key configured (set API_KEY or generation.api_key)")]
    MissingCredential,

    #[error("Provider returned no {what}")]
    EmptyResult { what: String },

    #[error("Discarded stale result for product {handle}")]
    StaleResult { handle: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using AdforgeError.
pub type AdforgeResult<T> = Result<T, AdforgeError>;

/// Coarse error category, used by callers that recover differently
/// depending on which subsystem failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unreadable catalog input. Recovered by clearing the catalog.
    CatalogParse,
    /// Source or logo image could not be fetched or decoded.
    AssetLoad,
    /// Remote generation failed; no ad is committed.
    Generation,
    Config,
    Io,
}

impl AdforgeError {
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn asset_load(source_ref: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::AssetLoad {
            source_ref: source_ref.into(),
            message: msg.into(),
        }
    }

    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable {
            message: msg.into(),
        }
    }

    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation {
            message: msg.into(),
        }
    }

    pub fn empty_result(what: impl Into<String>) -> Self {
        Self::EmptyResult { what: what.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog { .. } | Self::MissingColumn { .. } => ErrorKind::CatalogParse,
            Self::AssetLoad { .. }
            | Self::SurfaceUnavailable { .. }
            | Self::InvalidDimensions { .. }
            | Self::Encode { .. } => ErrorKind::AssetLoad,
            Self::Generation { .. }
            | Self::MissingCredential
            | Self::EmptyResult { .. }
            | Self::StaleResult { .. } => ErrorKind::Generation,
            Self::Config { .. } | Self::Json(_) => ErrorKind::Config,
            Self::FileNotFound { .. } | Self::Io(_) | Self::Other(_) => ErrorKind::Io,
        }
    }
}
