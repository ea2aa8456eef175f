//! Catalog loading and validation errors.

use std::path::PathBuf;

use orrery_lod::LodError;

/// Errors raised while loading or validating a body catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither `.ron` nor `.json`.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    /// RON syntax or schema error.
    #[error("failed to parse catalog: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// JSON syntax or schema error.
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog contains no bodies.
    #[error("catalog contains no bodies")]
    Empty,

    /// A body has an empty or whitespace-only name.
    #[error("body with empty name under {parent:?}")]
    EmptyName { parent: String },

    /// Two siblings share a name.
    #[error("duplicate body name at {path}")]
    DuplicateName { path: String },

    /// A body carries both explicit assets and a texture-set shorthand.
    #[error("{path}: specify either `assets` or `textures`, not both")]
    ConflictingTextures { path: String },

    /// A numeric field is negative, NaN, or infinite.
    #[error("{path}: invalid {field} {value}")]
    InvalidField {
        path: String,
        field: &'static str,
        value: f64,
    },

    /// The body's texture tiers are malformed.
    #[error("{path}: {source}")]
    Assets {
        path: String,
        #[source]
        source: LodError,
    },
}
