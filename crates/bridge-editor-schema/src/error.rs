//! Error types for schema loading and traversal.

use thiserror::Error;

/// Errors returned while loading or walking the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Reading a schema file failed.
    #[error("failed to read schema: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Fetching a schema over HTTP failed.
    #[error("failed to fetch schema: {0}")]
    FetchFailed(#[from] reqwest::Error),
    /// The schema server answered with a non-success status.
    #[error("failed to fetch schema: {0}")]
    HttpStatus(u16),
    /// The schema document is not valid JSON.
    #[error("failed to parse schema: {0}")]
    ParseFailed(#[from] serde_json::Error),
    /// The schema document has an unexpected shape.
    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },
    /// A `$ref` segment does not exist in the document.
    #[error("unresolved reference {reference}: missing segment `{segment}`")]
    UnresolvedRef { reference: String, segment: String },
    /// Only document-local references (`#/...`) are supported.
    #[error("unsupported reference {0}: only local `#/` references are allowed")]
    UnsupportedRef(String),
    /// Following `$ref` chains did not terminate.
    #[error("reference cycle detected while resolving {0}")]
    RefCycle(String),
    /// Default materialization recursed past the allowed depth.
    #[error("schema nesting exceeds {depth} levels")]
    DepthExceeded { depth: usize },
}
