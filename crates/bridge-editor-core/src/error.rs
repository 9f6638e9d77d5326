//! Error types for the editor core.

use bridge_editor_protocol::{PathError, Platform};
use bridge_editor_schema::SchemaError;
use thiserror::Error;

/// Structural conflicts while walking the configuration tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The path has no segments.
    #[error("path is empty")]
    EmptyPath,
    /// An existing value cannot hold the next path segment.
    #[error("cannot descend into {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A sequence index lies beyond the slot right after the last element.
    #[error("index {index} is out of range for {path} (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Rejected JSON imports; the live document is left unchanged.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Nothing was pasted.
    #[error("import is empty")]
    Empty,
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The top-level value is not an object.
    #[error("imported JSON must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Errors returned by editor session operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Schema traversal failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A path or identifier could not be parsed.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Tree mutation hit an incompatible value.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Pasted JSON was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// The schema does not declare a section the operation needs.
    #[error("schema does not describe `{0}`")]
    MissingSchemaSection(String),
    /// The platform is not declared where it is being added.
    #[error("platform {platform} is not available under `{section}`")]
    PlatformNotInSchema { platform: Platform, section: String },
    /// Serializing the export failed.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Writing the export failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Short name of a JSON value's kind for messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
