//! State reconciliation engine for the bridge config editor.
//!
//! This crate owns the configuration tree operations (path-addressed
//! mutation with empty-ancestor pruning), the filtered export projection,
//! the merge used when importing pasted JSON, and the [`EditorSession`]
//! that ties them to one loaded schema.

pub mod catalog;
pub mod error;
pub mod export;
pub mod layout;
pub mod merger;
pub mod projector;
pub mod session;
pub mod tree;

pub use catalog::{CatalogScope, PlatformOption, platform_options};
pub use error::{EditorError, ImportError, TreeError};
pub use export::{EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE, ExportArtifact};
pub use layout::{
    FieldDescriptor, FieldKind, GeneralField, advertisement_fields, general_fields, payment_platform_fields,
    platform_fields, surface_fields,
};
pub use merger::merge_with_default;
pub use projector::project;
pub use session::EditorSession;
pub use tree::{delete_key, get_by_path, prune_empty_objects, remove_at, set_by_path};
