//! Public SDK surface for the Playgama Bridge config editor.
//!
//! This crate re-exports the editor building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use bridge_editor_core as core;
/// Re-export for convenience.
pub use bridge_editor_protocol as protocol;
/// Re-export for convenience.
pub use bridge_editor_schema as schema;

pub use bridge_editor_core::{EditorError, EditorSession, ExportArtifact, ImportError};
pub use bridge_editor_protocol::{AdSurface, FieldPath, Platform};
pub use bridge_editor_schema::{Schema, SchemaError, SchemaSource};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Load a schema from `source` and open an editor session on it.
pub async fn open_session(source: &SchemaSource) -> Result<EditorSession, EditorError> {
    let schema = Schema::load(source).await?;
    EditorSession::new(schema)
}
