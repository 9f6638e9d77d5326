//! Schema model, `$ref` resolution, and default materialization for the
//! bridge config editor.
//!
//! The schema is trusted build-time input: it is loaded once at startup and
//! any structural fault in it (unresolvable references, reference cycles) is
//! reported as a [`SchemaError`] instead of being papered over.

mod defaults;
mod error;
mod loader;
mod node;
mod resolver;

/// Default materialization from schema nodes.
pub use defaults::{MAX_DEFAULT_DEPTH, build_default, build_default_document};
/// Public error type returned by schema loading and traversal.
pub use error::SchemaError;
/// Schema loading from files or HTTP.
pub use loader::{DEFAULT_SCHEMA_LOCATION, Schema, SchemaSource};
/// Borrowed schema node view.
pub use node::{SchemaNode, SchemaType};
/// `$ref` resolution.
pub use resolver::{MAX_REF_HOPS, resolve};
