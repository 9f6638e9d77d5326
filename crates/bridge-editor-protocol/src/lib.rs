//! Shared vocabulary for the bridge config editor: platform identifiers, ad
//! surfaces, and path addressing into the configuration document.

mod label;
mod path;
mod platform;

pub use label::format_label;
pub use path::{FieldPath, PathError, PathSegment};
pub use platform::{AdSurface, Platform};
