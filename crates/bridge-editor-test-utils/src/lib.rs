//! Test helpers shared across bridge editor crates.

pub mod schema;

pub use schema::{analytics_schema, bridge_schema, write_schema};
