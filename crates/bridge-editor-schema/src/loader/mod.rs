//! Schema document loading and path lookup.
//!
//! The schema is fetched once at startup from a file or an HTTP location.
//! Any failure here is fatal for the editor: there is no partial session
//! without a schema.

mod source_io;

#[cfg(test)]
mod tests;

use crate::resolver::resolve;
use crate::{SchemaError, SchemaNode};
use bridge_editor_protocol::{FieldPath, PathSegment};
use log::{debug, info};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Well-known relative location of the schema document.
pub const DEFAULT_SCHEMA_LOCATION: &str = "./schema.json";

/// Where the schema document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Local file.
    File(PathBuf),
    /// `http://` or `https://` location.
    Url(String),
}

impl SchemaSource {
    /// Classify a location string; anything that is not an HTTP URL is a path.
    pub fn parse(location: &str) -> Self {
        let lowered = location.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            SchemaSource::Url(location.to_string())
        } else {
            SchemaSource::File(PathBuf::from(location))
        }
    }
}

impl Default for SchemaSource {
    fn default() -> Self {
        SchemaSource::parse(DEFAULT_SCHEMA_LOCATION)
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::File(path) => write!(f, "{}", path.display()),
            SchemaSource::Url(url) => f.write_str(url),
        }
    }
}

/// A loaded schema document.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Value,
}

impl Schema {
    /// Wrap an already parsed schema document.
    pub fn from_value(root: Value) -> Result<Self, SchemaError> {
        let Some(map) = root.as_object() else {
            return Err(invalid("$", "expected a JSON object"));
        };
        if let Some(properties) = map.get("properties") {
            if !properties.is_object() {
                return Err(invalid("properties", "expected a JSON object"));
            }
        }
        Ok(Self { root })
    }

    /// Parse a schema from JSON text.
    pub fn load_from_str(contents: &str) -> Result<Self, SchemaError> {
        debug!("loading schema from raw contents (len={})", contents.len());
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Read a schema file from disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = source_io::read_file(path.as_ref())?;
        Self::load_from_str(&contents)
    }

    /// Fetch a schema over HTTP.
    pub async fn fetch(url: &str) -> Result<Self, SchemaError> {
        let contents = source_io::fetch_url(url).await?;
        Self::load_from_str(&contents)
    }

    /// Load the schema from any supported source.
    pub async fn load(source: &SchemaSource) -> Result<Self, SchemaError> {
        info!("loading schema from {source}");
        let schema = match source {
            SchemaSource::File(path) => Self::load_from_path(path)?,
            SchemaSource::Url(url) => Self::fetch(url).await?,
        };
        info!(
            "schema loaded (properties={})",
            schema.node().properties().len()
        );
        Ok(schema)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Root node view.
    pub fn node(&self) -> SchemaNode<'_> {
        SchemaNode::new(&self.root)
    }

    /// Resolved root property, if declared.
    pub fn property(&self, name: &str) -> Result<Option<SchemaNode<'_>>, SchemaError> {
        let root = resolve(self.node(), self)?;
        match root.property(name) {
            Some(node) => resolve(node, self).map(Some),
            None => Ok(None),
        }
    }

    /// Resolved schema node describing the value at `path`.
    ///
    /// Field segments step into `properties`, index segments into `items`.
    /// Returns `Ok(None)` when the schema does not describe the path.
    pub fn node_at(&self, path: &FieldPath) -> Result<Option<SchemaNode<'_>>, SchemaError> {
        let mut current = resolve(self.node(), self)?;
        for segment in path.segments() {
            let next = match segment {
                PathSegment::Field(name) => current.property(name),
                PathSegment::Index(_) => current.items(),
            };
            let Some(next) = next else {
                return Ok(None);
            };
            current = resolve(next, self)?;
        }
        Ok(Some(current))
    }
}

fn invalid(path: &str, message: &str) -> SchemaError {
    SchemaError::InvalidSchema {
        path: path.to_string(),
        message: message.to_string(),
    }
}
