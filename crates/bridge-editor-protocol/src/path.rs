//! Path addressing into the configuration document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing paths or identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("path is empty")]
    Empty,
    /// A dotted path contains an empty segment (`a..b`).
    #[error("empty segment at position {position} in path `{path}`")]
    EmptySegment { path: String, position: usize },
    /// The identifier is not a known platform.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
    /// The identifier is not a known ad surface.
    #[error("unknown ad surface: {0}")]
    UnknownSurface(String),
}

/// One step of a path: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl PathSegment {
    /// Key used when the segment addresses a mapping.
    pub fn as_key(&self) -> String {
        match self {
            PathSegment::Field(name) => name.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Field(value.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        PathSegment::Index(value)
    }
}

/// Ordered list of segments from the document root to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Empty path addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Extend the path with a mapping key.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(name.into()));
        self
    }

    /// Extend the path with a sequence index.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Append every segment of `other`.
    pub fn join(mut self, other: &FieldPath) -> Self {
        self.segments.extend(other.segments.iter().cloned());
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split into parent segments and the final segment.
    pub fn split_last(&self) -> Option<(&PathSegment, &[PathSegment])> {
        self.segments.split_last()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    /// Parse a dotted path; all-digit segments become indices.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        for (position, part) in value.split('.').enumerate() {
            if part.is_empty() {
                return Err(PathError::EmptySegment {
                    path: value.to_string(),
                    position,
                });
            }
            let segment = if part.bytes().all(|b| b.is_ascii_digit()) {
                match part.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => PathSegment::Field(part.to_string()),
                }
            } else {
                PathSegment::Field(part.to_string())
            };
            segments.push(segment);
        }
        Ok(Self { segments })
    }
}

/// Serialized in its dotted text form.
impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
