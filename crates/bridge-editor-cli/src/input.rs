//! Typing raw text input against the schema.

use anyhow::{Context, anyhow};
use bridge_editor_core::{EditorSession, FieldKind};
use bridge_editor_protocol::FieldPath;
use serde_json::Value;

/// Convert `raw` into the value stored at `path`.
///
/// Scalar schema fields use their form control's parsing, so numbers inside
/// payment products clear on empty or zero input. Paths the schema
/// does not describe accept JSON literals and fall back to plain text.
pub fn typed_value(session: &EditorSession, path: &FieldPath, raw: &str) -> anyhow::Result<Value> {
    let node = session
        .schema()
        .node_at(path)
        .with_context(|| format!("failed to look up {path} in the schema"))?;
    if let Some(kind) = node.and_then(|node| FieldKind::for_path(path, node)) {
        return kind
            .parse_input(raw)
            .ok_or_else(|| anyhow!("`{raw}` is not a valid value for {path}"));
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::String(String::new()));
    }
    Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(raw.to_string())))
}

/// Split a `PATH=VALUE` assignment.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(FieldPath, &str)> {
    let (path, value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected PATH=VALUE, got `{assignment}`"))?;
    let path = path
        .trim()
        .parse::<FieldPath>()
        .with_context(|| format!("invalid path in `{assignment}`"))?;
    Ok((path, value))
}
