//! Default-value materialization from schema nodes.

use crate::resolver::resolve;
use crate::{Schema, SchemaError, SchemaNode, SchemaType};
use log::debug;
use serde_json::{Map, Value, json};

/// Deepest required-property chain materialized before giving up.
pub const MAX_DEFAULT_DEPTH: usize = 64;

/// Root property whose entries are opt-in and never materialized.
const PLATFORMS_KEY: &str = "platforms";

/// Build the default value for a schema node.
///
/// Objects only receive properties that declare a `default` or are listed in
/// `required`; this keeps the configuration document sparse. Arrays always
/// start empty.
pub fn build_default(node: SchemaNode<'_>, schema: &Schema) -> Result<Value, SchemaError> {
    build_at_depth(node, schema, 0)
}

/// Build the initial configuration document for the whole schema.
///
/// Same rule as an object node, except a declared `platforms` property is
/// seeded as an empty mapping.
pub fn build_default_document(schema: &Schema) -> Result<Value, SchemaError> {
    let root = resolve(schema.node(), schema)?;
    let mut document = Map::new();
    for (key, property) in root.properties() {
        if key == PLATFORMS_KEY {
            document.insert(key.to_string(), Value::Object(Map::new()));
            continue;
        }
        if let Some(value) = property_default(root, key, property, schema, 0)? {
            document.insert(key.to_string(), value);
        }
    }
    debug!("built default document (keys={})", document.len());
    Ok(Value::Object(document))
}

fn build_at_depth(node: SchemaNode<'_>, schema: &Schema, depth: usize) -> Result<Value, SchemaError> {
    if depth > MAX_DEFAULT_DEPTH {
        return Err(SchemaError::DepthExceeded {
            depth: MAX_DEFAULT_DEPTH,
        });
    }
    let node = resolve(node, schema)?;

    match node.schema_type() {
        Some(SchemaType::Object) => {
            let mut object = Map::new();
            for (key, property) in node.properties() {
                if let Some(value) = property_default(node, key, property, schema, depth)? {
                    object.insert(key.to_string(), value);
                }
            }
            return Ok(Value::Object(object));
        }
        Some(SchemaType::Array) => return Ok(Value::Array(Vec::new())),
        _ => {}
    }

    if let Some(default) = node.default_value() {
        return Ok(default.clone());
    }

    Ok(match node.schema_type() {
        Some(SchemaType::String) => Value::String(String::new()),
        Some(SchemaType::Number) => json!(0),
        Some(SchemaType::Boolean) => Value::Bool(false),
        _ => Value::Null,
    })
}

/// Default for one property of an object node, or `None` when it stays absent.
fn property_default(
    parent: SchemaNode<'_>,
    key: &str,
    property: SchemaNode<'_>,
    schema: &Schema,
    depth: usize,
) -> Result<Option<Value>, SchemaError> {
    if let Some(default) = property.default_value() {
        return Ok(Some(default.clone()));
    }
    if parent.is_required(key) {
        return build_at_depth(property, schema, depth + 1).map(Some);
    }
    Ok(None)
}
