//! `$ref` resolution against the schema root.

use crate::{Schema, SchemaError, SchemaNode};
use log::trace;
use serde_json::Value;

/// Maximum number of chained `$ref` hops followed before assuming a cycle.
pub const MAX_REF_HOPS: usize = 32;

/// Resolve `node` to a concrete schema node.
///
/// Nodes without `$ref` are returned unchanged. A reference that lands on
/// another reference is followed until a concrete node is reached.
pub fn resolve<'a>(node: SchemaNode<'a>, schema: &'a Schema) -> Result<SchemaNode<'a>, SchemaError> {
    let mut current = node;
    let mut hops = 0;
    while let Some(reference) = current.reference() {
        if hops == MAX_REF_HOPS {
            return Err(SchemaError::RefCycle(reference.to_string()));
        }
        current = SchemaNode::new(lookup(schema.root(), reference)?);
        hops += 1;
    }
    Ok(current)
}

/// Walk `#/a/b/c` from the root.
fn lookup<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, SchemaError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(SchemaError::UnsupportedRef(reference.to_string()));
    };
    trace!("resolving schema reference {reference}");

    let mut target = root;
    for raw in pointer.split('/').filter(|segment| !segment.is_empty()) {
        let segment = decode_segment(raw);
        let next = match target {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        target = next.ok_or_else(|| SchemaError::UnresolvedRef {
            reference: reference.to_string(),
            segment: segment.clone(),
        })?;
    }
    Ok(target)
}

fn decode_segment(raw: &str) -> String {
    raw.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::{MAX_REF_HOPS, resolve};
    use crate::{Schema, SchemaError, SchemaNode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        Schema::from_value(value).expect("schema")
    }

    #[test]
    fn returns_plain_nodes_unchanged() {
        let schema = schema(json!({ "type": "object" }));
        let value = json!({ "type": "string", "default": "x" });
        let node = resolve(SchemaNode::new(&value), &schema).expect("resolve");
        assert_eq!(node.as_value(), &value);
    }

    #[test]
    fn follows_nested_definitions() {
        let schema = schema(json!({
            "definitions": {
                "placement": { "type": "object", "required": ["id"] },
                "alias": { "$ref": "#/definitions/placement" }
            }
        }));
        let value = json!({ "$ref": "#/definitions/alias" });
        let node = resolve(SchemaNode::new(&value), &schema).expect("resolve");
        assert_eq!(node.required(), vec!["id"]);
    }

    #[test]
    fn decodes_pointer_escapes_and_array_indices() {
        let schema = schema(json!({
            "$defs": { "a/b": { "type": "boolean" } },
            "anyOf": [{ "type": "number" }]
        }));
        let escaped = json!({ "$ref": "#/$defs/a~1b" });
        let node = resolve(SchemaNode::new(&escaped), &schema).expect("escaped");
        assert_eq!(node.as_value(), &json!({ "type": "boolean" }));

        let indexed = json!({ "$ref": "#/anyOf/0" });
        let node = resolve(SchemaNode::new(&indexed), &schema).expect("indexed");
        assert_eq!(node.as_value(), &json!({ "type": "number" }));
    }

    #[test]
    fn missing_segment_is_a_fault() {
        let schema = schema(json!({ "definitions": {} }));
        let value = json!({ "$ref": "#/definitions/missing" });
        let err = resolve(SchemaNode::new(&value), &schema).expect_err("missing");
        match err {
            SchemaError::UnresolvedRef { segment, .. } => assert_eq!(segment, "missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remote_references_are_rejected() {
        let schema = schema(json!({}));
        let value = json!({ "$ref": "https://example.com/schema.json" });
        let err = resolve(SchemaNode::new(&value), &schema).expect_err("remote");
        assert!(matches!(err, SchemaError::UnsupportedRef(_)));
    }

    #[test]
    fn self_referencing_chain_is_bounded() {
        let schema = schema(json!({
            "definitions": { "loop": { "$ref": "#/definitions/loop" } }
        }));
        let value = json!({ "$ref": "#/definitions/loop" });
        let err = resolve(SchemaNode::new(&value), &schema).expect_err("cycle");
        assert!(matches!(err, SchemaError::RefCycle(_)));
        assert!(MAX_REF_HOPS > 1);
    }
}
