//! Path-addressed mutation of the configuration tree.
//!
//! After every path-based write the whole document is swept and mappings
//! left without keys are removed from their parents, cascading upward.
//! Sequence elements are never removed by the sweep; only explicit
//! [`remove_at`] shrinks a sequence.

use crate::error::{TreeError, kind_name};
use bridge_editor_protocol::{FieldPath, PathSegment};
use log::debug;
use serde_json::{Map, Value};

/// Write `value` at `path`, creating missing containers on the way.
///
/// A blank string or `null` clears the target instead: the key is removed
/// from its mapping (a sequence slot is reset to `null`). Clearing never
/// creates containers. A sequence index may address an existing element or
/// the slot right after the last one; anything further is
/// [`TreeError::IndexOutOfRange`]. Existing values that cannot hold the next
/// segment produce [`TreeError::TypeMismatch`]. On error the document is
/// left untouched.
pub fn set_by_path(doc: &mut Value, path: &FieldPath, value: Value) -> Result<(), TreeError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(TreeError::EmptyPath);
    };

    if is_clearing(&value) {
        if let Some(container) = lookup_mut(doc, parents) {
            clear_slot(container, last);
        }
        debug!("cleared config field {path}");
    } else {
        let segments = path.segments();
        let mut staged = doc.clone();
        let mut current = &mut staged;
        for (depth, segment) in parents.iter().enumerate() {
            let next_is_index = matches!(segments[depth + 1], PathSegment::Index(_));
            current = descend(current, segment, next_is_index, path, depth)?;
        }
        assign(current, last, value, path, parents.len())?;
        *doc = staged;
        debug!("updated config field {path}");
    }

    let pruned = prune_empty_objects(doc);
    if pruned > 0 {
        debug!("pruned {pruned} empty object(s) after editing {path}");
    }
    Ok(())
}

/// Value stored at `path`, if every segment exists.
pub fn get_by_path<'a>(doc: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |current, segment| match (current, segment) {
            (Value::Object(map), segment) => map.get(&segment.as_key()),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
}

/// Mutable counterpart of [`get_by_path`] for a raw segment slice.
pub(crate) fn lookup_mut<'a>(doc: &'a mut Value, segments: &[PathSegment]) -> Option<&'a mut Value> {
    segments
        .iter()
        .try_fold(doc, |current, segment| match (current, segment) {
            (Value::Object(map), segment) => map.get_mut(&segment.as_key()),
            (Value::Array(items), PathSegment::Index(index)) => items.get_mut(*index),
            _ => None,
        })
}

/// Remove `key` from a mapping. Returns `false` when it was absent.
pub fn delete_key(map: &mut Map<String, Value>, key: &str) -> bool {
    map.shift_remove(key).is_some()
}

/// Remove the element at `index`. Returns `false` when out of range.
pub fn remove_at(items: &mut Vec<Value>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

/// Remove every mapping that is empty after pruning its children.
///
/// Recurses through sequences but never removes their elements. The value
/// passed in is never removed itself. Returns the number of removed nodes.
pub fn prune_empty_objects(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let mut removed = 0;
            for child in map.values_mut() {
                removed += prune_empty_objects(child);
            }
            let before = map.len();
            map.retain(|_, child| !is_empty_object(child));
            removed + (before - map.len())
        }
        Value::Array(items) => items.iter_mut().map(prune_empty_objects).sum(),
        _ => 0,
    }
}

/// Blank strings count as "unset".
pub(crate) fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.trim().is_empty())
}

fn is_clearing(value: &Value) -> bool {
    value.is_null() || is_blank(value)
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

fn empty_container(index: bool) -> Value {
    if index {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Step from `container` into `segment`, creating the child on demand.
fn descend<'a>(
    container: &'a mut Value,
    segment: &PathSegment,
    next_is_index: bool,
    path: &FieldPath,
    depth: usize,
) -> Result<&'a mut Value, TreeError> {
    if container.is_null() {
        *container = empty_container(matches!(segment, PathSegment::Index(_)));
    }
    let slot = match container {
        Value::Object(map) => map.entry(segment.as_key()).or_insert(Value::Null),
        Value::Array(items) => match segment {
            PathSegment::Index(index) => sequence_slot(items, *index, path, depth)?,
            PathSegment::Field(_) => return Err(mismatch(path, depth, "object", "array")),
        },
        other => return Err(mismatch(path, depth, expected_for(segment), kind_name(other))),
    };

    if slot.is_null() {
        *slot = empty_container(next_is_index);
    }
    let compatible = match &*slot {
        Value::Object(_) => true,
        Value::Array(_) => next_is_index,
        _ => false,
    };
    if compatible {
        Ok(slot)
    } else {
        let expected = if next_is_index { "array" } else { "object" };
        Err(mismatch(path, depth + 1, expected, kind_name(slot)))
    }
}

fn assign(
    container: &mut Value,
    segment: &PathSegment,
    value: Value,
    path: &FieldPath,
    depth: usize,
) -> Result<(), TreeError> {
    if container.is_null() {
        *container = empty_container(matches!(segment, PathSegment::Index(_)));
    }
    match container {
        Value::Object(map) => {
            map.insert(segment.as_key(), value);
            Ok(())
        }
        Value::Array(items) => match segment {
            PathSegment::Index(index) => {
                *sequence_slot(items, *index, path, depth)? = value;
                Ok(())
            }
            PathSegment::Field(_) => Err(mismatch(path, depth, "object", "array")),
        },
        other => Err(mismatch(path, depth, expected_for(segment), kind_name(other))),
    }
}

/// Existing element `index`, or a fresh `null` slot when `index` is the length.
fn sequence_slot<'a>(
    items: &'a mut Vec<Value>,
    index: usize,
    path: &FieldPath,
    depth: usize,
) -> Result<&'a mut Value, TreeError> {
    let len = items.len();
    if index == len {
        items.push(Value::Null);
    }
    items.get_mut(index).ok_or_else(|| TreeError::IndexOutOfRange {
        path: path_prefix(path, depth),
        index,
        len,
    })
}

fn clear_slot(container: &mut Value, segment: &PathSegment) {
    match (container, segment) {
        (Value::Object(map), segment) => {
            delete_key(map, &segment.as_key());
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if let Some(slot) = items.get_mut(*index) {
                *slot = Value::Null;
            }
        }
        _ => {}
    }
}

fn expected_for(segment: &PathSegment) -> &'static str {
    match segment {
        PathSegment::Field(_) => "object",
        PathSegment::Index(_) => "array",
    }
}

/// First `depth` segments of `path`, or `$` for the document root.
fn path_prefix(path: &FieldPath, depth: usize) -> String {
    let prefix = FieldPath::from_segments(path.segments()[..depth].to_vec());
    if prefix.is_empty() {
        "$".to_string()
    } else {
        prefix.to_string()
    }
}

fn mismatch(path: &FieldPath, depth: usize, expected: &'static str, found: &'static str) -> TreeError {
    TreeError::TypeMismatch {
        path: path_prefix(path, depth),
        expected,
        found,
    }
}
