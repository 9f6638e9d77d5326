//! Filtered export projection.
//!
//! The projection drops everything that means "use the SDK default":
//! platforms whose settings are all inert, `false` flags, blank strings,
//! and containers left empty by those removals.

use crate::tree::is_blank;
use log::debug;
use serde_json::{Map, Value};

/// Root key whose entries are filtered as whole platforms first.
const PLATFORMS_KEY: &str = "platforms";

/// Produce the minimized export view of `doc`. The input is not modified.
pub fn project(doc: &Value) -> Value {
    let mut projected = doc.clone();
    if let Some(Value::Object(platforms)) = projected.get_mut(PLATFORMS_KEY) {
        let before = platforms.len();
        platforms.retain(|_, settings| !is_platform_inert(settings));
        if platforms.len() != before {
            debug!(
                "projection dropped {} inert platform(s)",
                before - platforms.len()
            );
        }
    }
    suppress(projected)
}

/// A platform entry is inert when every direct field value is inert.
pub fn is_platform_inert(settings: &Value) -> bool {
    match settings {
        Value::Object(fields) => fields.values().all(is_inert),
        other => is_inert(other),
    }
}

/// Blank string, `false`, or numeric zero.
fn is_inert(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        other => is_blank(other),
    }
}

fn suppress(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(suppress_map(map)),
        Value::Array(items) => Value::Array(suppress_items(items)),
        other => other,
    }
}

fn suppress_map(map: Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();
    for (key, value) in map {
        match value {
            Value::Bool(false) => {}
            Value::String(ref text) if text.trim().is_empty() => {}
            Value::Object(nested) => {
                let nested = suppress_map(nested);
                if !nested.is_empty() {
                    result.insert(key, Value::Object(nested));
                }
            }
            Value::Array(items) => {
                let items = suppress_items(items);
                if !items.is_empty() {
                    result.insert(key, Value::Array(items));
                }
            }
            other => {
                result.insert(key, other);
            }
        }
    }
    result
}

/// Elements are projected in place; those that end up as empty maps go.
fn suppress_items(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .map(suppress)
        .filter(|item| !matches!(item, Value::Object(map) if map.is_empty()))
        .collect()
}
