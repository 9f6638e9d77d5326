//! Merge of imported JSON onto the default document.

use serde_json::{Map, Value};

/// Overlay `incoming` onto a copy of `defaults`.
///
/// Mappings merge key by key, so defaults the import omits survive. Every
/// other value, sequences included, replaces the default wholesale.
pub fn merge_with_default(defaults: &Value, incoming: &Value) -> Value {
    let mut merged = defaults.clone();
    overlay(&mut merged, incoming);
    merged
}

/// Merge overlay values into the base, recursively overriding mappings.
fn overlay(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match value {
                    Value::Object(_) => {
                        let slot = base_map
                            .entry(key.clone())
                            .or_insert_with(|| Value::Object(Map::new()));
                        if !slot.is_object() {
                            *slot = Value::Object(Map::new());
                        }
                        overlay(slot, value);
                    }
                    _ => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, incoming_value) => {
            *base_slot = incoming_value.clone();
        }
    }
}
