//! Editor session: one schema, its immutable default document, and the live
//! configuration being edited.
//!
//! Every operation runs to completion on the caller's thread. Operations
//! that address an entity which no longer exists (a removed payment, an
//! unknown override) are no-ops that report `false`.

mod leaderboards;
mod payments;
mod placements;
mod platforms;

use crate::error::{EditorError, ImportError, TreeError, kind_name};
use crate::export::ExportArtifact;
use crate::merger::merge_with_default;
use crate::projector::project;
use crate::tree::{get_by_path, lookup_mut, prune_empty_objects, remove_at, set_by_path};
use bridge_editor_protocol::{FieldPath, Platform};
use bridge_editor_schema::{Schema, SchemaNode, build_default_document, resolve};
use log::{debug, info, warn};
use serde_json::{Map, Value};

pub(crate) const PLATFORMS_KEY: &str = "platforms";
pub(crate) const PAYMENTS_KEY: &str = "payments";
pub(crate) const LEADERBOARDS_KEY: &str = "leaderboards";
pub(crate) const ADVERTISEMENT_KEY: &str = "advertisement";
pub(crate) const PLACEMENTS_KEY: &str = "placements";
pub(crate) const ID_KEY: &str = "id";
pub(crate) const IS_MAIN_KEY: &str = "isMain";

/// Explicit session state for one editor instance.
#[derive(Debug, Clone)]
pub struct EditorSession {
    schema: Schema,
    /// Materialized once; only ever cloned.
    defaults: Value,
    config: Value,
}

impl EditorSession {
    /// Materialize defaults from `schema` and start editing a copy of them.
    pub fn new(schema: Schema) -> Result<Self, EditorError> {
        let defaults = build_default_document(&schema)?;
        info!(
            "editor session created (default keys={})",
            defaults.as_object().map_or(0, Map::len)
        );
        Ok(Self {
            config: defaults.clone(),
            schema,
            defaults,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Default document materialized from the schema.
    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    /// Live configuration document.
    pub fn config(&self) -> &Value {
        &self.config
    }

    /// Value at `path` in the live document.
    pub fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        get_by_path(&self.config, path)
    }

    /// Discard all edits and start over from the defaults.
    pub fn reset(&mut self) {
        self.config = self.defaults.clone();
        info!("editor session reset to defaults");
    }

    /// Path-addressed field update; blank strings and `null` clear the field.
    pub fn update_field(&mut self, path: &FieldPath, value: Value) -> Result<(), EditorError> {
        set_by_path(&mut self.config, path, value).map_err(|err| {
            debug!("rejected update of {path}: {err}");
            EditorError::from(err)
        })
    }

    /// Replace the live document with `defaults` merged with pasted JSON.
    ///
    /// On any failure the live document is left as it was.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            warn!("rejected config import: input is empty");
            return Err(ImportError::Empty);
        }
        let parsed: Value = serde_json::from_str(trimmed).map_err(|err| {
            warn!("rejected config import: {err}");
            ImportError::Malformed(err)
        })?;
        if !parsed.is_object() {
            let found = kind_name(&parsed);
            warn!("rejected config import: top-level value is {found}");
            return Err(ImportError::NotAnObject(found));
        }
        self.config = merge_with_default(&self.defaults, &parsed);
        info!(
            "imported config (keys={})",
            parsed.as_object().map_or(0, Map::len)
        );
        Ok(())
    }

    /// Minimized export view of the live document.
    pub fn projection(&self) -> Value {
        project(&self.config)
    }

    /// Render the export artifact for the live document.
    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        ExportArtifact::from_config(&self.config)
    }

    /// Sweep empty mappings after a structural removal.
    fn prune_after_removal(&mut self, what: &str) {
        let pruned = prune_empty_objects(&mut self.config);
        debug!("removed {what} (pruned={pruned})");
    }
}

/// Resolved element schema of a root-level sequence such as `payments`.
pub(crate) fn item_schema<'a>(schema: &'a Schema, section: &str) -> Result<SchemaNode<'a>, EditorError> {
    let collection = schema
        .property(section)?
        .ok_or_else(|| EditorError::MissingSchemaSection(section.to_string()))?;
    let items = collection
        .items()
        .ok_or_else(|| EditorError::MissingSchemaSection(format!("{section}.items")))?;
    Ok(resolve(items, schema)?)
}

/// Platform ids among the keys of `entry`, skipping anything else.
pub(crate) fn platform_keys(entry: Option<&Map<String, Value>>) -> Vec<Platform> {
    entry
        .map(|map| {
            map.keys()
                .filter_map(|key| key.parse::<Platform>().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Root mapping of the live document.
fn root_object(config: &mut Value) -> Result<&mut Map<String, Value>, TreeError> {
    if config.is_null() {
        *config = Value::Object(Map::new());
    }
    match config {
        Value::Object(map) => Ok(map),
        other => Err(TreeError::TypeMismatch {
            path: "$".to_string(),
            expected: "object",
            found: kind_name(other),
        }),
    }
}

/// Mapping under `key`, created when missing.
fn child_object<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> Result<&'a mut Map<String, Value>, TreeError> {
    let slot = map.entry(key).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(inner) => Ok(inner),
        other => Err(TreeError::TypeMismatch {
            path: key.to_string(),
            expected: "object",
            found: kind_name(other),
        }),
    }
}

/// Sequence under `key`, created when missing.
fn child_array<'a>(map: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Vec<Value>, TreeError> {
    let slot = map.entry(key).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => Ok(items),
        other => Err(TreeError::TypeMismatch {
            path: key.to_string(),
            expected: "array",
            found: kind_name(other),
        }),
    }
}

/// Sequence at `path`, creating it and its parent mappings on demand.
fn ensure_collection<'a>(config: &'a mut Value, path: &FieldPath) -> Result<&'a mut Vec<Value>, TreeError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(TreeError::EmptyPath);
    };
    let mut map = root_object(config)?;
    for segment in parents {
        map = child_object(map, &segment.as_key())?;
    }
    child_array(map, &last.as_key())
}

/// Number of elements in the sequence at `path`.
fn collection_len(config: &Value, path: &FieldPath) -> usize {
    get_by_path(config, path)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Element mapping `index` of the sequence at `collection`.
fn element<'a>(config: &'a Value, collection: &FieldPath, index: usize) -> Option<&'a Map<String, Value>> {
    get_by_path(config, &collection.clone().index(index)).and_then(Value::as_object)
}

fn element_mut<'a>(
    config: &'a mut Value,
    collection: &FieldPath,
    index: usize,
) -> Option<&'a mut Map<String, Value>> {
    lookup_mut(config, collection.clone().index(index).segments()).and_then(Value::as_object_mut)
}

/// Remove element `index` from the sequence at `collection`.
fn remove_element(config: &mut Value, collection: &FieldPath, index: usize) -> bool {
    match lookup_mut(config, collection.segments()) {
        Some(Value::Array(items)) => remove_at(items, index),
        _ => false,
    }
}

/// Store an override string: non-blank values verbatim, otherwise `""`.
fn override_value(value: &str) -> Value {
    if value.trim().is_empty() {
        Value::String(String::new())
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::EditorSession;
    use crate::ImportError;
    use bridge_editor_protocol::FieldPath;
    use bridge_editor_schema::Schema;
    use bridge_editor_test_utils::{analytics_schema, bridge_schema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session(schema: serde_json::Value) -> EditorSession {
        EditorSession::new(Schema::from_value(schema).expect("schema")).expect("session")
    }

    #[test]
    fn starts_from_materialized_defaults() {
        let session = session(bridge_schema());
        assert_eq!(
            session.config(),
            &json!({
                "sendAnalyticsEvents": true,
                "disableLoadingLogo": false,
                "platforms": {},
                "advertisement": {
                    "useBuiltInErrorPopup": false,
                    "interstitial": { "preloadOnStart": false, "delay": 60 },
                    "rewarded": { "preloadOnStart": false }
                }
            })
        );
        assert_eq!(session.config(), session.defaults());
    }

    #[test]
    fn reset_restores_defaults_without_sharing_state() {
        let mut session = session(analytics_schema());
        let path: FieldPath = "backfillId".parse().expect("path");
        session.update_field(&path, json!("abc")).expect("update");
        assert_eq!(session.defaults(), &json!({ "sendAnalyticsEvents": true }));

        session.reset();
        assert_eq!(session.config(), &json!({ "sendAnalyticsEvents": true }));

        session.update_field(&path, json!("again")).expect("update");
        assert_eq!(session.defaults(), &json!({ "sendAnalyticsEvents": true }));
    }

    #[test]
    fn failed_imports_leave_the_document_untouched() {
        let mut session = session(analytics_schema());
        let path: FieldPath = "backfillId".parse().expect("path");
        session.update_field(&path, json!("keep")).expect("update");
        let before = session.config().clone();

        assert!(matches!(session.import_json("   "), Err(ImportError::Empty)));
        assert!(matches!(session.import_json("{ nope"), Err(ImportError::Malformed(_))));
        assert!(matches!(session.import_json("[1, 2]"), Err(ImportError::NotAnObject("array"))));
        assert!(matches!(session.import_json("42"), Err(ImportError::NotAnObject("number"))));
        assert_eq!(session.config(), &before);
    }

    #[test]
    fn import_merges_onto_defaults() {
        let mut session = session(bridge_schema());
        session
            .import_json(r#"{ "advertisement": { "interstitial": { "delay": 30 } }, "backfill": "x" }"#)
            .expect("import");
        assert_eq!(session.value_at(&"advertisement.interstitial.delay".parse().expect("path")), Some(&json!(30)));
        assert_eq!(
            session.value_at(&"advertisement.interstitial.preloadOnStart".parse().expect("path")),
            Some(&json!(false))
        );
        assert_eq!(session.value_at(&"sendAnalyticsEvents".parse().expect("path")), Some(&json!(true)));
        assert_eq!(session.value_at(&"backfill".parse().expect("path")), Some(&json!("x")));
    }
}
