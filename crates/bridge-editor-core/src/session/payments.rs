use super::{
    EditorSession, ID_KEY, PAYMENTS_KEY, collection_len, element, element_mut, ensure_collection,
    item_schema, platform_keys, remove_element,
};
use crate::error::EditorError;
use crate::tree::{delete_key, set_by_path};
use bridge_editor_protocol::{FieldPath, Platform};
use bridge_editor_schema::build_default;
use log::{debug, info};
use serde_json::Value;

fn payments_path() -> FieldPath {
    FieldPath::root().field(PAYMENTS_KEY)
}

impl EditorSession {
    pub fn payment_count(&self) -> usize {
        collection_len(&self.config, &payments_path())
    }

    /// Platforms configured on payment `index`.
    pub fn payment_platforms(&self, index: usize) -> Vec<Platform> {
        platform_keys(element(&self.config, &payments_path(), index))
    }

    /// Append a payment product built from the item schema; returns its index.
    pub fn add_payment(&mut self) -> Result<usize, EditorError> {
        let item = item_schema(&self.schema, PAYMENTS_KEY)?;
        let payment = build_default(item, &self.schema)?;
        let payments = ensure_collection(&mut self.config, &payments_path())?;
        payments.push(payment);
        let index = payments.len() - 1;
        info!("added payment #{index}");
        Ok(index)
    }

    pub fn remove_payment(&mut self, index: usize) -> Result<bool, EditorError> {
        let removed = remove_element(&mut self.config, &payments_path(), index);
        if removed {
            self.prune_after_removal(&format!("payment #{index}"));
        }
        Ok(removed)
    }

    /// Store the product id verbatim, blank included.
    pub fn set_payment_id(&mut self, index: usize, id: &str) -> Result<bool, EditorError> {
        let Some(payment) = element_mut(&mut self.config, &payments_path(), index) else {
            return Ok(false);
        };
        payment.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        debug!("set payment #{index} id");
        Ok(true)
    }

    /// Path update relative to payment `index`.
    pub fn update_payment_field(
        &mut self,
        index: usize,
        field: &FieldPath,
        value: Value,
    ) -> Result<bool, EditorError> {
        if element(&self.config, &payments_path(), index).is_none() {
            return Ok(false);
        }
        if field.to_string() == ID_KEY {
            if let Value::String(id) = &value {
                return self.set_payment_id(index, id);
            }
        }
        let path = payments_path().index(index).join(field);
        set_by_path(&mut self.config, &path, value)?;
        Ok(true)
    }

    /// Add platform settings to payment `index` from the item schema.
    ///
    /// Settings without defaults are stored as `{}` and are pruned by the next
    /// edit or removal unless one of their fields is set first.
    pub fn add_payment_platform(&mut self, index: usize, platform: Platform) -> Result<bool, EditorError> {
        if element(&self.config, &payments_path(), index).is_none() {
            return Ok(false);
        }
        let item = item_schema(&self.schema, PAYMENTS_KEY)?;
        let node = item
            .property(platform.as_str())
            .ok_or_else(|| EditorError::PlatformNotInSchema {
                platform,
                section: PAYMENTS_KEY.to_string(),
            })?;
        let settings = build_default(node, &self.schema)?;

        let Some(payment) = element_mut(&mut self.config, &payments_path(), index) else {
            return Ok(false);
        };
        if payment.contains_key(platform.as_str()) {
            return Ok(false);
        }
        payment.insert(platform.as_str().to_string(), settings);
        debug!("added {platform} to payment #{index}");
        Ok(true)
    }

    pub fn remove_payment_platform(&mut self, index: usize, platform: Platform) -> Result<bool, EditorError> {
        let removed = element_mut(&mut self.config, &payments_path(), index)
            .is_some_and(|payment| delete_key(payment, platform.as_str()));
        if removed {
            self.prune_after_removal(&format!("{platform} from payment #{index}"));
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::{EditorError, EditorSession};
    use bridge_editor_protocol::Platform;
    use bridge_editor_schema::Schema;
    use bridge_editor_test_utils::bridge_schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> EditorSession {
        EditorSession::new(Schema::from_value(bridge_schema()).expect("schema")).expect("session")
    }

    #[test]
    fn add_payment_uses_item_defaults_through_ref() {
        let mut session = session();
        assert_eq!(session.add_payment().expect("add"), 0);
        assert_eq!(session.add_payment().expect("add"), 1);
        assert_eq!(session.config()["payments"], json!([{ "id": "" }, { "id": "" }]));
        assert_eq!(session.payment_count(), 2);
    }

    #[test]
    fn payment_platforms_get_their_own_defaults() {
        let mut session = session();
        session.add_payment().expect("add");
        assert!(session.add_payment_platform(0, Platform::Playgama).expect("playgama"));
        assert!(session.add_payment_platform(0, Platform::Yandex).expect("yandex"));
        assert!(!session.add_payment_platform(0, Platform::Yandex).expect("yandex again"));

        assert_eq!(
            session.config()["payments"][0],
            json!({ "id": "", "playgama": { "amount": 0 }, "yandex": {} })
        );
        assert_eq!(session.payment_platforms(0), vec![Platform::Playgama, Platform::Yandex]);

        let err = session
            .add_payment_platform(0, Platform::Msn)
            .expect_err("msn is not a payment platform");
        assert!(matches!(err, EditorError::PlatformNotInSchema { .. }));
    }

    #[test]
    fn payment_id_is_stored_verbatim() {
        let mut session = session();
        session.add_payment().expect("add");
        assert!(session.set_payment_id(0, "coins_100").expect("set"));
        assert!(session.set_payment_id(0, "").expect("clear"));
        assert_eq!(session.config()["payments"][0], json!({ "id": "" }));

        assert!(session.update_payment_field(0, &"id".parse().expect("path"), json!("  ")).expect("id"));
        assert_eq!(session.config()["payments"][0]["id"], json!("  "));
    }

    #[test]
    fn payment_fields_go_through_path_updates() {
        let mut session = session();
        session.add_payment().expect("add");
        session.add_payment_platform(0, Platform::Facebook).expect("facebook");

        let field = "facebook.description".parse().expect("path");
        assert!(session.update_payment_field(0, &field, json!("Gold")).expect("update"));
        assert_eq!(
            session.config()["payments"][0]["facebook"],
            json!({ "id": "", "description": "Gold" })
        );

        assert!(session.update_payment_field(0, &field, json!("")).expect("clear"));
        assert_eq!(session.config()["payments"][0]["facebook"], json!({ "id": "" }));
    }

    #[test]
    fn missing_payments_are_no_ops() {
        let mut session = session();
        let before = session.config().clone();

        assert!(!session.remove_payment(3).expect("remove"));
        assert!(!session.set_payment_id(3, "x").expect("id"));
        assert!(!session.add_payment_platform(3, Platform::Yandex).expect("platform"));
        assert!(!session.remove_payment_platform(3, Platform::Yandex).expect("platform"));
        assert!(
            !session
                .update_payment_field(3, &"yandex.id".parse().expect("path"), json!("x"))
                .expect("field")
        );
        assert_eq!(session.config(), &before);
    }

    #[test]
    fn removing_a_payment_shifts_later_entries() {
        let mut session = session();
        for id in ["a", "b", "c"] {
            let index = session.add_payment().expect("add");
            session.set_payment_id(index, id).expect("id");
        }
        assert!(session.remove_payment(1).expect("remove"));
        assert_eq!(session.config()["payments"], json!([{ "id": "a" }, { "id": "c" }]));
    }

    #[test]
    fn empty_platform_settings_do_not_survive_the_next_edit() {
        let mut session = session();
        session.add_payment().expect("add");
        session.add_payment_platform(0, Platform::Yandex).expect("yandex");
        assert_eq!(session.config()["payments"][0]["yandex"], json!({}));

        session
            .update_field(&"advertisement.interstitial.delay".parse().expect("path"), json!(30))
            .expect("unrelated edit");
        assert_eq!(session.config()["payments"], json!([{ "id": "" }]));
        assert!(session.payment_platforms(0).is_empty());
    }

    #[test]
    fn removing_an_empty_platform_entry_prunes_nothing_else() {
        let mut session = session();
        session.add_payment().expect("add");
        session.add_payment_platform(0, Platform::Yandex).expect("yandex");

        assert!(session.remove_payment_platform(0, Platform::Yandex).expect("remove"));
        assert_eq!(session.config()["payments"], json!([{ "id": "" }]));
    }
}
