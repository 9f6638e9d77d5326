use super::{
    ADVERTISEMENT_KEY, EditorSession, ID_KEY, PLACEMENTS_KEY, collection_len, element, element_mut,
    ensure_collection, override_value, platform_keys, remove_element,
};
use crate::error::EditorError;
use crate::tree::delete_key;
use bridge_editor_protocol::{AdSurface, FieldPath, Platform};
use log::{debug, info};
use serde_json::{Map, Value};

fn placements_path(surface: AdSurface) -> FieldPath {
    FieldPath::root()
        .field(ADVERTISEMENT_KEY)
        .field(surface.as_str())
        .field(PLACEMENTS_KEY)
}

impl EditorSession {
    pub fn placement_count(&self, surface: AdSurface) -> usize {
        collection_len(&self.config, &placements_path(surface))
    }

    /// Platform overrides present on placement `index` of `surface`.
    pub fn placement_overrides(&self, surface: AdSurface, index: usize) -> Vec<Platform> {
        platform_keys(element(&self.config, &placements_path(surface), index))
    }

    /// Append `{ "id": "" }`, creating the surface's placement list on demand.
    pub fn add_placement(&mut self, surface: AdSurface) -> Result<usize, EditorError> {
        let placements = ensure_collection(&mut self.config, &placements_path(surface))?;
        let mut placement = Map::new();
        placement.insert(ID_KEY.to_string(), override_value(""));
        placements.push(Value::Object(placement));
        let index = placements.len() - 1;
        info!("added {surface} placement #{index}");
        Ok(index)
    }

    pub fn remove_placement(&mut self, surface: AdSurface, index: usize) -> Result<bool, EditorError> {
        let removed = remove_element(&mut self.config, &placements_path(surface), index);
        if removed {
            self.prune_after_removal(&format!("{surface} placement #{index}"));
        }
        Ok(removed)
    }

    pub fn set_placement_id(&mut self, surface: AdSurface, index: usize, id: &str) -> Result<bool, EditorError> {
        let Some(placement) = element_mut(&mut self.config, &placements_path(surface), index) else {
            return Ok(false);
        };
        placement.insert(ID_KEY.to_string(), override_value(id));
        debug!("set {surface} placement #{index} id");
        Ok(true)
    }

    pub fn add_placement_override(
        &mut self,
        surface: AdSurface,
        index: usize,
        platform: Platform,
    ) -> Result<bool, EditorError> {
        let Some(placement) = element_mut(&mut self.config, &placements_path(surface), index) else {
            return Ok(false);
        };
        if placement.contains_key(platform.as_str()) {
            return Ok(false);
        }
        placement.insert(platform.as_str().to_string(), override_value(""));
        debug!("added {platform} override to {surface} placement #{index}");
        Ok(true)
    }

    pub fn set_placement_override(
        &mut self,
        surface: AdSurface,
        index: usize,
        platform: Platform,
        value: &str,
    ) -> Result<bool, EditorError> {
        let Some(placement) = element_mut(&mut self.config, &placements_path(surface), index) else {
            return Ok(false);
        };
        placement.insert(platform.as_str().to_string(), override_value(value));
        debug!("set {platform} override on {surface} placement #{index}");
        Ok(true)
    }

    pub fn remove_placement_override(
        &mut self,
        surface: AdSurface,
        index: usize,
        platform: Platform,
    ) -> Result<bool, EditorError> {
        let removed = element_mut(&mut self.config, &placements_path(surface), index)
            .is_some_and(|placement| delete_key(placement, platform.as_str()));
        if removed {
            self.prune_after_removal(&format!("{platform} from {surface} placement #{index}"));
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::EditorSession;
    use bridge_editor_protocol::{AdSurface, Platform};
    use bridge_editor_schema::Schema;
    use bridge_editor_test_utils::{analytics_schema, bridge_schema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> EditorSession {
        EditorSession::new(Schema::from_value(bridge_schema()).expect("schema")).expect("session")
    }

    #[test]
    fn placements_are_created_on_demand() {
        let mut session = EditorSession::new(Schema::from_value(analytics_schema()).expect("schema"))
            .expect("session");
        assert_eq!(session.add_placement(AdSurface::Rewarded).expect("add"), 0);
        assert_eq!(
            session.config()["advertisement"],
            json!({ "rewarded": { "placements": [{ "id": "" }] } })
        );
    }

    #[test]
    fn placement_ids_and_overrides() {
        let mut session = session();
        session.add_placement(AdSurface::Interstitial).expect("add");
        assert!(session.set_placement_id(AdSurface::Interstitial, 0, "level_end").expect("id"));
        assert!(
            session
                .add_placement_override(AdSurface::Interstitial, 0, Platform::Reddit)
                .expect("override")
        );
        assert!(
            !session
                .add_placement_override(AdSurface::Interstitial, 0, Platform::Reddit)
                .expect("again")
        );
        assert!(
            session
                .set_placement_override(AdSurface::Interstitial, 0, Platform::Reddit, "r-1")
                .expect("value")
        );
        assert_eq!(
            session.config()["advertisement"]["interstitial"]["placements"],
            json!([{ "id": "level_end", "reddit": "r-1" }])
        );
        assert_eq!(
            session.placement_overrides(AdSurface::Interstitial, 0),
            vec![Platform::Reddit]
        );

        assert!(session.set_placement_id(AdSurface::Interstitial, 0, " ").expect("blank"));
        assert_eq!(session.config()["advertisement"]["interstitial"]["placements"][0]["id"], json!(""));
    }

    #[test]
    fn surfaces_are_independent() {
        let mut session = session();
        session.add_placement(AdSurface::Interstitial).expect("add");
        assert_eq!(session.placement_count(AdSurface::Interstitial), 1);
        assert_eq!(session.placement_count(AdSurface::Rewarded), 0);
        assert!(!session.set_placement_id(AdSurface::Rewarded, 0, "x").expect("missing"));
    }

    #[test]
    fn removing_placements() {
        let mut session = session();
        session.add_placement(AdSurface::Rewarded).expect("add");
        session
            .add_placement_override(AdSurface::Rewarded, 0, Platform::Yandex)
            .expect("override");

        assert!(
            session
                .remove_placement_override(AdSurface::Rewarded, 0, Platform::Yandex)
                .expect("remove override")
        );
        assert!(session.remove_placement(AdSurface::Rewarded, 0).expect("remove"));
        assert_eq!(
            session.config()["advertisement"]["rewarded"],
            json!({ "preloadOnStart": false, "placements": [] })
        );
        assert!(!session.remove_placement(AdSurface::Rewarded, 0).expect("gone"));
    }
}
