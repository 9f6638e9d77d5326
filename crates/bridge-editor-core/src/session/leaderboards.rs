use super::{
    EditorSession, ID_KEY, IS_MAIN_KEY, LEADERBOARDS_KEY, collection_len, element, element_mut,
    ensure_collection, item_schema, override_value, platform_keys, remove_element,
};
use crate::error::EditorError;
use crate::tree::delete_key;
use bridge_editor_protocol::{FieldPath, Platform};
use bridge_editor_schema::build_default;
use log::{debug, info};
use serde_json::Value;

fn leaderboards_path() -> FieldPath {
    FieldPath::root().field(LEADERBOARDS_KEY)
}

impl EditorSession {
    pub fn leaderboard_count(&self) -> usize {
        collection_len(&self.config, &leaderboards_path())
    }

    /// Platform overrides present on leaderboard `index`.
    pub fn leaderboard_platforms(&self, index: usize) -> Vec<Platform> {
        platform_keys(element(&self.config, &leaderboards_path(), index))
    }

    /// Append a leaderboard built from the item schema; returns its index.
    pub fn add_leaderboard(&mut self) -> Result<usize, EditorError> {
        let item = item_schema(&self.schema, LEADERBOARDS_KEY)?;
        let leaderboard = build_default(item, &self.schema)?;
        let leaderboards = ensure_collection(&mut self.config, &leaderboards_path())?;
        leaderboards.push(leaderboard);
        let index = leaderboards.len() - 1;
        info!("added leaderboard #{index}");
        Ok(index)
    }

    pub fn remove_leaderboard(&mut self, index: usize) -> Result<bool, EditorError> {
        let removed = remove_element(&mut self.config, &leaderboards_path(), index);
        if removed {
            self.prune_after_removal(&format!("leaderboard #{index}"));
        }
        Ok(removed)
    }

    pub fn set_leaderboard_id(&mut self, index: usize, id: &str) -> Result<bool, EditorError> {
        let Some(leaderboard) = element_mut(&mut self.config, &leaderboards_path(), index) else {
            return Ok(false);
        };
        leaderboard.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        debug!("set leaderboard #{index} id");
        Ok(true)
    }

    /// Only a main leaderboard carries `isMain`; clearing the flag drops the key.
    pub fn set_leaderboard_main(&mut self, index: usize, main: bool) -> Result<bool, EditorError> {
        let Some(leaderboard) = element_mut(&mut self.config, &leaderboards_path(), index) else {
            return Ok(false);
        };
        if main {
            leaderboard.insert(IS_MAIN_KEY.to_string(), Value::Bool(true));
        } else {
            delete_key(leaderboard, IS_MAIN_KEY);
        }
        debug!("set leaderboard #{index} main={main}");
        Ok(true)
    }

    /// Add an empty override for `platform` if the item schema declares it.
    pub fn add_leaderboard_platform(&mut self, index: usize, platform: Platform) -> Result<bool, EditorError> {
        if element(&self.config, &leaderboards_path(), index).is_none() {
            return Ok(false);
        }
        let item = item_schema(&self.schema, LEADERBOARDS_KEY)?;
        if item.property(platform.as_str()).is_none() {
            return Err(EditorError::PlatformNotInSchema {
                platform,
                section: LEADERBOARDS_KEY.to_string(),
            });
        }

        let Some(leaderboard) = element_mut(&mut self.config, &leaderboards_path(), index) else {
            return Ok(false);
        };
        if leaderboard.contains_key(platform.as_str()) {
            return Ok(false);
        }
        leaderboard.insert(platform.as_str().to_string(), override_value(""));
        debug!("added {platform} override to leaderboard #{index}");
        Ok(true)
    }

    /// Set the platform-specific id; a blank value keeps the override as `""`.
    pub fn set_leaderboard_override(
        &mut self,
        index: usize,
        platform: Platform,
        value: &str,
    ) -> Result<bool, EditorError> {
        let Some(leaderboard) = element_mut(&mut self.config, &leaderboards_path(), index) else {
            return Ok(false);
        };
        leaderboard.insert(platform.as_str().to_string(), override_value(value));
        debug!("set {platform} override on leaderboard #{index}");
        Ok(true)
    }

    pub fn remove_leaderboard_platform(&mut self, index: usize, platform: Platform) -> Result<bool, EditorError> {
        let removed = element_mut(&mut self.config, &leaderboards_path(), index)
            .is_some_and(|leaderboard| delete_key(leaderboard, platform.as_str()));
        if removed {
            self.prune_after_removal(&format!("{platform} from leaderboard #{index}"));
        }
        Ok(removed)
    }
}
