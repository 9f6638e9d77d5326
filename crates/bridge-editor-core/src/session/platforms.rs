use super::{EditorSession, PLATFORMS_KEY, child_object, platform_keys, root_object};
use crate::error::EditorError;
use crate::tree::{delete_key, lookup_mut};
use bridge_editor_protocol::{PathSegment, Platform};
use bridge_editor_schema::build_default;
use log::info;
use serde_json::Value;

impl EditorSession {
    /// Platforms present under `platforms`, in document order.
    pub fn added_platforms(&self) -> Vec<Platform> {
        platform_keys(self.config.get(PLATFORMS_KEY).and_then(Value::as_object))
    }

    /// Enable `platform` with the defaults of its schema section.
    ///
    /// Returns `Ok(false)` when the platform is already present. A platform
    /// whose schema yields no defaults is stored as `{}` and is pruned by the
    /// next edit or removal unless one of its fields is set first.
    pub fn add_platform(&mut self, platform: Platform) -> Result<bool, EditorError> {
        let section = self
            .schema
            .property(PLATFORMS_KEY)?
            .ok_or_else(|| EditorError::MissingSchemaSection(PLATFORMS_KEY.to_string()))?;
        let node = section
            .property(platform.as_str())
            .ok_or_else(|| EditorError::PlatformNotInSchema {
                platform,
                section: PLATFORMS_KEY.to_string(),
            })?;
        let settings = build_default(node, &self.schema)?;

        let platforms = child_object(root_object(&mut self.config)?, PLATFORMS_KEY)?;
        if platforms.contains_key(platform.as_str()) {
            return Ok(false);
        }
        platforms.insert(platform.as_str().to_string(), settings);
        info!("enabled platform {platform}");
        Ok(true)
    }

    pub fn remove_platform(&mut self, platform: Platform) -> Result<bool, EditorError> {
        let removed = match lookup_mut(&mut self.config, &[PathSegment::from(PLATFORMS_KEY)]) {
            Some(Value::Object(platforms)) => delete_key(platforms, platform.as_str()),
            _ => false,
        };
        if removed {
            self.prune_after_removal(&format!("platform {platform}"));
            info!("disabled platform {platform}");
        }
        Ok(removed)
    }
}
