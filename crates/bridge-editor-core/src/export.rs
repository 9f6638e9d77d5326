//! Export artifact handed to the download collaborator.

use crate::EditorError;
use crate::projector::project;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the exported configuration.
pub const EXPORT_FILE_NAME: &str = "playgama-bridge-config.json";
/// Media type of the exported configuration.
pub const EXPORT_MEDIA_TYPE: &str = "application/json";

/// A rendered, downloadable configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub media_type: &'static str,
    /// Projected configuration, pretty-printed with two-space indentation.
    pub contents: String,
}

impl ExportArtifact {
    /// Project `config` and render it.
    pub fn from_config(config: &Value) -> Result<Self, EditorError> {
        let contents =
            serde_json::to_string_pretty(&project(config)).map_err(EditorError::Serialize)?;
        Ok(Self {
            file_name: EXPORT_FILE_NAME,
            media_type: EXPORT_MEDIA_TYPE,
            contents,
        })
    }

    /// Write the artifact into `dir` under its fixed file name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, EditorError> {
        let path = dir.as_ref().join(self.file_name);
        fs::write(&path, &self.contents)?;
        info!(
            "exported config (path={}, bytes={})",
            path.display(),
            self.contents.len()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{EXPORT_FILE_NAME, ExportArtifact};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn renders_projection_with_two_space_indent() {
        let config = json!({ "sendAnalyticsEvents": true, "disableLoadingLogo": false });
        let artifact = ExportArtifact::from_config(&config).expect("artifact");
        assert_eq!(artifact.media_type, "application/json");
        assert_eq!(artifact.contents, "{\n  \"sendAnalyticsEvents\": true\n}");
    }

    #[test]
    fn writes_under_fixed_file_name() {
        let temp = tempdir().expect("tempdir");
        let artifact = ExportArtifact::from_config(&json!({ "backfillId": "abc" })).expect("artifact");
        let path = artifact.write_to(temp.path()).expect("write");
        assert_eq!(path, temp.path().join(EXPORT_FILE_NAME));
        let written = std::fs::read_to_string(path).expect("read");
        assert_eq!(written, artifact.contents);
    }
}
