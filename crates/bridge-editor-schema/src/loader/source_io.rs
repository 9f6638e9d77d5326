//! IO helpers for reading the schema from disk or HTTP.

use crate::SchemaError;
use log::debug;
use std::fs;
use std::path::Path;

/// Read a schema file into memory.
pub(super) fn read_file(path: &Path) -> Result<String, SchemaError> {
    debug!("reading schema file (path={})", path.display());
    Ok(fs::read_to_string(path)?)
}

/// Fetch the schema body, rejecting non-success statuses.
pub(super) async fn fetch_url(url: &str) -> Result<String, SchemaError> {
    debug!("fetching schema (url={url})");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SchemaError::HttpStatus(status.as_u16()));
    }
    let body = response.text().await?;
    debug!("schema fetched (status={}, len={})", status.as_u16(), body.len());
    Ok(body)
}
