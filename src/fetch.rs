//! Document Fetching
//!
//! Resolves a workflow location to document text: remote `http(s)` URLs
//! are downloaded, everything else is read as a local file path. The core
//! classifier never performs I/O; this is the only fetch point.

use log::debug;

use crate::error::{CwlInputsError, Result};

/// Returns true if the location is a remote URL.
pub fn is_remote_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches a CWL document from a file path or a remote URL.
pub async fn fetch_document(location: &str) -> Result<String> {
    if is_remote_url(location) {
        debug!("Downloading workflow document: {}", location);
        let response = reqwest::get(location).await?;
        if !response.status().is_success() {
            return Err(CwlInputsError::Download(location.to_string()));
        }
        Ok(response.text().await?)
    } else {
        debug!("Reading workflow document: {}", location);
        tokio::fs::read_to_string(location).await.map_err(|e| {
            CwlInputsError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read workflow file '{}': {}. Check that the file exists and is readable.",
                    location, e
                ),
            ))
        })
    }
}
