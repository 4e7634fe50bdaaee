//! Uploaded file records.

use std::fs::Metadata;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// URL prefix under which stored files are downloadable.
pub const DOWNLOAD_PREFIX: &str = "/download/";

/// A listing entry, derived live from a stat of the stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Directory entry name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub mod_time: DateTime<Utc>,
    /// Link that downloads this file.
    pub download_url: String,
}

impl FileRecord {
    /// Build a record from a directory entry name and its metadata.
    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> Self {
        let name = name.into();
        // Platforms without mtime support report the epoch.
        let mod_time = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_default();

        Self {
            download_url: download_url(&name),
            size: metadata.len(),
            mod_time,
            name,
        }
    }
}

/// Download link for a stored filename.
pub fn download_url(name: &str) -> String {
    format!("{DOWNLOAD_PREFIX}{}", urlencoding::encode(name))
}
