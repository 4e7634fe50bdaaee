//! File management module for Filedrop.
//!
//! This module provides the filesystem store behind the HTTP API:
//! - Filename sanitization shared by upload and download
//! - Listing records derived from `stat`
//! - Staged uploads that are renamed into place atomically

mod name;
mod record;
mod storage;

pub use name::{sanitize_filename, FilenameError};
pub use record::{download_url, FileRecord, DOWNLOAD_PREFIX};
pub use storage::{FileStore, PendingUpload, StoredFile};

/// Name of the directory under the store root that holds in-flight uploads.
pub const STAGING_DIR: &str = ".staging";
