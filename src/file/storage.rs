//! File storage for Filedrop.
//!
//! The store is a flat directory of uploaded files. There is no sidecar
//! metadata; listings are recomputed from `stat` on every call.
//!
//! Uploads are first written to a uniquely named file in the staging
//! directory and renamed into place on completion:
//! ```text
//! {root}/
//! ├── .staging/
//! │   └── 5f0c…-…-….part      (in-flight upload)
//! ├── report.txt
//! └── photo.jpg
//! ```
//! A download therefore sees either the previous file or the complete new
//! one. Concurrent uploads of the same name race on the rename; the last
//! rename wins.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::{sanitize_filename, FileRecord, STAGING_DIR};
use crate::{FiledropError, Result};

/// Filesystem-backed store of uploaded files.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding the uploaded files.
    root: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `root`.
    ///
    /// The root and its staging directory are created if missing, and any
    /// staging files left behind by an interrupted process are removed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(STAGING_DIR)).await?;

        let store = Self { root };
        let removed = store.cleanup_staging().await?;
        if removed > 0 {
            tracing::info!(removed, "Removed stale staging files");
        }

        Ok(store)
    }

    /// Get the root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Sanitize a client-supplied name and resolve it inside the root.
    fn resolve(&self, raw_name: &str) -> Result<(String, PathBuf)> {
        let name = sanitize_filename(raw_name)?;
        let path = self.root.join(&name);
        Ok((name, path))
    }

    /// List the files directly under the root, skipping directories.
    ///
    /// Entries come back in enumeration order. An entry whose metadata
    /// cannot be read is skipped; failing to enumerate the directory
    /// itself is an error and yields no partial result.
    pub async fn list(&self) -> Result<Vec<FileRecord>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Failed to stat file, skipping");
                    continue;
                }
            };

            if metadata.is_dir() {
                continue;
            }

            records.push(FileRecord::from_metadata(name, &metadata));
        }

        Ok(records)
    }

    /// Start an upload for the given client-supplied name.
    ///
    /// Nothing is visible under the final name until
    /// [`PendingUpload::commit`] succeeds.
    pub async fn begin_upload(&self, raw_name: &str) -> Result<PendingUpload> {
        let (name, dest_path) = self.resolve(raw_name)?;
        let temp_path = self
            .staging_dir()
            .join(format!("{}.part", Uuid::new_v4()));

        let file = File::create(&temp_path).await?;

        Ok(PendingUpload {
            name,
            file,
            temp_path: Some(temp_path),
            dest_path,
            written: 0,
        })
    }

    /// Open a stored file for reading.
    ///
    /// Returns [`FiledropError::NotFound`] if no regular file of that name exists.
    pub async fn open_file(&self, raw_name: &str) -> Result<StoredFile> {
        let (name, path) = self.resolve(raw_name)?;

        let not_found = || FiledropError::NotFound(format!("File: {name}"));

        let file = match File::open(&path).await {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        // Taken from the handle so a rename onto `path` cannot skew it.
        let metadata = file.metadata().await?;
        if metadata.is_dir() {
            return Err(not_found());
        }

        Ok(StoredFile {
            name,
            file,
            metadata,
        })
    }

    /// Remove every file in the staging directory.
    ///
    /// Only safe while no upload is in flight, i.e. at startup.
    pub async fn cleanup_staging(&self) -> Result<usize> {
        let mut removed = 0;
        let mut entries = fs::read_dir(self.staging_dir()).await?;

        while let Some(entry) = entries.next_entry().await? {
            if fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

/// A stored file opened for download.
#[derive(Debug)]
pub struct StoredFile {
    /// Sanitized name.
    pub name: String,
    /// Open handle positioned at the start.
    pub file: File,
    /// Metadata of the opened file.
    pub metadata: Metadata,
}

/// An upload being written to the staging directory.
///
/// Dropping it without calling [`commit`](Self::commit) or
/// [`abort`](Self::abort) removes the staging file.
#[derive(Debug)]
pub struct PendingUpload {
    name: String,
    file: File,
    temp_path: Option<PathBuf>,
    dest_path: PathBuf,
    written: u64,
}

impl PendingUpload {
    /// Sanitized destination name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append a chunk of the upload.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file.write_all(chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flush to disk and move the file into place, replacing any existing
    /// file of the same name. Returns the number of bytes stored.
    pub async fn commit(mut self) -> Result<u64> {
        let Some(temp_path) = self.temp_path.take() else {
            return Ok(self.written);
        };

        let result: io::Result<()> = async {
            self.file.flush().await?;
            self.file.sync_all().await?;
            fs::rename(&temp_path, &self.dest_path).await
        }
        .await;

        match result {
            Ok(()) => Ok(self.written),
            Err(e) => {
                remove_staging_file(&temp_path).await;
                Err(e.into())
            }
        }
    }

    /// Discard the upload. Failure to remove the staging file is logged only.
    pub async fn abort(mut self) {
        if let Some(temp_path) = self.temp_path.take() {
            remove_staging_file(&temp_path).await;
        }
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if let Some(temp_path) = self.temp_path.take() {
            // Drop cannot await; a blocking unlink of one file is acceptable here.
            let _ = std::fs::remove_file(temp_path);
        }
    }
}

async fn remove_staging_file(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove staging file");
    }
}
