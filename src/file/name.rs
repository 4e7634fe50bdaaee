//! Filename sanitization for Filedrop.
//!
//! Both the upload and the download path resolve client-supplied names
//! through [`sanitize_filename`], so a name accepted on upload is always
//! reachable on download and nothing can address a path outside the store.

use thiserror::Error;

use super::STAGING_DIR;

/// Reasons a client-supplied filename is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// Nothing left after taking the final path component.
    #[error("filename is empty")]
    Empty,

    /// The final path component is `.`.
    #[error("filename must not be '.'")]
    CurrentDir,

    /// Some path component is `..`.
    #[error("filename must not contain '..' components")]
    Traversal,

    /// NUL or another control character.
    #[error("filename contains control characters")]
    ControlChars,

    /// Collides with the store's internal staging directory.
    #[error("filename is reserved")]
    Reserved,
}

/// Reduce a client-supplied name to a single safe path component.
///
/// Both `/` and `\` count as separators, since browsers on Windows may
/// submit the full client-side path.
pub fn sanitize_filename(raw: &str) -> Result<String, FilenameError> {
    if raw.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlChars);
    }

    if raw.split(['/', '\\']).any(|c| c == "..") {
        return Err(FilenameError::Traversal);
    }

    let last = raw.rsplit(['/', '\\']).next().unwrap_or("");
    match last {
        "" => Err(FilenameError::Empty),
        "." => Err(FilenameError::CurrentDir),
        STAGING_DIR => Err(FilenameError::Reserved),
        name => Ok(name.to_string()),
    }
}
