//! Response DTOs for the HTTP API.

use serde::Serialize;
use utoipa::ToSchema;

/// Message returned with every successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully";

/// Upload result.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
    /// Sanitized name the file was stored under.
    pub filename: String,
    /// Number of bytes stored.
    pub size: u64,
    /// Human-readable status.
    pub message: String,
}

impl UploadResponse {
    /// Create a success response for a stored file.
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            size,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        }
    }
}
