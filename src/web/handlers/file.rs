//! File handlers for the HTTP API.

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::file::FileRecord;
use crate::web::dto::UploadResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::FiledropError;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Plain ASCII names are quoted as-is. Anything else gets an ASCII
/// fallback with quotes and backslashes replaced, plus an RFC 5987
/// `filename*` parameter carrying the exact UTF-8 name.
fn content_disposition_header(filename: &str) -> String {
    // For ASCII-only filenames, use simple format
    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    // ASCII fallback for the basic filename parameter
    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control()) // Remove control characters (CR, LF, etc.)
        .map(|c| match c {
            '"' | '\\' => '_',         // Replace quotes and backslashes
            c if !c.is_ascii() => '_', // Replace non-ASCII characters
            _ => c,
        })
        .collect();

    // RFC 5987 filename* parameter with UTF-8 encoding
    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// POST /upload - Upload a file.
///
/// Request body: multipart/form-data with a `file` part. The part is
/// streamed to disk chunk by chunk; other fields are skipped.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Malformed form, missing file part, or invalid filename"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Upload could not be read or written")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::error!("Rejected multipart request: {}", e);
        ApiError::bad_request("Failed to parse multipart form")
    })?;

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Failed to parse multipart form")
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let raw_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("Failed to get file from form"))?;

        let mut pending = state
            .store
            .begin_upload(&raw_name)
            .await
            .map_err(|e| match e {
                FiledropError::InvalidFilename(_) => ApiError::from(e),
                e => {
                    tracing::error!("Failed to create destination file: {}", e);
                    ApiError::internal("Failed to create destination file")
                }
            })?;

        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(filename = pending.name(), "Failed to read upload: {}", e);
                    pending.abort().await;
                    return Err(ApiError::internal("Failed to read file"));
                }
            };

            if let Err(e) = pending.write_chunk(&chunk).await {
                tracing::error!(filename = pending.name(), "Failed to write upload: {}", e);
                pending.abort().await;
                return Err(ApiError::internal("Failed to save file"));
            }
        }

        let filename = pending.name().to_string();
        let size = pending.commit().await.map_err(|e| {
            tracing::error!(filename = %filename, "Failed to save file: {}", e);
            ApiError::internal("Failed to save file")
        })?;

        tracing::info!(filename = %filename, size, "File uploaded successfully");

        return Ok(Json(UploadResponse::new(filename, size)));
    }

    Err(ApiError::bad_request("Failed to get file from form"))
}

/// GET /files - List uploaded files.
///
/// Order is directory enumeration order; clients sort as they see fit.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "Uploaded files", body = Vec<FileRecord>),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Upload directory unreadable")
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileRecord>>, ApiError> {
    let records = state.store.list().await.map_err(|e| {
        tracing::error!("Failed to read upload directory: {}", e);
        ApiError::internal("Failed to read upload directory")
    })?;

    Ok(Json(records))
}

/// Optional path extractor for `download_file`; aliased so `utoipa::path`
/// does not try to infer params from the `Option<Path<_>>` argument.
type OptionalPath = Option<Path<String>>;

/// GET /download/{filename} - Download a file.
///
/// Always served as `application/octet-stream` with an attachment
/// disposition, whatever the file's actual type.
#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "File not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    filename: OptionalPath,
) -> Result<Response<Body>, ApiError> {
    // `/download/` carries no name; the sanitizer rejects it as empty.
    let filename = filename.map(|Path(name)| name).unwrap_or_default();
    let stored = state.store.open_file(&filename).await?;
    let size = stored.metadata.len();

    tracing::debug!(filename = %stored.name, size, "Serving download");

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&stored.name),
        )
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(ReaderStream::new(stored.file)))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}
