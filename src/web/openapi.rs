//! OpenAPI description of the HTTP API.

use utoipa::OpenApi;

use super::dto::UploadResponse;
use super::handlers::{file, page};
use crate::file::FileRecord;

/// OpenAPI document for the four endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Filedrop", description = "File upload and download API"),
    paths(
        page::index_page,
        file::upload_file,
        file::list_files,
        file::download_file
    ),
    components(schemas(FileRecord, UploadResponse)),
    tags(
        (name = "files", description = "Upload, list and download files"),
        (name = "page", description = "Browser front end")
    )
)]
pub struct ApiDoc;
