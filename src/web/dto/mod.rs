//! Data transfer objects for the HTTP API.

pub mod response;

pub use response::UploadResponse;
