//! Filedrop - a small HTTP file upload and download server.
//!
//! Files are uploaded through a multipart form, kept as-is in a flat
//! directory, and listed and downloaded by name.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{FiledropError, Result};
pub use file::{sanitize_filename, FileRecord, FileStore, FilenameError};
pub use web::WebServer;
