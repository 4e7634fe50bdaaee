//! HTTP API module for Filedrop.
//!
//! This module exposes the upload, listing and download endpoints plus
//! the browser front end that drives them.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
