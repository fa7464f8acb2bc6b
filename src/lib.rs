//! # Cloud Files client SDK
//!
//! A client for Cloud Files / Swift-compatible object storage over HTTP:
//! container and object CRUD, metadata, CDN publication and token
//! authentication.
//!
//! ## Features
//!
//! - **Typed errors**: not-found, conflict and name-validation failures are
//!   distinct variants, not status codes
//! - **Local validation**: invalid container/object names are rejected
//!   before any network call
//! - **Streaming**: chunked upload/download with per-chunk progress
//!   callbacks and background transfer handles
//! - **Transparent re-auth**: an expired token is refreshed once and the
//!   request retried
//!
//! ## Example
//!
//! ```rust,ignore
//! use cloudfiles::{CloudFilesClient, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CloudFilesClient::new(Config::new("username", "api-key"))?;
//!
//!     client.create_container("photos").await?;
//!
//!     let etag = client
//!         .put_object("photos", "summer/cat.jpg", std::fs::read("cat.jpg")?)
//!         .await?;
//!     println!("uploaded, etag = {etag}");
//!
//!     let (data, info) = client.get_object("photos", "summer/cat.jpg").await?;
//!     println!("downloaded {} bytes of {:?}", data.len(), info.content_type);
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod transfer;
mod types;
mod validation;

pub use auth::Session;
pub use client::{CloudFilesClient, DIRECTORY_CONTENT_TYPE};
pub use config::{Config, DEFAULT_AUTH_ENDPOINT};
pub use error::{Error, Result};
pub use transfer::{
    download_in_background, upload_in_background, ProgressCallback, TransferProgress, CHUNK_SIZE,
};
pub use types::*;
pub use validation::{MAX_CONTAINER_NAME_LENGTH, MAX_OBJECT_NAME_LENGTH};
