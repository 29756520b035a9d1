//! Remote manifest retrieval for mediawall.
//!
//! This crate provides the blocking HTTP fetch of the gallery manifest
//! document (`ManifestFetcher`) and configuration for the remote endpoint
//! (`RemoteConfig`): manifest URL, optional image base URL for legacy
//! path-array manifests, and the cache-busting policy.

pub mod config;
pub mod fetch;

pub use config::RemoteConfig;
pub use fetch::ManifestFetcher;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("remote I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("manifest error: {0}")]
    Parse(#[from] mediawall_schema::ManifestError),
    #[error("remote config error: {0}")]
    Config(String),
}
