//! # HyperStore Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed [`Transport`](hyperstore_core::Transport)
//! - The wire model, translator and error mapper for the admin API
//! - [`HyperStoreClient`], the operation dispatcher
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `hyperstore-core`
//! - Converts every external error into `HyperStoreError` at this edge
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::HyperStoreClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, ReqwestTransport};
