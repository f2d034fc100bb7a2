//! Admin API client
//!
//! - [`wire`]: payloads exactly as the API sends and accepts them
//! - [`translator`]: wire ⇄ domain conversion, the only place loose encodings
//!   are tolerated
//! - [`errors`]: status and body classification
//! - [`client`]: [`HyperStoreClient`], one method per operation

pub mod client;
pub mod errors;
pub mod translator;
pub mod wire;

pub use client::HyperStoreClient;
pub use errors::{check_response, map_error, Lookup};
