//! # HyperStore Core
//!
//! Transport-independent logic of the administration client.
//!
//! This crate contains:
//! - The transport port (trait) the dispatcher sends requests through
//! - The pagination engine for offset/limit listings
//! - The QoS limit policy (warning levels, query flattening)
//!
//! ## Architecture Principles
//! - Only depends on `hyperstore-domain`
//! - No HTTP client or wire-format code
//! - All I/O via the [`Transport`] trait

pub mod pagination;
pub mod ports;
pub mod qos;

pub use pagination::{collect_pages, PageCursor, PageRequest};
pub use ports::{ApiRequest, ApiResponse, HttpMethod, Transport};
pub use qos::{qos_query_map, warning_level};
