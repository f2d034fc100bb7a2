//! # HyperStore Domain
//!
//! Strict domain types for the HyperStore administration client.
//!
//! This crate contains:
//! - Entity types (Group, User, SecurityInfo, QoS)
//! - The domain error taxonomy and Result alias
//! - Client configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other HyperStore crates
//! - No wire-format concerns: loosely-typed payloads are reconciled in
//!   `hyperstore-infra` before they reach these types

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
