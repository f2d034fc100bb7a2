//! Domain types and models
//!
//! Every value here is freshly materialized from an API response and owned by
//! the caller; nothing is cached or persisted by the client.

pub mod credentials;
pub mod group;
pub mod paging;
pub mod qos;
pub mod user;

pub use credentials::{Secret, SecurityInfo};
pub use group::{all_endpoints, Group, LdapConfig};
pub use paging::ListLimit;
pub use qos::{QoS, QosTarget};
pub use user::{User, UserListFilter, UserProfile, UserRef, UserStatus, UserType};
