//! Domain constants

/// Sentinel endpoint-capability entry meaning "all endpoints allowed".
pub const ALL_ENDPOINTS: &str = "ALL";

/// Default page window for list operations.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Warning level of every QoS metric, as a percentage of its hard level.
///
/// Fixed policy for now; a candidate for configuration later.
pub const WARNING_LEVEL_PERCENT: u64 = 75;

/// Wire value the API uses for "no limit" on a QoS metric.
pub const QOS_UNLIMITED: i64 = -1;

/// `userId` the API uses to address a group's default QoS limits.
pub const GROUP_DEFAULT_USER_ID: &str = "*";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bytes per kibibyte.
pub const KIB: u64 = 1024;

/// Bytes per mebibyte.
pub const MIB: u64 = 1024 * KIB;

/// Bytes per gibibyte.
pub const GIB: u64 = 1024 * MIB;
