//! Quality-of-service limit types

use crate::constants::GROUP_DEFAULT_USER_ID;
use crate::types::user::UserRef;

/// Hard limits for one user or group; `None` means unlimited.
///
/// Warning levels are not part of this type: they are derived from the hard
/// levels when the limits are sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QoS {
    /// Stored bytes.
    pub storage_quota_bytes: Option<u64>,
    /// Stored object count.
    pub storage_quota_count: Option<u64>,
    /// Requests per minute.
    pub request_rate: Option<u64>,
    /// Inbound bytes per minute.
    pub data_rate_inbound_bytes: Option<u64>,
    /// Outbound bytes per minute.
    pub data_rate_outbound_bytes: Option<u64>,
}

impl QoS {
    /// No limit on any metric.
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// Who a set of QoS limits applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QosTarget {
    /// A single user.
    User(UserRef),
    /// The default limits of every user in a group.
    Group(String),
}

impl QosTarget {
    /// `userId` query value.
    pub fn user_id(&self) -> &str {
        match self {
            Self::User(user) => &user.user_id,
            Self::Group(_) => GROUP_DEFAULT_USER_ID,
        }
    }

    /// `groupId` query value.
    pub fn group_id(&self) -> &str {
        match self {
            Self::User(user) => &user.group_id,
            Self::Group(group_id) => group_id,
        }
    }
}

impl std::fmt::Display for QosTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group_id(), self.user_id())
    }
}

impl From<UserRef> for QosTarget {
    fn from(user: UserRef) -> Self {
        Self::User(user)
    }
}
