//! User types
//!
//! A user is keyed by the pair `(group_id, user_id)`; the group is a foreign
//! reference, not ownership.

use crate::errors::{HyperStoreError, Result};
use crate::impl_wire_name_conversions;

/// Role of a user within the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserType {
    #[default]
    User,
    GroupAdmin,
    SystemAdmin,
}

impl_wire_name_conversions!(UserType {
    User => "User",
    GroupAdmin => "GroupAdmin",
    SystemAdmin => "SystemAdmin",
});

/// Status filter for user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    All,
    Active,
    Inactive,
}

impl_wire_name_conversions!(UserStatus {
    All => "all",
    Active => "active",
    Inactive => "inactive",
});

/// Identity of a user: the only fields needed to address it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRef {
    pub group_id: String,
    pub user_id: String,
}

impl UserRef {
    pub fn new(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self { group_id: group_id.into(), user_id: user_id.into() }
    }
}

impl std::fmt::Display for UserRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group_id, self.user_id)
    }
}

/// Optional contact details of a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub email_addr: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

/// A user of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub group_id: String,
    pub user_type: UserType,
    pub active: bool,
    /// Server-assigned S3 canonical id; absent until the user exists.
    pub canonical_user_id: Option<String>,
    pub profile: UserProfile,
}

impl User {
    /// An active regular user with an empty profile.
    pub fn new(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            group_id: group_id.into(),
            user_type: UserType::User,
            active: true,
            canonical_user_id: None,
            profile: UserProfile::default(),
        }
    }

    pub fn key(&self) -> UserRef {
        UserRef::new(self.group_id.clone(), self.user_id.clone())
    }

    /// A user cannot exist outside a group, nor without an id.
    ///
    /// # Errors
    /// `InvalidInput` naming the empty key part.
    pub fn validate(&self) -> Result<()> {
        if self.group_id.is_empty() {
            return Err(HyperStoreError::invalid_input(format!(
                "user {} has no group id",
                self.user_id
            )));
        }
        if self.user_id.is_empty() {
            return Err(HyperStoreError::invalid_input(format!(
                "user in group {} has no user id",
                self.group_id
            )));
        }
        Ok(())
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        user.key()
    }
}

/// Filter applied to user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserListFilter {
    /// `None` lists every user type.
    pub user_type: Option<UserType>,
    pub user_status: UserStatus,
}

impl UserListFilter {
    /// `userType` query value.
    pub fn user_type_param(&self) -> &'static str {
        self.user_type.as_ref().map_or("all", UserType::as_str)
    }

    /// `userStatus` query value.
    pub fn user_status_param(&self) -> &'static str {
        self.user_status.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_lists_everything() {
        let filter = UserListFilter::default();
        assert_eq!(filter.user_type_param(), "all");
        assert_eq!(filter.user_status_param(), "all");
    }

    #[test]
    fn filter_renders_wire_names() {
        let filter = UserListFilter {
            user_type: Some(UserType::GroupAdmin),
            user_status: UserStatus::Inactive,
        };
        assert_eq!(filter.user_type_param(), "GroupAdmin");
        assert_eq!(filter.user_status_param(), "inactive");
    }

    #[test]
    fn user_type_parses_any_case() {
        assert_eq!("systemadmin".parse::<UserType>().unwrap(), UserType::SystemAdmin);
        assert!("root".parse::<UserType>().is_err());
    }

    #[test]
    fn user_key_is_group_and_user_id() {
        let user = User::new("QA", "alice");
        assert_eq!(user.key(), UserRef::new("QA", "alice"));
        assert_eq!(UserRef::from(&user).to_string(), "QA/alice");
    }

    #[test]
    fn validate_requires_both_key_parts() {
        assert_eq!(User::new("QA", "alice").validate(), Ok(()));
        let err = User::new("", "alice").validate().unwrap_err();
        assert!(err.to_string().contains("no group id"));
        assert!(User::new("QA", "").validate().is_err());
    }
}
