//! Group types
//!
//! A group is the tenant boundary: it owns the namespace in which user ids are
//! unique and is the authority every [`User`](crate::User) refers to.

use crate::constants::ALL_ENDPOINTS;
use crate::errors::{HyperStoreError, Result};

/// The default endpoint-capability list: every endpoint allowed.
pub fn all_endpoints() -> Vec<String> {
    vec![ALL_ENDPOINTS.to_string()]
}

/// A tenant group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Unique, immutable identifier.
    pub group_id: String,
    pub group_name: String,
    pub active: bool,
    /// LDAP integration, `None` when never configured.
    pub ldap: Option<LdapConfig>,
    /// Allowed S3 HTTP endpoints. Never empty; `["ALL"]` allows all.
    pub s3_endpoints_http: Vec<String>,
    /// Allowed S3 HTTPS endpoints. Never empty; `["ALL"]` allows all.
    pub s3_endpoints_https: Vec<String>,
    /// Allowed S3 website endpoints. Never empty; `["ALL"]` allows all.
    pub s3_website_endpoints: Vec<String>,
}

impl Group {
    /// An active group with no LDAP integration and unrestricted endpoints.
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: String::new(),
            active: true,
            ldap: None,
            s3_endpoints_http: all_endpoints(),
            s3_endpoints_https: all_endpoints(),
            s3_website_endpoints: all_endpoints(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    #[must_use]
    pub fn with_ldap(mut self, ldap: LdapConfig) -> Self {
        self.ldap = Some(ldap);
        self
    }

    /// Whether LDAP authentication is switched on for this group.
    pub fn ldap_enabled(&self) -> bool {
        self.ldap.as_ref().is_some_and(|ldap| ldap.enabled)
    }

    /// Check the group before it is written.
    ///
    /// # Errors
    /// `InvalidInput` for an empty id or enabled LDAP with missing settings.
    pub fn validate(&self) -> Result<()> {
        if self.group_id.is_empty() {
            return Err(HyperStoreError::invalid_input("group id is empty"));
        }
        if let Some(ldap) = self.ldap.as_ref().filter(|ldap| ldap.enabled) {
            let missing = ldap.missing_fields();
            if !missing.is_empty() {
                return Err(HyperStoreError::invalid_input(format!(
                    "group {}: LDAP enabled but missing {}",
                    self.group_id,
                    missing.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// LDAP integration settings of a group
///
/// When `enabled` is false the remaining fields are informational: the server
/// keeps them after LDAP is switched off, so they are carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LdapConfig {
    pub enabled: bool,
    pub group: String,
    pub match_attribute: String,
    pub search: String,
    pub search_user_base: String,
    pub server_url: String,
    pub user_dn_template: String,
}

impl LdapConfig {
    /// Names (wire spelling) of the settings that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("ldapGroup", &self.group),
            ("ldapMatchAttribute", &self.match_attribute),
            ("ldapSearch", &self.search),
            ("ldapSearchUserBase", &self.search_user_base),
            ("ldapServerURL", &self.server_url),
            ("ldapUserDNTemplate", &self.user_dn_template),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Enabled LDAP needs every setting populated.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_allows_all_endpoints() {
        let group = Group::new("QA");

        assert_eq!(group.group_id, "QA");
        assert!(group.active);
        assert!(!group.ldap_enabled());
        assert_eq!(group.s3_endpoints_http, vec!["ALL".to_string()]);
        assert_eq!(group.s3_endpoints_https, vec!["ALL".to_string()]);
        assert_eq!(group.s3_website_endpoints, vec!["ALL".to_string()]);
    }

    #[test]
    fn ldap_missing_fields_lists_empty_settings() {
        let ldap = LdapConfig {
            enabled: true,
            group: "admins".into(),
            server_url: "ldaps://ldap.example.com".into(),
            ..Default::default()
        };

        assert_eq!(
            ldap.missing_fields(),
            vec!["ldapMatchAttribute", "ldapSearch", "ldapSearchUserBase", "ldapUserDNTemplate"]
        );
        assert!(!ldap.is_complete());
    }

    #[test]
    fn validate_rejects_incomplete_enabled_ldap() {
        let group = Group::new("QA")
            .with_ldap(LdapConfig { enabled: true, group: "admins".into(), ..Default::default() });

        let err = group.validate().unwrap_err();

        assert_eq!(err.category(), crate::ErrorCategory::Validation);
        assert!(err.to_string().contains("ldapServerURL"));
    }

    #[test]
    fn validate_accepts_disabled_partial_ldap() {
        let group = Group::new("QA")
            .with_ldap(LdapConfig { group: "admins".into(), ..Default::default() });

        assert_eq!(group.validate(), Ok(()));
        assert!(Group::new("").validate().is_err());
    }
}
