//! Wire model
//!
//! These structs mirror the admin API's JSON verbatim, quirks included:
//! booleans that may arrive as strings, optional lists, flat LDAP fields.
//! Nothing here is validated; see [`super::translator`] for the rules.

use serde::{Deserialize, Serialize};

/// A boolean the API may send natively or as `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireBool {
    Bool(bool),
    Text(String),
}

impl WireBool {
    /// The quoted form the API emits for `active`.
    pub fn text(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWire {
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<WireBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_enabled: Option<WireBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_match_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_search_user_base: Option<String>,
    #[serde(rename = "ldapServerURL", default, skip_serializing_if = "Option::is_none")]
    pub ldap_server_url: Option<String>,
    #[serde(rename = "ldapUserDNTemplate", default, skip_serializing_if = "Option::is_none")]
    pub ldap_user_dn_template: Option<String>,
    #[serde(rename = "s3endpointshttp", default, skip_serializing_if = "Option::is_none")]
    pub s3_endpoints_http: Option<Vec<String>>,
    #[serde(rename = "s3endpointshttps", default, skip_serializing_if = "Option::is_none")]
    pub s3_endpoints_https: Option<Vec<String>>,
    #[serde(rename = "s3websiteendpoints", default, skip_serializing_if = "Option::is_none")]
    pub s3_website_endpoints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    pub user_id: String,
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<WireBool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfoWire {
    pub access_key: String,
    pub secret_key: String,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<i64>,
}

/// QoS limits as returned by `GET /qos/limits`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QosWire {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub qos_limit_list: Option<Vec<QosLimitWire>>,
}

/// One limit entry, e.g. `{"type": "REQUEST_RATE_LH", "value": 200}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosLimitWire {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i64,
}

/// Hard-level QoS kinds. `_LW` entries carry the derived warning level.
pub mod qos_kind {
    pub const STORAGE_QUOTA_KBYTES: &str = "STORAGE_QUOTA_KBYTES_LH";
    pub const STORAGE_QUOTA_COUNT: &str = "STORAGE_QUOTA_COUNT_LH";
    pub const REQUEST_RATE: &str = "REQUEST_RATE_LH";
    pub const DATA_KBYTES_IN: &str = "DATAKBYTES_IN_LH";
    pub const DATA_KBYTES_OUT: &str = "DATAKBYTES_OUT_LH";
}

/// Error body the API sends with 4xx responses. Field names vary by endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayloadWire {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorPayloadWire {
    /// First non-empty message field.
    pub fn message(&self) -> Option<&str> {
        [&self.message, &self.error, &self.reason]
            .into_iter()
            .flatten()
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
    }
}
