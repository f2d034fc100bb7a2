//! Wire ⇄ domain translation
//!
//! All tolerance for the API's loose encoding lives here. Every function is
//! pure: no I/O and no logging except for ignored QoS entries.

use hyperstore_domain::constants::{KIB, QOS_UNLIMITED};
use hyperstore_domain::{
    all_endpoints, Group, HyperStoreError, LdapConfig, QoS, Result, SecurityInfo, User,
    UserProfile, UserType,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{qos_kind, GroupWire, QosWire, SecurityInfoWire, UserWire, WireBool};
use crate::errors::InfraError;

/// Decode a JSON body into a wire struct.
///
/// # Errors
/// `HyperStoreError::Decode` if the body is not valid JSON for `W`.
pub fn decode<W: DeserializeOwned>(body: &[u8]) -> Result<W> {
    serde_json::from_slice(body).map_err(|e| InfraError::from(e).into())
}

/// Interpret a boolean-like field. Absent means `false`.
///
/// # Errors
/// `HyperStoreError::Decode` for any string other than `"true"` or `"false"`.
pub fn parse_wire_bool(field: &str, value: Option<&WireBool>) -> Result<bool> {
    match value {
        None => Ok(false),
        Some(WireBool::Bool(value)) => Ok(*value),
        Some(WireBool::Text(text)) => match text.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(HyperStoreError::decode(format!(
                "field '{field}': expected \"true\" or \"false\", got {other:?}"
            ))),
        },
    }
}

fn endpoints_or_all(list: Option<Vec<String>>) -> Vec<String> {
    match list {
        Some(list) if !list.is_empty() => list,
        _ => all_endpoints(),
    }
}

pub fn group_to_internal(wire: GroupWire) -> Result<Group> {
    let active = parse_wire_bool("active", wire.active.as_ref())?;
    let ldap_enabled = parse_wire_bool("ldapEnabled", wire.ldap_enabled.as_ref())?;

    let ldap_fields = [
        &wire.ldap_group,
        &wire.ldap_match_attribute,
        &wire.ldap_search,
        &wire.ldap_search_user_base,
        &wire.ldap_server_url,
        &wire.ldap_user_dn_template,
    ];
    let any_ldap_field = ldap_fields.iter().any(|field| field.is_some());

    let ldap = if ldap_enabled || any_ldap_field {
        let ldap = LdapConfig {
            enabled: ldap_enabled,
            group: wire.ldap_group.unwrap_or_default(),
            match_attribute: wire.ldap_match_attribute.unwrap_or_default(),
            search: wire.ldap_search.unwrap_or_default(),
            search_user_base: wire.ldap_search_user_base.unwrap_or_default(),
            server_url: wire.ldap_server_url.unwrap_or_default(),
            user_dn_template: wire.ldap_user_dn_template.unwrap_or_default(),
        };
        if ldap.enabled && !ldap.is_complete() {
            return Err(HyperStoreError::decode(format!(
                "group '{}': LDAP enabled but missing {}",
                wire.group_id,
                ldap.missing_fields().join(", ")
            )));
        }
        Some(ldap)
    } else {
        None
    };

    Ok(Group {
        group_id: wire.group_id,
        group_name: wire.group_name.unwrap_or_default(),
        active,
        ldap,
        s3_endpoints_http: endpoints_or_all(wire.s3_endpoints_http),
        s3_endpoints_https: endpoints_or_all(wire.s3_endpoints_https),
        s3_website_endpoints: endpoints_or_all(wire.s3_website_endpoints),
    })
}

pub fn group_to_wire(group: &Group) -> GroupWire {
    let ldap = group.ldap.as_ref();
    GroupWire {
        group_id: group.group_id.clone(),
        group_name: Some(group.group_name.clone()),
        active: Some(WireBool::text(group.active)),
        ldap_enabled: Some(WireBool::Bool(group.ldap_enabled())),
        ldap_group: ldap.map(|l| l.group.clone()),
        ldap_match_attribute: ldap.map(|l| l.match_attribute.clone()),
        ldap_search: ldap.map(|l| l.search.clone()),
        ldap_search_user_base: ldap.map(|l| l.search_user_base.clone()),
        ldap_server_url: ldap.map(|l| l.server_url.clone()),
        ldap_user_dn_template: ldap.map(|l| l.user_dn_template.clone()),
        s3_endpoints_http: Some(group.s3_endpoints_http.clone()),
        s3_endpoints_https: Some(group.s3_endpoints_https.clone()),
        s3_website_endpoints: Some(group.s3_website_endpoints.clone()),
    }
}

pub fn user_to_internal(wire: UserWire) -> Result<User> {
    let active = parse_wire_bool("active", wire.active.as_ref())?;
    let user_type = match wire.user_type.as_deref() {
        None | Some("") => UserType::default(),
        Some(text) => text.parse()?,
    };

    if wire.group_id.is_empty() {
        return Err(HyperStoreError::decode(format!("user '{}' has no groupId", wire.user_id)));
    }

    Ok(User {
        user_id: wire.user_id,
        group_id: wire.group_id,
        user_type,
        active,
        canonical_user_id: wire.canonical_user_id.filter(|id| !id.is_empty()),
        profile: UserProfile {
            full_name: wire.full_name,
            email_addr: wire.email_addr,
            phone: wire.phone,
            address1: wire.address1,
            address2: wire.address2,
            city: wire.city,
            state: wire.state,
            zip: wire.zip,
            country: wire.country,
            website: wire.website,
        },
    })
}

pub fn user_to_wire(user: &User) -> UserWire {
    let profile = user.profile.clone();
    UserWire {
        user_id: user.user_id.clone(),
        group_id: user.group_id.clone(),
        user_type: Some(user.user_type.to_string()),
        active: Some(WireBool::text(user.active)),
        canonical_user_id: user.canonical_user_id.clone(),
        full_name: profile.full_name,
        email_addr: profile.email_addr,
        phone: profile.phone,
        address1: profile.address1,
        address2: profile.address2,
        city: profile.city,
        state: profile.state,
        zip: profile.zip,
        country: profile.country,
        website: profile.website,
    }
}

pub fn credentials_to_internal(wire: SecurityInfoWire) -> SecurityInfo {
    SecurityInfo {
        access_key: wire.access_key,
        secret_key: wire.secret_key.into(),
        created_at: wire.create_date,
    }
}

/// Fold the hard-level (`_LH`) entries back into [`QoS`].
///
/// # Errors
/// `HyperStoreError::Decode` for negative values other than `-1` or byte
/// quantities that overflow `u64`.
pub fn qos_to_internal(wire: QosWire) -> Result<QoS> {
    let mut qos = QoS::unlimited();

    for entry in wire.qos_limit_list.unwrap_or_default() {
        let (field, unit) = match entry.kind.as_str() {
            qos_kind::STORAGE_QUOTA_KBYTES => (&mut qos.storage_quota_bytes, KIB),
            qos_kind::STORAGE_QUOTA_COUNT => (&mut qos.storage_quota_count, 1),
            qos_kind::REQUEST_RATE => (&mut qos.request_rate, 1),
            qos_kind::DATA_KBYTES_IN => (&mut qos.data_rate_inbound_bytes, KIB),
            qos_kind::DATA_KBYTES_OUT => (&mut qos.data_rate_outbound_bytes, KIB),
            other => {
                debug!(kind = other, "ignoring QoS entry");
                continue;
            }
        };
        *field = qos_value(&entry.kind, entry.value, unit)?;
    }

    Ok(qos)
}

fn qos_value(kind: &str, value: i64, unit: u64) -> Result<Option<u64>> {
    if value == QOS_UNLIMITED {
        return Ok(None);
    }
    let value = u64::try_from(value)
        .map_err(|_| HyperStoreError::decode(format!("{kind}: negative limit {value}")))?;
    value
        .checked_mul(unit)
        .map(Some)
        .ok_or_else(|| HyperStoreError::decode(format!("{kind}: limit {value} overflows")))
}
