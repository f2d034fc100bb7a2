//! QoS limit policy
//!
//! The API stores a hard and a warning level per metric. The client only lets
//! callers choose hard levels; warning levels are always
//! [`WARNING_LEVEL_PERCENT`] of the hard level, in the same unit.

use std::collections::BTreeMap;

use hyperstore_domain::constants::{KIB, QOS_UNLIMITED, WARNING_LEVEL_PERCENT};
use hyperstore_domain::{QoS, QosTarget};

/// Warning level for a hard level (truncating).
pub fn warning_level(hard: u64) -> u64 {
    let scaled = u128::from(hard) * u128::from(WARNING_LEVEL_PERCENT) / 100;
    // never larger than `hard`
    u64::try_from(scaled).unwrap_or(hard)
}

/// Flatten limits into the query parameters of a QoS update.
///
/// Byte quantities are sent in KiB (truncating). Unlimited metrics are sent as
/// `-1` for both levels.
pub fn qos_query_map(target: &QosTarget, qos: &QoS) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("userId".to_string(), target.user_id().to_string());
    params.insert("groupId".to_string(), target.group_id().to_string());

    let to_kib = |bytes: u64| bytes / KIB;
    let metrics = [
        ("StorageQuotaKBytes", qos.storage_quota_bytes.map(to_kib)),
        ("StorageQuotaCount", qos.storage_quota_count),
        ("RequestRate", qos.request_rate),
        ("DataKBytesIn", qos.data_rate_inbound_bytes.map(to_kib)),
        ("DataKBytesOut", qos.data_rate_outbound_bytes.map(to_kib)),
    ];

    for (name, hard) in metrics {
        let (hard, warning) = match hard {
            Some(hard) => (hard.to_string(), warning_level(hard).to_string()),
            None => (QOS_UNLIMITED.to_string(), QOS_UNLIMITED.to_string()),
        };
        params.insert(format!("hl{name}"), hard);
        params.insert(format!("wl{name}"), warning);
    }

    params
}

#[cfg(test)]
mod tests {
    use hyperstore_domain::constants::GIB;
    use hyperstore_domain::UserRef;

    use super::*;

    fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn warning_level_is_three_quarters_truncated() {
        assert_eq!(warning_level(1000), 750);
        assert_eq!(warning_level(200), 150);
        assert_eq!(warning_level(1_048_576), 786_432);
        assert_eq!(warning_level(3), 2);
        assert_eq!(warning_level(0), 0);
        assert_eq!(warning_level(u64::MAX), u64::MAX / 4 * 3 + 2);
    }

    #[test]
    fn query_map_for_user_limits() {
        let target = QosTarget::User(UserRef::new("1", "1"));
        let qos = QoS {
            storage_quota_bytes: Some(GIB),
            storage_quota_count: Some(1000),
            request_rate: Some(200),
            data_rate_inbound_bytes: Some(GIB),
            data_rate_outbound_bytes: Some(GIB),
        };

        let actual = qos_query_map(&target, &qos);

        assert_eq!(
            actual,
            expected(&[
                ("userId", "1"),
                ("groupId", "1"),
                ("hlStorageQuotaKBytes", "1048576"),
                ("wlStorageQuotaKBytes", "786432"),
                ("hlStorageQuotaCount", "1000"),
                ("wlStorageQuotaCount", "750"),
                ("hlRequestRate", "200"),
                ("wlRequestRate", "150"),
                ("hlDataKBytesIn", "1048576"),
                ("wlDataKBytesIn", "786432"),
                ("hlDataKBytesOut", "1048576"),
                ("wlDataKBytesOut", "786432"),
            ])
        );
    }

    #[test]
    fn unlimited_metrics_are_minus_one() {
        let target = QosTarget::Group("QA".into());

        let actual = qos_query_map(&target, &QoS::unlimited());

        assert_eq!(actual["userId"], "*");
        assert_eq!(actual["groupId"], "QA");
        assert_eq!(actual.len(), 12);
        let levels = actual.iter().filter(|(k, _)| k.starts_with("hl") || k.starts_with("wl"));
        for (key, value) in levels {
            assert_eq!(value, "-1", "{key} should be unlimited");
        }
    }

    #[test]
    fn byte_quotas_truncate_to_whole_kib() {
        let target = QosTarget::Group("QA".into());
        let qos = QoS { storage_quota_bytes: Some(2047), ..QoS::default() };

        let actual = qos_query_map(&target, &qos);

        assert_eq!(actual["hlStorageQuotaKBytes"], "1");
        assert_eq!(actual["wlStorageQuotaKBytes"], "0");
    }
}
