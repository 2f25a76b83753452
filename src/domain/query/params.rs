use std::collections::HashMap;

use crate::api::dto::query_dto::{QueryTarget, TimeRange};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Pick the coarsest granularity that still resolves the panel interval.
/// Thresholds match the legacy plugin contract.
pub fn granularity_for_interval(interval_ms: i64) -> &'static str {
    if interval_ms > 48 * MS_PER_HOUR {
        "day"
    } else if interval_ms > 120 * MS_PER_MINUTE {
        "hour"
    } else {
        "minute"
    }
}

/// Upstream filter expression: one named rule restricting a dimension to a
/// single value.
pub fn build_filter_param(filter_by: &str, filter_value: &str) -> String {
    format!(
        r#"[{{"name":"{}={}","rules":{{"{}":["{}"]}}}}]"#,
        filter_by, filter_value, filter_by, filter_value
    )
}

/// Assemble the signer input for one query target. Iteration order is
/// irrelevant; the signer re-canonicalizes.
pub fn target_params(
    target: &QueryTarget,
    range: &TimeRange,
    interval_ms: i64,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert("fromDate".to_string(), range.from_ms.to_string());
    params.insert("toDate".to_string(), range.to_ms.to_string());
    params.insert(
        "granularity".to_string(),
        granularity_for_interval(interval_ms).to_string(),
    );
    params.insert("timezone".to_string(), "GMT".to_string());
    params.insert("metrics".to_string(), target.metrics.join(","));
    params.insert("type".to_string(), target.streaming_type.join(","));

    if let Some(group_by) = target.group_by.as_deref().filter(|v| !v.is_empty()) {
        params.insert("groupBy".to_string(), group_by.to_string());
    }

    if let (Some(by), Some(value)) = (
        target.filter_by.as_deref().filter(|v| !v.is_empty()),
        target.filter_value.as_deref().filter(|v| !v.is_empty()),
    ) {
        params.insert("filter".to_string(), build_filter_param(by, value));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> QueryTarget {
        QueryTarget {
            ref_id: "A".into(),
            metrics: vec!["views".into(), "concurrent".into()],
            streaming_type: vec!["ALL".into(), "VOD".into()],
            filter_by: None,
            filter_value: None,
            group_by: None,
        }
    }

    fn range() -> TimeRange {
        TimeRange {
            from_ms: 1_646_220_720_000,
            to_ms: 1_646_224_320_000,
        }
    }

    #[test]
    fn test_granularity_thresholds() {
        assert_eq!(granularity_for_interval(60 * 1000), "minute");
        assert_eq!(granularity_for_interval(120 * MS_PER_MINUTE), "minute");
        assert_eq!(granularity_for_interval(121 * MS_PER_MINUTE), "hour");
        assert_eq!(granularity_for_interval(48 * MS_PER_HOUR), "hour");
        assert_eq!(granularity_for_interval(49 * MS_PER_HOUR), "day");
    }

    #[test]
    fn test_target_params_joins_lists() {
        let params = target_params(&target(), &range(), 60 * 1000);

        assert_eq!(params["metrics"], "views,concurrent");
        assert_eq!(params["type"], "ALL,VOD");
        assert_eq!(params["timezone"], "GMT");
        assert_eq!(params["fromDate"], "1646220720000");
        assert_eq!(params["toDate"], "1646224320000");
        assert_eq!(params["granularity"], "minute");
        assert!(!params.contains_key("filter"));
        assert!(!params.contains_key("groupBy"));
    }

    #[test]
    fn test_filter_param_format() {
        let mut t = target();
        t.filter_by = Some("country".into());
        t.filter_value = Some("Brazil".into());

        let params = target_params(&t, &range(), 60 * 1000);

        assert_eq!(
            params["filter"],
            r#"[{"name":"country=Brazil","rules":{"country":["Brazil"]}}]"#
        );
    }

    #[test]
    fn test_filter_requires_both_fields() {
        let mut t = target();
        t.filter_by = Some("country".into());

        let params = target_params(&t, &range(), 60 * 1000);
        assert!(!params.contains_key("filter"));
    }

    #[test]
    fn test_group_by_only_when_set() {
        let mut t = target();
        t.group_by = Some("channel".into());

        let params = target_params(&t, &range(), 60 * 1000);
        assert_eq!(params["groupBy"], "channel");
    }
}
