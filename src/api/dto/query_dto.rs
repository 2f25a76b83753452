use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::youbora::normalize::Series;

/// Host-supplied query window, epoch milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub from_ms: i64,
    pub to_ms: i64,
}

/// One panel target. Field defaults mirror the host's default query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    pub ref_id: String,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,
    #[serde(default = "default_streaming_type")]
    pub streaming_type: Vec<String>,
    #[serde(default)]
    pub filter_by: Option<String>,
    #[serde(default)]
    pub filter_value: Option<String>,
    #[serde(default)]
    pub group_by: Option<String>,
}

fn default_metrics() -> Vec<String> {
    vec!["views".to_string()]
}

fn default_streaming_type() -> Vec<String> {
    vec!["ALL".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub range: TimeRange,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: i64,
    #[validate(length(min = 1))]
    pub targets: Vec<QueryTarget>,
}

fn default_interval_ms() -> i64 {
    60_000
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResult {
    pub ref_id: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub results: Vec<TargetResult>,
}
