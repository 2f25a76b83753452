use serde::{Deserialize, Serialize};

/// Nested analytics payload (single- and multi-metric contract generations).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouboraResponse {
    #[serde(default)]
    pub messages: Vec<UpstreamMessage>,
    #[serde(default)]
    pub data: Vec<Datum>,
    pub metadata: Option<Metadata>,
}

/// Diagnostic message the upstream attaches instead of (or alongside) data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamMessage {
    pub class: Option<String>,
    #[serde(rename = "message")]
    pub text: Option<String>,
    pub parameter: Option<String>,
}

/// One grouped entry: a streaming type (and optional dimension name) with
/// its metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datum {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    #[serde(default)]
    pub date: Vec<f64>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub account: Option<String>,
    pub timestamp: Option<f64>,
    pub refresh: Option<i16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub values: Vec<MetricValues>,
    pub code: Option<String>,
    pub label: Option<String>,
}

/// Point pairs as shipped on the wire: `[timestamp_ms, value]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricValues {
    #[serde(rename = "data", default)]
    pub points: Vec<[f64; 2]>,
}

/// Flat legacy payload: `{"datapoints":[{"Time":..,"Value":..},..]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatResponse {
    pub datapoints: Vec<FlatDatapoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatDatapoint {
    #[serde(rename = "Time")]
    pub time: i64,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Error envelope some upstream failures carry in the body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}
