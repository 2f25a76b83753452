use serde::{Deserialize, Serialize};

/// Supported upstream response shapes.
///
/// One tag per API contract generation; the active variant is chosen once
/// per configured datasource, never sniffed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseVariant {
    #[serde(rename = "flat_datapoints")]
    FlatDatapoints,
    #[serde(rename = "single_metric_nested")]
    SingleMetricNested,
    #[serde(rename = "multi_metric_nested")]
    MultiMetricNested,
}

impl ResponseVariant {
    pub fn as_code(&self) -> &'static str {
        match self {
            ResponseVariant::FlatDatapoints => "FLAT_DATAPOINTS",
            ResponseVariant::SingleMetricNested => "SINGLE_METRIC_NESTED",
            ResponseVariant::MultiMetricNested => "MULTI_METRIC_NESTED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "FLAT_DATAPOINTS" | "FLAT" => Some(ResponseVariant::FlatDatapoints),
            "SINGLE_METRIC_NESTED" | "SINGLE" => Some(ResponseVariant::SingleMetricNested),
            "MULTI_METRIC_NESTED" | "MULTI" => Some(ResponseVariant::MultiMetricNested),
            _ => None,
        }
    }
}

impl Default for ResponseVariant {
    fn default() -> Self {
        // Current upstream contract generation.
        ResponseVariant::MultiMetricNested
    }
}
