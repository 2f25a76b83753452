use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;

use super::response::{FlatResponse, YouboraResponse};
use super::variant::ResponseVariant;

/// One time/value pair of a normalized series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// A named, time-ordered series as returned to the rendering host.
///
/// Point order is whatever the upstream shipped; normalization never
/// re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: Option<String>,
    pub points: Vec<SeriesPoint>,
}

/// Map a deserialized upstream body into series for the given variant.
///
/// Any expected-but-absent nested field is a descriptive error; a payload
/// that would only yield defaulted or empty series is never returned
/// silently.
pub fn normalize(body: &Value, variant: ResponseVariant) -> Result<Vec<Series>> {
    match variant {
        ResponseVariant::FlatDatapoints => normalize_flat(body),
        ResponseVariant::SingleMetricNested => normalize_single(body),
        ResponseVariant::MultiMetricNested => normalize_multi(body),
    }
}

fn normalize_flat(body: &Value) -> Result<Vec<Series>> {
    let flat: FlatResponse = serde_json::from_value(body.clone())
        .context("flat response is missing the datapoints array")?;

    let points = flat
        .datapoints
        .into_iter()
        .map(|dp| SeriesPoint {
            timestamp_ms: dp.time,
            value: dp.value,
        })
        .collect();

    Ok(vec![Series { name: None, points }])
}

fn normalize_single(body: &Value) -> Result<Vec<Series>> {
    let yr = parse_nested(body)?;

    let datum = yr
        .data
        .first()
        .ok_or_else(|| anyhow!("nested response is missing data[0]"))?;
    let metric = datum
        .metrics
        .first()
        .ok_or_else(|| anyhow!("nested response is missing data[0].metrics[0]"))?;
    let values = metric
        .values
        .first()
        .ok_or_else(|| anyhow!("nested response is missing data[0].metrics[0].values[0]"))?;

    Ok(vec![Series {
        name: metric.label.clone(),
        points: pair_points(&values.points),
    }])
}

fn normalize_multi(body: &Value) -> Result<Vec<Series>> {
    let yr = parse_nested(body)?;

    let mut series = Vec::new();
    for (i, datum) in yr.data.iter().enumerate() {
        let group_type = datum
            .group_type
            .as_deref()
            .ok_or_else(|| anyhow!("grouped entry data[{}] is missing its type label", i))?;

        for (k, metric) in datum.metrics.iter().enumerate() {
            let label = metric
                .label
                .as_deref()
                .ok_or_else(|| anyhow!("metric data[{}].metrics[{}] is missing its label", i, k))?;
            let values = metric.values.first().ok_or_else(|| {
                anyhow!("metric data[{}].metrics[{}] is missing values[0]", i, k)
            })?;

            // Dimension name prefixes the series when the query grouped by one.
            let name = match datum.name.as_deref() {
                Some(dim) => format!("{} | {} {}", dim, group_type, label),
                None => format!("{} {}", group_type, label),
            };

            series.push(Series {
                name: Some(name),
                points: pair_points(&values.points),
            });
        }
    }

    Ok(series)
}

fn parse_nested(body: &Value) -> Result<YouboraResponse> {
    let yr: YouboraResponse = serde_json::from_value(body.clone())
        .context("nested response does not match the upstream contract")?;

    // The upstream reports request problems as a messages array with no data.
    if yr.data.is_empty() {
        if let Some(msg) = yr.messages.first() {
            return Err(anyhow!(
                "upstream reported: {}",
                msg.text.as_deref().unwrap_or("unspecified error")
            ));
        }
    }

    Ok(yr)
}

fn pair_points(pairs: &[[f64; 2]]) -> Vec<SeriesPoint> {
    pairs
        .iter()
        .map(|p| SeriesPoint {
            timestamp_ms: p[0] as i64,
            value: p[1],
        })
        .collect()
}
