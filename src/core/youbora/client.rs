use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::response::UpstreamErrorBody;

/// Matches the legacy plugin's hard client timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Shown when neither the body nor the status carries anything usable.
pub const DEFAULT_ERROR_MESSAGE: &str = "Error accessing API";

/// Outbound seam so services can run against a mock upstream in tests.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// GET a signed URL and decode the JSON body.
    async fn fetch(&self, url: &str) -> Result<Value>;
}

pub struct YouboraClient {
    http: Client,
}

impl YouboraClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl UpstreamClient for YouboraClient {
    async fn fetch(&self, url: &str) -> Result<Value> {
        debug!(url, "calling upstream API");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("{}: {}", DEFAULT_ERROR_MESSAGE, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body: Option<Value> = resp.json().await.ok();
            return Err(anyhow!(upstream_error_message(status, body.as_ref())));
        }

        resp.json()
            .await
            .context("Failed to decode upstream response body")
    }
}

/// Best human-readable message for a failed upstream call: the embedded
/// error code and message when the body carries them, else the HTTP status
/// text, else a generic fallback.
pub fn upstream_error_message(status: StatusCode, body: Option<&Value>) -> String {
    let base = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => DEFAULT_ERROR_MESSAGE.to_string(),
    };

    let detail = body
        .cloned()
        .and_then(|v| serde_json::from_value::<UpstreamErrorBody>(v).ok())
        .and_then(|b| b.error);

    match detail {
        Some(d) => match (d.code, d.message) {
            (Some(code), Some(message)) => format!("{}: {}. {}", base, code, message),
            (Some(code), None) => format!("{}: {}", base, code),
            (None, Some(message)) => format!("{}: {}", base, message),
            (None, None) => base,
        },
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_embedded_detail() {
        let body = json!({ "error": { "code": "X", "message": "Y" } });
        let msg = upstream_error_message(StatusCode::FORBIDDEN, Some(&body));

        assert!(msg.contains("X"));
        assert!(msg.contains("Y"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn test_error_message_falls_back_to_status_text() {
        let msg = upstream_error_message(StatusCode::SERVICE_UNAVAILABLE, None);
        assert_eq!(msg, "503 Service Unavailable");
    }

    #[test]
    fn test_error_message_ignores_unrelated_body() {
        let body = json!({ "data": [] });
        let msg = upstream_error_message(StatusCode::BAD_GATEWAY, Some(&body));
        assert_eq!(msg, "502 Bad Gateway");
    }

    mod wire {
        use super::super::*;
        use crate::core::youbora::signer::{sign, SIGNING_TTL_MS};
        use httptest::matchers::request;
        use httptest::responders::{json_encoded, status_code};
        use httptest::{Expectation, Server};
        use serde_json::json;
        use std::collections::HashMap;

        fn signed_url(server: &Server) -> String {
            let mut params = HashMap::new();
            params.insert("fromDate".to_string(), "last5minutes".to_string());
            params.insert("metrics".to_string(), "views".to_string());

            sign(
                &format!("http://{}", server.addr()),
                "acme",
                "0123456789",
                &params,
                1_646_220_000_000,
                SIGNING_TTL_MS,
            )
            .full_url
        }

        #[tokio::test]
        async fn test_fetch_decodes_success_body() {
            let server = Server::run();
            server.expect(
                Expectation::matching(request::method_path("GET", "/youbora/acme/data"))
                    .respond_with(json_encoded(json!({ "data": [] }))),
            );

            let client = YouboraClient::new().unwrap();
            let body = client.fetch(&signed_url(&server)).await.unwrap();

            assert_eq!(body["data"], json!([]));
        }

        #[tokio::test]
        async fn test_fetch_surfaces_embedded_error_detail() {
            let server = Server::run();
            server.expect(
                Expectation::matching(request::method_path("GET", "/youbora/acme/data"))
                    .respond_with(
                        status_code(403)
                            .body(r#"{"error":{"code":"X","message":"Y"}}"#),
                    ),
            );

            let client = YouboraClient::new().unwrap();
            let err = client.fetch(&signed_url(&server)).await.unwrap_err();

            let msg = err.to_string();
            assert!(msg.contains("X"));
            assert!(msg.contains("Y"));
            assert!(msg.contains("403"));
        }

        #[tokio::test]
        async fn test_fetch_maps_transport_failure() {
            // Nothing is listening here.
            let client = YouboraClient::new().unwrap();
            let err = client
                .fetch("http://127.0.0.1:9/youbora/acme/data")
                .await
                .unwrap_err();

            assert!(err.to_string().contains(DEFAULT_ERROR_MESSAGE));
        }
    }
}
