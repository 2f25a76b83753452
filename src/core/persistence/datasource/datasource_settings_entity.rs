use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::youbora::variant::ResponseVariant;
use crate::domain::datasource::dto::datasource_settings_upsert_request::DatasourceSettingsUpsertRequest;

/// Persisted connection settings for the configured Youbora account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceSettingsEntity {
    /// Upstream service root, e.g. https://api.youbora.com.
    pub service_root: String,
    /// Youbora account identifier used in the request path.
    pub account: String,
    /// Secret api key. Write-only across the API boundary: it feeds the
    /// request digest and is never serialized back out.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// Response shape generation this deployment speaks.
    pub response_variant: ResponseVariant,
    /// Configuration creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (UTC).
    pub updated_at: DateTime<Utc>,
    /// Version identifier for the configuration format.
    pub version: String,
}

impl Default for DatasourceSettingsEntity {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            service_root: "https://api.youbora.com".into(),
            account: String::new(),
            api_key: None,
            response_variant: ResponseVariant::default(),
            created_at: now,
            updated_at: now,
            version: "1.0.0".into(),
        }
    }
}

impl DatasourceSettingsEntity {
    pub fn apply_update(&mut self, req: DatasourceSettingsUpsertRequest) {
        if let Some(v) = req.service_root {
            if let Some(v) = normalize_string(v) {
                self.service_root = v.trim_end_matches('/').to_string();
            }
        }

        if let Some(v) = req.account {
            if let Some(v) = normalize_string(v) {
                self.account = v;
            }
        }

        if let Some(v) = req.api_key {
            self.api_key = normalize_string(v);
        }

        if let Some(v) = req.response_variant {
            self.response_variant = v;
        }

        self.updated_at = Utc::now();
    }

    /// The only thing the read path ever says about the secret.
    pub fn api_key_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn normalize_string(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_never_serialized() {
        let mut settings = DatasourceSettingsEntity::default();
        settings.api_key = Some("super-secret-key".into());

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("super-secret-key"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_apply_update_trims_service_root() {
        let mut settings = DatasourceSettingsEntity::default();
        settings.apply_update(DatasourceSettingsUpsertRequest {
            service_root: Some("https://proxy.example.com/".into()),
            account: Some("  acme  ".into()),
            api_key: Some("0123456789".into()),
            response_variant: None,
        });

        assert_eq!(settings.service_root, "https://proxy.example.com");
        assert_eq!(settings.account, "acme");
        assert!(settings.api_key_configured());
    }

    #[test]
    fn test_blank_api_key_counts_as_unconfigured() {
        let settings = DatasourceSettingsEntity::default();
        assert!(!settings.api_key_configured());
    }
}
