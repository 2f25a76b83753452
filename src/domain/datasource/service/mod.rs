use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use tracing::warn;
use validator::Validate;

use crate::core::persistence::datasource::datasource_settings_api_repository_trait::DatasourceSettingsApiRepository;
use crate::core::persistence::datasource::datasource_settings_repository::DatasourceSettingsRepository;
use crate::core::youbora::client::{UpstreamClient, YouboraClient};
use crate::core::youbora::signer::{sign, SIGNING_TTL_MS};
use crate::domain::datasource::dto::datasource_settings_upsert_request::DatasourceSettingsUpsertRequest;

pub async fn get_datasource_settings() -> Result<Value> {
    let repo = DatasourceSettingsRepository::new();
    get_datasource_settings_with_repo(&repo).await
}

pub async fn upsert_datasource_settings(req: DatasourceSettingsUpsertRequest) -> Result<Value> {
    req.validate()?;
    let repo = DatasourceSettingsRepository::new();
    upsert_datasource_settings_with_repo(&repo, req).await
}

/// Issue one signed diagnostic request and fold every possible failure into
/// a `{status, message}` answer the host can render.
pub async fn test_connection() -> Result<Value> {
    let repo = DatasourceSettingsRepository::new();
    let client = YouboraClient::new()?;
    test_connection_with(&repo, &client).await
}

async fn get_datasource_settings_with_repo<R: DatasourceSettingsApiRepository>(
    repo: &R,
) -> Result<Value> {
    let settings = repo.read()?;

    Ok(serde_json::json!({
        "service_root": settings.service_root,
        "account": settings.account,
        "api_key_configured": settings.api_key_configured(),
        "response_variant": settings.response_variant,
        "updated_at": settings.updated_at.to_rfc3339(),
    }))
}

async fn upsert_datasource_settings_with_repo<R: DatasourceSettingsApiRepository>(
    repo: &R,
    req: DatasourceSettingsUpsertRequest,
) -> Result<Value> {
    let mut settings = repo.read()?;
    settings.apply_update(req);

    repo.update(&settings)?;

    Ok(serde_json::json!({
        "message": "Datasource settings updated successfully",
        "updated_at": settings.updated_at.to_rfc3339(),
        "account": settings.account,
        "api_key_configured": settings.api_key_configured(),
    }))
}

async fn test_connection_with<R, C>(repo: &R, client: &C) -> Result<Value>
where
    R: DatasourceSettingsApiRepository,
    C: UpstreamClient,
{
    let settings = repo.read()?;

    let mut params = HashMap::new();
    params.insert("fromDate".to_string(), "last5minutes".to_string());
    params.insert("metrics".to_string(), "views".to_string());

    let signed = sign(
        &settings.service_root,
        &settings.account,
        settings.api_key.as_deref().unwrap_or_default(),
        &params,
        Utc::now().timestamp_millis(),
        SIGNING_TTL_MS,
    );

    match client.fetch(&signed.full_url).await {
        Ok(_) => Ok(serde_json::json!({
            "status": "success",
            "message": "Data source is working",
        })),
        Err(err) => {
            warn!(error = %err, "connectivity check failed");
            Ok(serde_json::json!({
                "status": "error",
                "message": err.to_string(),
            }))
        }
    }
}
