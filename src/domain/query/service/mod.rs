use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::try_join_all;
use tracing::debug;
use validator::Validate;

use crate::api::dto::query_dto::{QueryRequest, QueryResponse, TargetResult};
use crate::core::persistence::datasource::datasource_settings_api_repository_trait::DatasourceSettingsApiRepository;
use crate::core::persistence::datasource::datasource_settings_repository::DatasourceSettingsRepository;
use crate::core::youbora::client::{UpstreamClient, YouboraClient};
use crate::core::youbora::normalize::normalize;
use crate::core::youbora::signer::{sign, SIGNING_TTL_MS};
use crate::domain::query::params::target_params;

pub async fn run_query(req: QueryRequest) -> Result<QueryResponse> {
    req.validate()?;
    let repo = DatasourceSettingsRepository::new();
    let client = YouboraClient::new()?;
    run_query_with(&repo, &client, req).await
}

/// Fan out one upstream request per target and await them jointly. The
/// first failed target aborts the whole batch; there are no partial
/// results.
pub(crate) async fn run_query_with<R, C>(
    repo: &R,
    client: &C,
    req: QueryRequest,
) -> Result<QueryResponse>
where
    R: DatasourceSettingsApiRepository,
    C: UpstreamClient,
{
    let settings = repo.read()?;
    let api_key = settings.api_key.clone().unwrap_or_default();
    let now_ms = Utc::now().timestamp_millis();

    debug!(targets = req.targets.len(), "running query batch");

    let pending = req.targets.iter().map(|target| {
        let params = target_params(target, &req.range, req.interval_ms);
        let signed = sign(
            &settings.service_root,
            &settings.account,
            &api_key,
            &params,
            now_ms,
            SIGNING_TTL_MS,
        );
        let variant = settings.response_variant;
        let ref_id = target.ref_id.clone();

        async move {
            let body = client.fetch(&signed.full_url).await?;
            let series = normalize(&body, variant)
                .with_context(|| format!("normalizing response for target {}", ref_id))?;
            Ok::<TargetResult, anyhow::Error>(TargetResult { ref_id, series })
        }
    });

    let results = try_join_all(pending).await?;

    Ok(QueryResponse { results })
}
