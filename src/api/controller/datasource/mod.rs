use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::datasource::dto::datasource_settings_upsert_request::DatasourceSettingsUpsertRequest;
use crate::errors::AppError;

pub struct DatasourceController;

impl DatasourceController {
    pub async fn get_settings(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.datasource_service.get_datasource_settings().await)
    }

    pub async fn upsert_settings(
        State(state): State<AppState>,
        Json(req): Json<DatasourceSettingsUpsertRequest>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(
            state
                .datasource_service
                .upsert_datasource_settings(req)
                .await,
        )
    }

    pub async fn health(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.datasource_service.test_connection().await)
    }
}
