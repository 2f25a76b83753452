use axum::extract::State;
use axum::Json;

use crate::api::dto::query_dto::{QueryRequest, QueryResponse};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct QueryController;

impl QueryController {
    pub async fn run_query(
        State(state): State<AppState>,
        Json(req): Json<QueryRequest>,
    ) -> Result<Json<ApiResponse<QueryResponse>>, AppError> {
        to_json(state.query_service.run_query(req).await)
    }
}
