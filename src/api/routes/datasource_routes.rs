//! Datasource configuration routes (e.g., /api/v1/datasource/*)

use axum::{routing::get, Router};

use crate::api::controller::datasource::DatasourceController;
use crate::app_state::AppState;

/// Build the router for datasource endpoints under /api/v1/datasource
pub fn datasource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(DatasourceController::get_settings).put(DatasourceController::upsert_settings),
        )
        .route("/health", get(DatasourceController::health))
}
