use std::sync::Arc;

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub datasource_service: Arc<DatasourceService>,
    pub query_service: Arc<QueryService>,
}

pub fn build_app_state() -> AppState {
    AppState {
        datasource_service: Arc::new(DatasourceService),
        query_service: Arc::new(QueryService),
    }
}

#[derive(Clone, Default)]
pub struct DatasourceService;

impl DatasourceService {
    delegate_async_service! {
        fn get_datasource_settings() -> serde_json::Value => crate::domain::datasource::service::get_datasource_settings;
        fn upsert_datasource_settings(req: crate::domain::datasource::dto::datasource_settings_upsert_request::DatasourceSettingsUpsertRequest) -> serde_json::Value => crate::domain::datasource::service::upsert_datasource_settings;
        fn test_connection() -> serde_json::Value => crate::domain::datasource::service::test_connection;
    }
}

#[derive(Clone, Default)]
pub struct QueryService;

impl QueryService {
    delegate_async_service! {
        fn run_query(req: crate::api::dto::query_dto::QueryRequest) -> crate::api::dto::query_dto::QueryResponse => crate::domain::query::service::run_query;
    }
}
