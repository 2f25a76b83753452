pub mod datasource_routes;
pub mod query_routes;
