pub mod datasource;
pub mod query;
