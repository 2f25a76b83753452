pub mod datasource_settings_upsert_request;
