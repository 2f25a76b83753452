pub mod datasource_settings_api_repository_trait;
pub mod datasource_settings_entity;
pub mod datasource_settings_fs_adapter;
pub mod datasource_settings_repository;
