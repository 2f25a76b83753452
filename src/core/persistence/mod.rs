pub mod datasource;
pub mod fixed_fs_adapter_trait;
pub mod storage_path;
