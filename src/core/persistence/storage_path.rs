use std::env;
use std::path::PathBuf;

/// Root directory for persisted state, overridable via env.
pub fn data_dir() -> PathBuf {
    env::var("YOUBORA_DS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

pub fn datasource_settings_path() -> PathBuf {
    data_dir().join("datasource.rci")
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}
