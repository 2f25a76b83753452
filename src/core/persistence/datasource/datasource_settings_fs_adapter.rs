use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::core::persistence::fixed_fs_adapter_trait::FixedFsAdapterTrait;
use crate::core::persistence::storage_path::datasource_settings_path;
use crate::core::youbora::variant::ResponseVariant;

use super::datasource_settings_entity::DatasourceSettingsEntity;

/// FS adapter for persisted datasource settings.
///
/// Uses a simple key-value `datasource.rci` file with atomic writes.
pub struct DatasourceSettingsFsAdapter;

impl FixedFsAdapterTrait<DatasourceSettingsEntity> for DatasourceSettingsFsAdapter {
    fn new() -> Self
    where
        Self: Sized,
    {
        Self {}
    }

    fn read(&self) -> Result<DatasourceSettingsEntity> {
        let path = datasource_settings_path();
        if !path.exists() {
            return Ok(DatasourceSettingsEntity::default());
        }

        let file = File::open(&path).context("Failed to open datasource settings file")?;
        let reader = BufReader::new(file);
        let mut s = DatasourceSettingsEntity::default();

        for line in reader.lines() {
            let line = line?;
            if let Some((key, val)) = line.split_once(':') {
                let key = key.trim().to_uppercase();
                let val = val.trim();

                match key.as_str() {
                    "SERVICE_ROOT" => {
                        if !val.is_empty() {
                            s.service_root = val.to_string();
                        }
                    }
                    "ACCOUNT" => s.account = val.to_string(),
                    "API_KEY" => {
                        s.api_key = if val.is_empty() {
                            None
                        } else {
                            Some(val.to_string())
                        }
                    }
                    "RESPONSE_VARIANT" => {
                        if let Some(v) = ResponseVariant::from_code(val) {
                            s.response_variant = v;
                        }
                    }
                    "CREATED_AT" => {
                        if let Ok(dt) = val.parse::<DateTime<Utc>>() {
                            s.created_at = dt;
                        }
                    }
                    "UPDATED_AT" => {
                        if let Ok(dt) = val.parse::<DateTime<Utc>>() {
                            s.updated_at = dt;
                        }
                    }
                    "VERSION" => s.version = val.to_string(),
                    _ => {}
                }
            }
        }

        Ok(s)
    }

    fn insert(&self, data: &DatasourceSettingsEntity) -> Result<()> {
        self.write(data)
    }

    fn update(&self, data: &DatasourceSettingsEntity) -> Result<()> {
        self.write(data)
    }

    fn delete(&self) -> Result<()> {
        let path = datasource_settings_path();
        if path.exists() {
            fs::remove_file(&path).context("Failed to delete datasource settings file")?;
        }
        Ok(())
    }
}

impl DatasourceSettingsFsAdapter {
    fn write(&self, data: &DatasourceSettingsEntity) -> Result<()> {
        use std::io::Write;

        let path = datasource_settings_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create settings directory")?;
        }

        let tmp_path = path.with_extension("rci.tmp");
        let mut f = File::create(&tmp_path).context("Failed to create temp settings file")?;

        writeln!(f, "SERVICE_ROOT:{}", data.service_root)?;
        writeln!(f, "ACCOUNT:{}", data.account)?;
        writeln!(f, "API_KEY:{}", data.api_key.clone().unwrap_or_default())?;
        writeln!(f, "RESPONSE_VARIANT:{}", data.response_variant.as_code())?;
        writeln!(f, "CREATED_AT:{}", data.created_at.to_rfc3339())?;
        writeln!(f, "UPDATED_AT:{}", data.updated_at.to_rfc3339())?;
        writeln!(f, "VERSION:{}", data.version)?;

        f.flush()?;
        f.sync_all().context("Failed to sync temp settings file")?;
        fs::rename(&tmp_path, &path).context("Failed to finalize settings file")?;

        Ok(())
    }
}
