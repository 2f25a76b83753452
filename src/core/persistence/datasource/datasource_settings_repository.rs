use crate::core::persistence::fixed_fs_adapter_trait::FixedFsAdapterTrait;

use super::datasource_settings_api_repository_trait::DatasourceSettingsApiRepository;
use super::datasource_settings_entity::DatasourceSettingsEntity;
use super::datasource_settings_fs_adapter::DatasourceSettingsFsAdapter;

pub struct DatasourceSettingsRepository {
    adapter: DatasourceSettingsFsAdapter,
}

impl DatasourceSettingsRepository {
    pub fn new() -> Self {
        Self {
            adapter: DatasourceSettingsFsAdapter::new(),
        }
    }
}

impl DatasourceSettingsApiRepository for DatasourceSettingsRepository {
    fn fs_adapter(&self) -> &dyn FixedFsAdapterTrait<DatasourceSettingsEntity> {
        &self.adapter
    }
}
