use crate::core::persistence::fixed_fs_adapter_trait::FixedFsAdapterTrait;

use super::datasource_settings_entity::DatasourceSettingsEntity;

/// API-facing repository abstraction for datasource settings.
pub trait DatasourceSettingsApiRepository {
    fn fs_adapter(&self) -> &dyn FixedFsAdapterTrait<DatasourceSettingsEntity>;

    fn read(&self) -> anyhow::Result<DatasourceSettingsEntity> {
        self.fs_adapter().read()
    }

    fn update(&self, settings: &DatasourceSettingsEntity) -> anyhow::Result<()> {
        self.fs_adapter().update(settings)
    }
}
