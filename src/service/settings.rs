//! Settings service.

use sea_orm::DbErr;

use crate::{
    data::settings::SettingsRepository,
    error::Error,
    model::{
        app::AppState,
        settings::{SettingsData, SettingsEntity},
        EntityKind,
    },
    util::time::{format_optional_timestamp, format_timestamp, now_epoch},
};

/// Reads and replaces the back-office settings.
pub struct SettingsService<'a> {
    state: &'a AppState,
}

impl<'a> SettingsService<'a> {
    /// Creates a new instance of SettingsService.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Retrieves the settings.
    ///
    /// # Returns
    /// - `Ok(Some(SettingsEntity))` - The settings row
    /// - `Ok(None)` - No settings row exists
    /// - `Err(Error::RetrieveFailed)` - The query failed or the stored document is malformed
    pub async fn get_settings(&self) -> Result<Option<SettingsEntity>, Error> {
        self.fetch_settings()
            .await
            .map_err(|e| Error::retrieve_failed(EntityKind::Settings, "get_settings", "settings", e))
    }

    /// Replaces the settings document and stamps the modification time.
    ///
    /// # Arguments
    /// - `id` - Settings row id
    /// - `data` - New document; fields not present are removed
    ///
    /// # Returns
    /// - `Ok(SettingsEntity)` - The updated settings
    /// - `Err(Error::UpdateFailed)` - No row has this id or the update failed
    pub async fn update_settings(
        &self,
        id: &str,
        data: &SettingsData,
    ) -> Result<SettingsEntity, Error> {
        self.replace_settings(id, data).await.map_err(|e| {
            Error::update_failed(EntityKind::Settings, "update_settings", format!("id {}", id), e)
        })
    }

    async fn fetch_settings(&self) -> Result<Option<SettingsEntity>, Error> {
        match SettingsRepository::new(&self.state.db).get_first().await? {
            Some(settings) => Ok(Some(map_settings(settings)?)),
            None => Ok(None),
        }
    }

    async fn replace_settings(&self, id: &str, data: &SettingsData) -> Result<SettingsEntity, Error> {
        let settings = SettingsRepository::new(&self.state.db)
            .update_data(id, data.to_json(), now_epoch())
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("settings {}", id)))?;

        map_settings(settings)
    }
}

/// Maps the settings row, decoding the stored document.
pub fn map_settings(settings: entity::settings::Model) -> Result<SettingsEntity, Error> {
    Ok(SettingsEntity {
        data: SettingsData::from_json(settings.data)?,
        created_at: format_timestamp(settings.created_at),
        modified_at: format_optional_timestamp(settings.modified_at),
        id: settings.id,
    })
}
