use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    JsonValue, QueryOrder,
};

pub struct SettingsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SettingsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the oldest settings row, if any
    pub async fn get_first(&self) -> Result<Option<entity::settings::Model>, DbErr> {
        entity::prelude::Settings::find()
            .order_by_asc(entity::settings::Column::CreatedAt)
            .order_by_asc(entity::settings::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::settings::Model>, DbErr> {
        entity::prelude::Settings::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// Replaces the settings document
    ///
    /// Returns `Ok(None)` when no row has the given id.
    pub async fn update_data(
        &self,
        id: &str,
        data: JsonValue,
        modified_at: i64,
    ) -> Result<Option<entity::settings::Model>, DbErr> {
        let settings = match self.find_by_id(id).await? {
            Some(settings) => settings,
            None => return Ok(None),
        };

        let mut settings_am = settings.into_active_model();
        settings_am.data = ActiveValue::Set(data);
        settings_am.modified_at = ActiveValue::Set(Some(modified_at));

        let settings = settings_am.update(self.db).await?;

        Ok(Some(settings))
    }
}
