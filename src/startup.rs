use sea_orm::DatabaseConnection;

use crate::{
    analytics::BigQueryClient, config::Config, crypto::FieldCipher, error::Error,
    model::app::AppState, util::link::DashboardLinks,
};

/// Build the analytical store client from the configured project and endpoint
pub fn build_analytics_client(config: &Config) -> Result<BigQueryClient, Error> {
    let client = BigQueryClient::new(&config.analytics)?;

    Ok(client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect both stores and assemble the shared state
///
/// # Returns
/// - `Ok(AppState)` - Database migrated and analytical store client configured
/// - `Err(Error::DbErr)` - Connecting or migrating failed
/// - `Err(Error::AnalyticsError)` - The analytical store client could not be built
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let analytics = build_analytics_client(config)?;
    let db = connect_to_database(config).await?;

    tracing::info!(
        project_id = %config.analytics.project_id,
        "Back-office stores connected"
    );

    Ok(AppState {
        db,
        analytics,
        cipher: FieldCipher::new(config.encryption_key.as_deref()),
        links: DashboardLinks::new(config.dashboard_url.clone()),
    })
}
