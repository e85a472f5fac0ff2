//! Tests for SettingsRepository.

use serde_json::json;

use super::*;
use crate::data::settings::SettingsRepository;

/// Expect None when the table is empty
#[tokio::test]
async fn first_is_none_when_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let result = SettingsRepository::new(&test.db).get_first().await?;

    assert!(result.is_none());

    Ok(())
}

/// Expect the document to be replaced and the modification time stamped
#[tokio::test]
async fn update_replaces_document() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.store()
        .insert_settings("s1", json!({ "hard_banned_ips": ["10.0.0.1"], "other": ["x"] }))
        .await?;

    let settings_repo = SettingsRepository::new(&test.db);
    let updated = settings_repo
        .update_data("s1", json!({ "hard_banned_ips": [] }), 1_800_000_000)
        .await?
        .expect("settings row should exist");

    assert_eq!(updated.data, json!({ "hard_banned_ips": [] }));
    assert_eq!(updated.modified_at, Some(1_800_000_000));

    Ok(())
}

/// Expect None when updating an unknown id
#[tokio::test]
async fn update_unknown_id_is_none() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let result = SettingsRepository::new(&test.db)
        .update_data("missing", json!({}), 1_800_000_000)
        .await?;

    assert!(result.is_none());

    Ok(())
}
