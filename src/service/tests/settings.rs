//! Tests for SettingsService.

use std::time::Duration;

use serde_json::json;

use super::*;
use crate::{
    error::Error,
    model::settings::{SettingsData, HARD_BANNED_IPS},
    service::settings::SettingsService,
};

/// Expect no settings when the table is empty
#[tokio::test]
async fn get_settings_empty_table() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let state = app_state(&test);

    let result = SettingsService::new(&state).get_settings().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap().is_none());

    Ok(())
}

/// Expect the stored document decoded
#[tokio::test]
async fn get_settings_decodes_document() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.store()
        .insert_settings("s1", json!({ "hard_banned_ips": ["10.0.0.1", "10.0.0.2"] }))
        .await?;
    let state = app_state(&test);

    let result = SettingsService::new(&state).get_settings().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let settings = result.unwrap().expect("settings row should exist");
    assert_eq!(settings.id, "s1");
    assert_eq!(settings.data.hard_banned_ips(), ["10.0.0.1", "10.0.0.2"]);
    assert_eq!(settings.created_at, "1/1/2024, 12:00:00 AM");
    assert_eq!(settings.modified_at, None);

    Ok(())
}

/// Expect a malformed stored document to be a retrieval failure
#[tokio::test]
async fn get_settings_malformed_document() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.store()
        .insert_settings("s1", json!({ "hard_banned_ips": "10.0.0.1" }))
        .await?;
    let state = app_state(&test);

    let result = SettingsService::new(&state).get_settings().await;

    assert!(matches!(result, Err(Error::RetrieveFailed { .. })));

    Ok(())
}

/// Expect the document replaced wholesale and the modification time stamped
#[tokio::test]
async fn update_settings_replaces_document() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.store()
        .insert_settings("s1", json!({ "hard_banned_ips": ["10.0.0.1"], "other": ["x"] }))
        .await?;
    let state = app_state(&test);
    let settings_service = SettingsService::new(&state);

    let mut data = SettingsData::default();
    data.set(HARD_BANNED_IPS, vec!["192.168.0.1".to_string()]);

    let result = settings_service.update_settings("s1", &data).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let updated = result.unwrap();
    assert_eq!(updated.data, data);
    assert!(updated.data.get("other").is_empty());
    assert!(updated.modified_at.is_some());

    let stored = settings_service.get_settings().await;
    assert!(stored.is_ok(), "Error: {:?}", stored);
    assert_eq!(stored.unwrap().map(|settings| settings.data), Some(data));

    Ok(())
}

/// Expect repeating an update to keep the document but advance the modification time
#[tokio::test]
async fn repeated_update_advances_modified_at() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.store()
        .insert_settings("s1", json!({ "hard_banned_ips": [] }))
        .await?;
    let state = app_state(&test);
    let settings_service = SettingsService::new(&state);

    let mut data = SettingsData::default();
    data.set(HARD_BANNED_IPS, vec!["10.0.0.9".to_string()]);

    let first = settings_service.update_settings("s1", &data).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = settings_service.update_settings("s1", &data).await;

    assert!(first.is_ok(), "Error: {:?}", first);
    assert!(second.is_ok(), "Error: {:?}", second);
    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.data, second.data);
    assert_ne!(first.modified_at, second.modified_at);

    Ok(())
}

/// Expect an unknown settings id to be an update failure
#[tokio::test]
async fn update_settings_unknown_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let state = app_state(&test);

    let result = SettingsService::new(&state)
        .update_settings("missing", &SettingsData::default())
        .await;

    let err = result.expect_err("unknown settings id should fail");
    assert_eq!(err.to_string(), "Failed to update Settings data for id missing");

    Ok(())
}
