//! Tests for UserService.

use sea_orm::Condition;

use super::*;
use crate::{
    crypto::{
        field::{USER_EMAIL, USER_NAME},
        FieldCipher,
    },
    model::filter::UserFilter,
    service::user::UserService,
};

/// Insert two users of game g1 (company c1), one with encrypted name and e-mail.
async fn seed_users(test: &mut TestContext) -> Result<(), TestError> {
    let cipher = FieldCipher::new(Some(TEST_ENCRYPTION_KEY));

    let mut ada = factory::user("u1", "g1");
    ada.name = Some(cipher.encrypt_field(USER_NAME, "Ada"));
    ada.email = Some(cipher.encrypt_field(USER_EMAIL, "a@x.com"));
    test.store().insert_user(ada).await?;

    let mut bob = factory::user("u2", "g1");
    bob.email = Some(cipher.encrypt_field(USER_EMAIL, "b@x.com"));
    bob.banned = true;
    test.store().insert_user(bob).await?;

    Ok(())
}

/// Expect decrypted PII and the game and company resolved
#[tokio::test]
async fn get_by_id_decrypts_and_resolves() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_company("c1", "Acme")
        .with_game("g1", "c1", "Space Miner")
        .build()
        .await?;
    seed_users(&mut test).await?;
    let state = app_state(&test);

    let result = UserService::new(&state).get_by_id("u1").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let users = result.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name.as_deref(), Some("Ada"));
    assert_eq!(users[0].email.as_deref(), Some("a@x.com"));
    assert_eq!(users[0].game_name.as_deref(), Some("Space Miner"));
    assert_eq!(users[0].company_id.as_deref(), Some("c1"));
    assert_eq!(users[0].company_name.as_deref(), Some("Acme"));
    assert_eq!(users[0].banned, "no");
    assert_eq!(
        users[0].game_link.as_deref(),
        Some("https://dashboard.test/company/c1/g1")
    );

    Ok(())
}

/// Expect company names resolved per user across companies, and absent for a missing company
#[tokio::test]
async fn get_page_resolves_company_per_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_company("c1", "Acme")
        .with_company("c2", "Globex")
        .with_game("g1", "c1", "Space Miner")
        .with_game("g2", "c2", "Farm Life")
        .build()
        .await?;
    test.disable_foreign_keys().await?;
    test.store()
        .insert_game_model(factory::game("g3", "gone", "Orphan"))
        .await?;
    for (offset, (id, game_id)) in [("u1", "g1"), ("u2", "g2"), ("u3", "g3")]
        .into_iter()
        .enumerate()
    {
        let mut user = factory::user(id, game_id);
        user.created_at -= offset as i64;
        test.store().insert_user(user).await?;
    }
    let state = app_state(&test);

    let page = UserService::new(&state)
        .get_page(1, 10, Condition::all())
        .await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert_eq!(page.total, 3);
    let resolved: Vec<(&str, Option<&str>, Option<&str>)> = page
        .data
        .iter()
        .map(|user| {
            (
                user.id.as_str(),
                user.company_id.as_deref(),
                user.company_name.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        resolved,
        [
            ("u1", Some("c1"), Some("Acme")),
            ("u2", Some("c2"), Some("Globex")),
            ("u3", Some("gone"), None),
        ]
    );
    assert_eq!(page.data[2].game_name.as_deref(), Some("Orphan"));

    Ok(())
}

/// Expect a plaintext e-mail search to match the stored ciphertext exactly
#[tokio::test]
async fn search_matches_encrypted_email() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_game("g1", "c1", "Space Miner")
        .build()
        .await?;
    seed_users(&mut test).await?;
    let state = app_state(&test);

    let filter = UserFilter {
        selected_fields: Some("a@x.com".to_string()),
        ..Default::default()
    };
    let page = UserService::new(&state).get_by_filter(1, 10, &filter).await;

    assert!(page.is_ok(), "Error: {:?}", page);
    let page = page.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, "u1");
    assert_eq!(page.data[0].email.as_deref(), Some("a@x.com"));

    Ok(())
}

/// Expect the banned and company filters to combine
#[tokio::test]
async fn banned_and_company_filters() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .with_game("g1", "c1", "Space Miner")
        .with_game("g2", "c2", "Farm Life")
        .build()
        .await?;
    seed_users(&mut test).await?;
    let mut other = factory::user("u3", "g2");
    other.banned = true;
    test.store().insert_user(other).await?;
    let state = app_state(&test);
    let user_service = UserService::new(&state);

    let banned_in_c1 = user_service
        .get_by_filter(
            1,
            10,
            &UserFilter {
                company_id: Some("c1".to_string()),
                banned: Some(true),
                ..Default::default()
            },
        )
        .await;
    let unbanned = user_service
        .get_by_filter(
            1,
            10,
            &UserFilter {
                banned: Some(false),
                ..Default::default()
            },
        )
        .await;

    assert!(banned_in_c1.is_ok(), "Error: {:?}", banned_in_c1);
    assert!(unbanned.is_ok(), "Error: {:?}", unbanned);
    let banned_in_c1 = banned_in_c1.unwrap();
    assert_eq!(banned_in_c1.total, 1);
    assert_eq!(banned_in_c1.data[0].id, "u2");
    assert_eq!(banned_in_c1.data[0].banned, "yes");
    assert_eq!(unbanned.unwrap().total, 1);

    Ok(())
}

/// Expect a missing user to be reported as a retrieval failure
#[tokio::test]
async fn get_by_id_unknown_fails() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;
    let state = app_state(&test);

    let result = UserService::new(&state).get_by_id("missing").await;

    let err = result.expect_err("missing user should fail");
    assert_eq!(err.to_string(), "Failed to retrieve User data for id missing");

    Ok(())
}
