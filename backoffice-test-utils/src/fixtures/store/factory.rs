//! Factory functions for in-memory entity models.
//!
//! Models carry fixed test values and [`TEST_CREATED_AT`] as creation time. Nothing here
//! touches the database; use them directly in mapper tests or pass them to the insert
//! helpers after adjusting fields.

use sea_orm::JsonValue;
use serde_json::json;

use crate::constant::TEST_CREATED_AT;

/// Company with empty domain lists.
pub fn company(id: &str, name: &str) -> entity::company::Model {
    entity::company::Model {
        id: id.to_string(),
        name: name.to_string(),
        url: Some(format!("https://{}.example.com", id)),
        size: Some("1-10".to_string()),
        domains: json!([]),
        viewer_domains: json!([]),
        logo_url: None,
        created_at: TEST_CREATED_AT,
        modified_at: None,
        deleted_at: None,
        archived_at: None,
    }
}

pub fn customer(id: &str, name: &str) -> entity::customer::Model {
    entity::customer::Model {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        created_at: TEST_CREATED_AT,
    }
}

/// Unverified account without details or editors.
pub fn account(id: &str, company_id: &str) -> entity::account::Model {
    entity::account::Model {
        id: id.to_string(),
        company_id: company_id.to_string(),
        details: None,
        details_version: 1,
        edited_by_customer_id: None,
        verify_state: "pending".to_string(),
        verified_by_customer_id: None,
        created_at: TEST_CREATED_AT,
        modified_at: None,
        deleted_at: None,
        archived_at: None,
    }
}

pub fn game(id: &str, company_id: &str, name: &str) -> entity::game::Model {
    entity::game::Model {
        id: id.to_string(),
        company_id: company_id.to_string(),
        name: name.to_string(),
        description: None,
        url: None,
        login_type: Some("email".to_string()),
        social_medias: json!([]),
        game_stores: json!([]),
        locale_default: Some("en".to_string()),
        created_at: TEST_CREATED_AT,
        modified_at: None,
        deleted_at: None,
        archived_at: None,
    }
}

/// Unbanned user without name or e-mail.
pub fn user(id: &str, game_id: &str) -> entity::user::Model {
    entity::user::Model {
        id: id.to_string(),
        game_id: game_id.to_string(),
        name: None,
        email: None,
        sub: Some(format!("sub-{}", id)),
        country: Some("DE".to_string()),
        player_id: Some(format!("player-{}", id)),
        banned: false,
        last_login_at: None,
        last_verified_at: None,
        created_at: TEST_CREATED_AT,
        modified_at: None,
        deleted_at: None,
    }
}

pub fn settings(id: &str, data: JsonValue) -> entity::settings::Model {
    entity::settings::Model {
        id: id.to_string(),
        data,
        created_at: TEST_CREATED_AT,
        modified_at: None,
    }
}
