use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Game published by a company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEntity {
    pub id: String,
    pub company_id: String,
    pub company_name: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub login_type: Option<String>,
    /// Stored JSON, passed through unchanged.
    pub social_medias: Value,
    /// Stored JSON, passed through unchanged.
    pub game_stores: Value,
    pub locale_default: Option<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
    pub deleted_at: Option<String>,
    pub archived_at: Option<String>,
    pub game_link: String,
}
