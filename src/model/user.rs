use serde::{Deserialize, Serialize};

/// Player registered in a game.
///
/// `name` and `email` are decrypted. `company_id`, `company_name`, `game_name` and
/// `game_link` are `None` when the owning game no longer exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub sub: Option<String>,
    pub country: Option<String>,
    pub game_id: String,
    pub game_name: Option<String>,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub player_id: Option<String>,
    /// `"yes"` or `"no"`.
    pub banned: String,
    pub last_login_at: Option<String>,
    pub last_verified_at: Option<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
    pub deleted_at: Option<String>,
    pub game_link: Option<String>,
}
