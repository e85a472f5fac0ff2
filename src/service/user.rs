//! User service.

use sea_orm::{ColumnTrait, Condition, DbErr};

use crate::{
    crypto::{
        field::{USER_EMAIL, USER_NAME},
        FieldCipher,
    },
    data::{
        user::{company_condition, search_condition, UserRepository, UserWithGame},
        within,
    },
    error::Error,
    model::{
        app::AppState,
        filter::{non_blank, UserFilter},
        user::UserEntity,
        EntityKind, Page, PageRequest,
    },
    service::cache::{ReferenceCache, ReferenceIds, ReferenceResolver},
    util::{
        link::DashboardLinks,
        time::{format_optional_timestamp, format_timestamp},
    },
};

/// Reads users, decrypting name and e-mail and resolving game and company names.
pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of UserService.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Retrieves one user.
    ///
    /// # Returns
    /// - `Ok(Vec<UserEntity>)` - A one-element vector
    /// - `Err(Error::RetrieveFailed)` - User not found or a query failed
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<UserEntity>, Error> {
        self.fetch_by_id(id).await.map_err(|e| {
            Error::retrieve_failed(EntityKind::User, "get_by_id", format!("id {}", id), e)
        })
    }

    /// Retrieves one page of users matching `condition`.
    ///
    /// The condition may only reference columns of the users table.
    pub async fn get_page(
        &self,
        page: u64,
        page_size: u64,
        condition: Condition,
    ) -> Result<Page<UserEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), condition)
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::User, "get_page", format!("page {}", page), e)
            })
    }

    /// Retrieves one page of users matching `filter`.
    ///
    /// The search term also matches users whose stored name or e-mail equals its ciphertext.
    pub async fn get_by_filter(
        &self,
        page: u64,
        page_size: u64,
        filter: &UserFilter,
    ) -> Result<Page<UserEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), self.filter_condition(filter))
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::User, "get_by_filter", format!("page {}", page), e)
            })
    }

    /// Builds the store condition for a user filter.
    pub fn filter_condition(&self, filter: &UserFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(term) = non_blank(&filter.selected_fields) {
            // name and email share a scheme, so one ciphertext matches both
            let encrypted = self.state.cipher.encrypt_field(USER_EMAIL, term);
            condition = condition.add(search_condition(term, &encrypted));
        }
        if let Some(game_id) = non_blank(&filter.game_id) {
            condition = condition.add(entity::user::Column::GameId.eq(game_id));
        }
        if let Some(company_id) = non_blank(&filter.company_id) {
            condition = condition.add(company_condition(company_id));
        }
        if let Some(banned) = filter.banned {
            condition = condition.add(entity::user::Column::Banned.eq(banned));
        }
        if let Some(range) = &filter.created_at {
            condition = condition.add(within(entity::user::Column::CreatedAt, range));
        }

        condition
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Vec<UserEntity>, Error> {
        let user = UserRepository::new(&self.state.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {}", id)))?;

        self.map_with_references(vec![user]).await
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        condition: Condition,
    ) -> Result<Page<UserEntity>, Error> {
        let user_repo = UserRepository::new(&self.state.db);

        let (users, total) = tokio::try_join!(
            user_repo.find_page(condition.clone(), page),
            user_repo.count(condition),
        )?;

        Ok(Page {
            data: self.map_with_references(users).await?,
            total,
        })
    }

    async fn map_with_references(&self, users: Vec<UserWithGame>) -> Result<Vec<UserEntity>, Error> {
        let mut ids = ReferenceIds::new();
        for (_, game) in &users {
            ids.company(game.as_ref().map(|game| game.company_id.as_str()));
        }

        let mut cache = ReferenceCache::new();
        ReferenceResolver::new(&self.state.db)
            .resolve(&mut cache, &ids)
            .await?;

        Ok(users
            .into_iter()
            .map(|(user, game)| {
                map_user(user, game, &cache, &self.state.cipher, &self.state.links)
            })
            .collect())
    }
}

/// Maps a user row joined with its game.
///
/// Without a game row the game name, company and link are `None`.
pub fn map_user(
    user: entity::user::Model,
    game: Option<entity::game::Model>,
    cache: &ReferenceCache,
    cipher: &FieldCipher,
    links: &DashboardLinks,
) -> UserEntity {
    let company_id = game.as_ref().map(|game| game.company_id.clone());

    UserEntity {
        name: cipher.decrypt_field(USER_NAME, user.name.as_deref()),
        email: cipher.decrypt_field(USER_EMAIL, user.email.as_deref()),
        company_name: company_id.as_deref().and_then(|id| cache.company_name(id)),
        game_link: game
            .as_ref()
            .map(|game| links.game(&game.company_id, &game.id)),
        game_name: game.map(|game| game.name),
        company_id,
        banned: if user.banned { "yes" } else { "no" }.to_string(),
        last_login_at: format_optional_timestamp(user.last_login_at),
        last_verified_at: format_optional_timestamp(user.last_verified_at),
        created_at: format_timestamp(user.created_at),
        modified_at: format_optional_timestamp(user.modified_at),
        deleted_at: format_optional_timestamp(user.deleted_at),
        id: user.id,
        sub: user.sub,
        country: user.country,
        game_id: user.game_id,
        player_id: user.player_id,
    }
}
