use sea_orm::{
    sea_query::Query, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{data::contains_ci, model::PageRequest};

/// A user row with its game, `None` when the game row is gone.
pub type UserWithGame = (entity::user::Model, Option<entity::game::Model>);

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserWithGame>, DbErr> {
        entity::prelude::User::find_by_id(id.to_string())
            .find_also_related(entity::game::Entity)
            .one(self.db)
            .await
    }

    pub async fn find_page(
        &self,
        condition: Condition,
        page: PageRequest,
    ) -> Result<Vec<UserWithGame>, DbErr> {
        entity::prelude::User::find()
            .find_also_related(entity::game::Entity)
            .filter(condition)
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_asc(entity::user::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(self.db)
            .await
    }

    /// Counts without the game join; conditions must only reference the users table.
    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(condition)
            .count(self.db)
            .await
    }
}

/// Free-text match over user id, sub and player id, or an exact match of the stored
/// (encrypted) name or e-mail.
///
/// # Arguments
/// - `term` - Search term as typed
/// - `encrypted_term` - `term` encrypted with the scheme used for `users.name`/`users.email`
pub fn search_condition(term: &str, encrypted_term: &str) -> Condition {
    Condition::any()
        .add(contains_ci::<entity::user::Entity>(entity::user::Column::Id, term))
        .add(contains_ci::<entity::user::Entity>(entity::user::Column::Sub, term))
        .add(contains_ci::<entity::user::Entity>(
            entity::user::Column::PlayerId,
            term,
        ))
        .add(entity::user::Column::Email.eq(encrypted_term))
        .add(entity::user::Column::Name.eq(encrypted_term))
}

/// Users of games owned by the company.
pub fn company_condition(company_id: &str) -> Condition {
    Condition::all().add(
        entity::user::Column::GameId.in_subquery(
            Query::select()
                .column(entity::game::Column::Id)
                .from(entity::game::Entity)
                .and_where(entity::game::Column::CompanyId.eq(company_id))
                .to_owned(),
        ),
    )
}
