use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::{data::contains_ci, model::PageRequest};

pub struct GameRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GameRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::game::Model>, DbErr> {
        entity::prelude::Game::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    pub async fn find_page(
        &self,
        condition: Condition,
        page: PageRequest,
    ) -> Result<Vec<entity::game::Model>, DbErr> {
        entity::prelude::Game::find()
            .filter(condition)
            .order_by_desc(entity::game::Column::CreatedAt)
            .order_by_asc(entity::game::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(self.db)
            .await
    }

    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        entity::prelude::Game::find()
            .filter(condition)
            .count(self.db)
            .await
    }

    /// Games of a company ordered by name.
    pub async fn find_by_company(
        &self,
        company_id: &str,
    ) -> Result<Vec<entity::game::Model>, DbErr> {
        entity::prelude::Game::find()
            .filter(entity::game::Column::CompanyId.eq(company_id))
            .order_by_asc(entity::game::Column::Name)
            .order_by_asc(entity::game::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns `(id, name)` pairs for the given ids; unknown ids are skipped.
    pub async fn get_names_by_ids(&self, ids: &[String]) -> Result<Vec<(String, String)>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Game::find()
            .select_only()
            .column(entity::game::Column::Id)
            .column(entity::game::Column::Name)
            .filter(entity::game::Column::Id.is_in(ids.iter().cloned()))
            .into_tuple::<(String, String)>()
            .all(self.db)
            .await
    }
}

/// Free-text match over game id, name and company id.
pub fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(contains_ci::<entity::game::Entity>(entity::game::Column::Id, term))
        .add(contains_ci::<entity::game::Entity>(entity::game::Column::Name, term))
        .add(contains_ci::<entity::game::Entity>(
            entity::game::Column::CompanyId,
            term,
        ))
}
