use sea_orm::{
    Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{data::contains_ci, model::PageRequest};

pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::account::Model>, DbErr> {
        entity::prelude::Account::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    pub async fn find_page(
        &self,
        condition: Condition,
        page: PageRequest,
    ) -> Result<Vec<entity::account::Model>, DbErr> {
        entity::prelude::Account::find()
            .filter(condition)
            .order_by_desc(entity::account::Column::CreatedAt)
            .order_by_asc(entity::account::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(self.db)
            .await
    }

    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        entity::prelude::Account::find()
            .filter(condition)
            .count(self.db)
            .await
    }
}

/// Free-text match over account id and company id.
pub fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(contains_ci::<entity::account::Entity>(entity::account::Column::Id, term))
        .add(contains_ci::<entity::account::Entity>(
            entity::account::Column::CompanyId,
            term,
        ))
}
