use sea_orm::{
    sea_query::Query, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{data::contains_ci, model::PageRequest};

pub struct CompanyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::company::Model>, DbErr> {
        entity::prelude::Company::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// Newest companies first, ties broken by id
    pub async fn find_page(
        &self,
        condition: Condition,
        page: PageRequest,
    ) -> Result<Vec<entity::company::Model>, DbErr> {
        entity::prelude::Company::find()
            .filter(condition)
            .order_by_desc(entity::company::Column::CreatedAt)
            .order_by_asc(entity::company::Column::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(self.db)
            .await
    }

    pub async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        entity::prelude::Company::find()
            .filter(condition)
            .count(self.db)
            .await
    }

    /// Returns `(id, name)` pairs for the given ids; unknown ids are skipped.
    pub async fn get_names_by_ids(&self, ids: &[String]) -> Result<Vec<(String, String)>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Company::find()
            .select_only()
            .column(entity::company::Column::Id)
            .column(entity::company::Column::Name)
            .filter(entity::company::Column::Id.is_in(ids.iter().cloned()))
            .into_tuple::<(String, String)>()
            .all(self.db)
            .await
    }

    /// Returns `(id, name)` pairs for every company, ordered by name.
    pub async fn get_all_names(&self) -> Result<Vec<(String, String)>, DbErr> {
        entity::prelude::Company::find()
            .select_only()
            .column(entity::company::Column::Id)
            .column(entity::company::Column::Name)
            .order_by_asc(entity::company::Column::Name)
            .order_by_asc(entity::company::Column::Id)
            .into_tuple::<(String, String)>()
            .all(self.db)
            .await
    }
}

/// Free-text match over company id and name.
pub fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(contains_ci::<entity::company::Entity>(entity::company::Column::Id, term))
        .add(contains_ci::<entity::company::Entity>(entity::company::Column::Name, term))
}

/// Companies the customer is a member of.
pub fn member_condition(customer_id: &str) -> Condition {
    Condition::all().add(
        entity::company::Column::Id.in_subquery(
            Query::select()
                .column(entity::company_member::Column::CompanyId)
                .from(entity::company_member::Entity)
                .and_where(entity::company_member::Column::CustomerId.eq(customer_id))
                .to_owned(),
        ),
    )
}
