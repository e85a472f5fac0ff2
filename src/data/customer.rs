use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

pub struct CustomerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CustomerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns `(id, name)` pairs for the given ids; unknown ids are skipped.
    pub async fn get_names_by_ids(&self, ids: &[String]) -> Result<Vec<(String, String)>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Customer::find()
            .select_only()
            .column(entity::customer::Column::Id)
            .column(entity::customer::Column::Name)
            .filter(entity::customer::Column::Id.is_in(ids.iter().cloned()))
            .into_tuple::<(String, String)>()
            .all(self.db)
            .await
    }

    /// Ids of the companies the customer is a member of.
    pub async fn get_company_ids(&self, customer_id: &str) -> Result<Vec<String>, DbErr> {
        entity::prelude::CompanyMember::find()
            .select_only()
            .column(entity::company_member::Column::CompanyId)
            .filter(entity::company_member::Column::CustomerId.eq(customer_id))
            .distinct()
            .into_tuple::<String>()
            .all(self.db)
            .await
    }
}
