use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company_member::Entity")]
    CompanyMember,
}

impl Related<super::company_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
