use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub size: Option<String>,
    /// JSON array of e-mail domains owned by the company.
    pub domains: Json,
    /// JSON array of domains granted read-only dashboard access.
    pub viewer_domains: Json,
    pub logo_url: Option<String>,
    pub created_at: i64,
    pub modified_at: Option<i64>,
    pub deleted_at: Option<i64>,
    pub archived_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account::Entity")]
    Account,
    #[sea_orm(has_many = "super::company_member::Entity")]
    CompanyMember,
    #[sea_orm(has_many = "super::game::Entity")]
    Game,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::company_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyMember.def()
    }
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
