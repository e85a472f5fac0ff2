pub use sea_orm_migration::prelude::*;

mod m20250301_000001_company;
mod m20250301_000002_customer;
mod m20250301_000003_company_member;
mod m20250301_000004_account;
mod m20250301_000005_game;
mod m20250301_000006_users;
mod m20250301_000007_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_company::Migration),
            Box::new(m20250301_000002_customer::Migration),
            Box::new(m20250301_000003_company_member::Migration),
            Box::new(m20250301_000004_account::Migration),
            Box::new(m20250301_000005_game::Migration),
            Box::new(m20250301_000006_users::Migration),
            Box::new(m20250301_000007_settings::Migration),
        ]
    }
}
