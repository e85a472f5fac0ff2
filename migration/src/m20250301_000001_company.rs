use sea_orm_migration::{prelude::*, schema::*};

static IDX_COMPANY_NAME: &str = "idx_company_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(string(Company::Id).primary_key())
                    .col(string(Company::Name))
                    .col(string_null(Company::Url))
                    .col(string_null(Company::Size))
                    .col(json(Company::Domains))
                    .col(json(Company::ViewerDomains))
                    .col(string_null(Company::LogoUrl))
                    .col(big_integer(Company::CreatedAt))
                    .col(big_integer_null(Company::ModifiedAt))
                    .col(big_integer_null(Company::DeletedAt))
                    .col(big_integer_null(Company::ArchivedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPANY_NAME)
                    .table(Company::Table)
                    .col(Company::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPANY_NAME)
                    .table(Company::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Company::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Company {
    Table,
    Id,
    Name,
    Url,
    Size,
    Domains,
    ViewerDomains,
    LogoUrl,
    CreatedAt,
    ModifiedAt,
    DeletedAt,
    ArchivedAt,
}
