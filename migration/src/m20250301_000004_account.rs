use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_company::Company;

static IDX_ACCOUNT_COMPANY_ID: &str = "idx_account_company_id";
static FK_ACCOUNT_COMPANY_ID: &str = "fk_account_company_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(string(Account::Id).primary_key())
                    .col(string(Account::CompanyId))
                    .col(text_null(Account::Details))
                    .col(integer(Account::DetailsVersion).default(0))
                    .col(string_null(Account::EditedByCustomerId))
                    .col(string(Account::VerifyState))
                    .col(string_null(Account::VerifiedByCustomerId))
                    .col(big_integer(Account::CreatedAt))
                    .col(big_integer_null(Account::ModifiedAt))
                    .col(big_integer_null(Account::DeletedAt))
                    .col(big_integer_null(Account::ArchivedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_COMPANY_ID)
                    .table(Account::Table)
                    .col(Account::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ACCOUNT_COMPANY_ID)
                    .from_tbl(Account::Table)
                    .from_col(Account::CompanyId)
                    .to_tbl(Company::Table)
                    .to_col(Company::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ACCOUNT_COMPANY_ID)
                    .table(Account::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ACCOUNT_COMPANY_ID)
                    .table(Account::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Account {
    Table,
    Id,
    CompanyId,
    Details,
    DetailsVersion,
    EditedByCustomerId,
    VerifyState,
    VerifiedByCustomerId,
    CreatedAt,
    ModifiedAt,
    DeletedAt,
    ArchivedAt,
}
