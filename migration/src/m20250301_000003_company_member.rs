use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20250301_000001_company::Company, m20250301_000002_customer::Customer};

static IDX_COMPANY_MEMBER_CUSTOMER_ID: &str = "idx_company_member_customer_id";
static FK_COMPANY_MEMBER_COMPANY_ID: &str = "fk_company_member_company_id";
static FK_COMPANY_MEMBER_CUSTOMER_ID: &str = "fk_company_member_customer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyMember::Table)
                    .if_not_exists()
                    .col(pk_auto(CompanyMember::Id))
                    .col(string(CompanyMember::CompanyId))
                    .col(string(CompanyMember::CustomerId))
                    .col(big_integer(CompanyMember::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMPANY_MEMBER_CUSTOMER_ID)
                    .table(CompanyMember::Table)
                    .col(CompanyMember::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPANY_MEMBER_COMPANY_ID)
                    .from_tbl(CompanyMember::Table)
                    .from_col(CompanyMember::CompanyId)
                    .to_tbl(Company::Table)
                    .to_col(Company::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMPANY_MEMBER_CUSTOMER_ID)
                    .from_tbl(CompanyMember::Table)
                    .from_col(CompanyMember::CustomerId)
                    .to_tbl(Customer::Table)
                    .to_col(Customer::Id)
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
                    .name(FK_COMPANY_MEMBER_CUSTOMER_ID)
                    .table(CompanyMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMPANY_MEMBER_COMPANY_ID)
                    .table(CompanyMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMPANY_MEMBER_CUSTOMER_ID)
                    .table(CompanyMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CompanyMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CompanyMember {
    Table,
    Id,
    CompanyId,
    CustomerId,
    CreatedAt,
}
