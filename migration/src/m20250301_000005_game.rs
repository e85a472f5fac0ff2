use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_company::Company;

static IDX_GAME_COMPANY_ID: &str = "idx_game_company_id";
static FK_GAME_COMPANY_ID: &str = "fk_game_company_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(string(Game::Id).primary_key())
                    .col(string(Game::CompanyId))
                    .col(string(Game::Name))
                    .col(text_null(Game::Description))
                    .col(string_null(Game::Url))
                    .col(string_null(Game::LoginType))
                    .col(json(Game::SocialMedias))
                    .col(json(Game::GameStores))
                    .col(string_null(Game::LocaleDefault))
                    .col(big_integer(Game::CreatedAt))
                    .col(big_integer_null(Game::ModifiedAt))
                    .col(big_integer_null(Game::DeletedAt))
                    .col(big_integer_null(Game::ArchivedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GAME_COMPANY_ID)
                    .table(Game::Table)
                    .col(Game::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GAME_COMPANY_ID)
                    .from_tbl(Game::Table)
                    .from_col(Game::CompanyId)
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
                    .name(FK_GAME_COMPANY_ID)
                    .table(Game::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GAME_COMPANY_ID)
                    .table(Game::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    Id,
    CompanyId,
    Name,
    Description,
    Url,
    LoginType,
    SocialMedias,
    GameStores,
    LocaleDefault,
    CreatedAt,
    ModifiedAt,
    DeletedAt,
    ArchivedAt,
}
