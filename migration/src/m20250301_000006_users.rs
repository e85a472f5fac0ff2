use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000005_game::Game;

static IDX_USERS_GAME_ID: &str = "idx_users_game_id";
static IDX_USERS_EMAIL: &str = "idx_users_email";
static FK_USERS_GAME_ID: &str = "fk_users_game_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::Id).primary_key())
                    .col(string(Users::GameId))
                    .col(text_null(Users::Name))
                    .col(text_null(Users::Email))
                    .col(string_null(Users::Sub))
                    .col(string_null(Users::Country))
                    .col(string_null(Users::PlayerId))
                    .col(boolean(Users::Banned).default(false))
                    .col(big_integer_null(Users::LastLoginAt))
                    .col(big_integer_null(Users::LastVerifiedAt))
                    .col(big_integer(Users::CreatedAt))
                    .col(big_integer_null(Users::ModifiedAt))
                    .col(big_integer_null(Users::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USERS_GAME_ID)
                    .table(Users::Table)
                    .col(Users::GameId)
                    .to_owned(),
            )
            .await?;

        // Encrypted e-mails are searched by exact ciphertext equality
        manager
            .create_index(
                Index::create()
                    .name(IDX_USERS_EMAIL)
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USERS_GAME_ID)
                    .from_tbl(Users::Table)
                    .from_col(Users::GameId)
                    .to_tbl(Game::Table)
                    .to_col(Game::Id)
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
                    .name(FK_USERS_GAME_ID)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USERS_EMAIL)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USERS_GAME_ID)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    GameId,
    Name,
    Email,
    Sub,
    Country,
    PlayerId,
    Banned,
    LastLoginAt,
    LastVerifiedAt,
    CreatedAt,
    ModifiedAt,
    DeletedAt,
}
