//! Relational fixture insertion.
//!
//! Parents are created on demand: inserting a game for a company that doesn't exist yet
//! creates the company first, so tests only spell out the rows they care about.

use sea_orm::{ActiveValue, EntityTrait, JsonValue};

use crate::{
    constant::TEST_CREATED_AT,
    error::TestError,
    fixtures::store::{factory, StoreFixtures},
};

impl<'a> StoreFixtures<'a> {
    /// Insert a company, or return the existing row with the same id.
    ///
    /// # Arguments
    /// - `id` - Company id
    /// - `name` - Display name, ignored when the company already exists
    ///
    /// # Returns
    /// - `Ok(company::Model)` - The created or existing company
    /// - `Err(TestError::DbErr)` - Query or insert failed
    pub async fn insert_company(
        &self,
        id: &str,
        name: &str,
    ) -> Result<entity::company::Model, TestError> {
        if let Some(existing) = entity::prelude::Company::find_by_id(id.to_string())
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        self.insert_company_model(factory::company(id, name)).await
    }

    /// Insert a company model as-is.
    pub async fn insert_company_model(
        &self,
        company: entity::company::Model,
    ) -> Result<entity::company::Model, TestError> {
        Ok(
            entity::prelude::Company::insert(entity::company::ActiveModel {
                id: ActiveValue::Set(company.id),
                name: ActiveValue::Set(company.name),
                url: ActiveValue::Set(company.url),
                size: ActiveValue::Set(company.size),
                domains: ActiveValue::Set(company.domains),
                viewer_domains: ActiveValue::Set(company.viewer_domains),
                logo_url: ActiveValue::Set(company.logo_url),
                created_at: ActiveValue::Set(company.created_at),
                modified_at: ActiveValue::Set(company.modified_at),
                deleted_at: ActiveValue::Set(company.deleted_at),
                archived_at: ActiveValue::Set(company.archived_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a customer, or return the existing row with the same id.
    pub async fn insert_customer(
        &self,
        id: &str,
        name: &str,
    ) -> Result<entity::customer::Model, TestError> {
        if let Some(existing) = entity::prelude::Customer::find_by_id(id.to_string())
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let customer = factory::customer(id, name);

        Ok(
            entity::prelude::Customer::insert(entity::customer::ActiveModel {
                id: ActiveValue::Set(customer.id),
                name: ActiveValue::Set(customer.name),
                email: ActiveValue::Set(customer.email),
                created_at: ActiveValue::Set(customer.created_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Make a customer a member of a company, creating both if needed.
    pub async fn insert_membership(
        &self,
        company_id: &str,
        customer_id: &str,
    ) -> Result<entity::company_member::Model, TestError> {
        self.insert_company(company_id, &format!("Company {}", company_id))
            .await?;
        self.insert_customer(customer_id, &format!("Customer {}", customer_id))
            .await?;

        Ok(
            entity::prelude::CompanyMember::insert(entity::company_member::ActiveModel {
                company_id: ActiveValue::Set(company_id.to_string()),
                customer_id: ActiveValue::Set(customer_id.to_string()),
                created_at: ActiveValue::Set(TEST_CREATED_AT),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an account model; its company must already exist.
    pub async fn insert_account(
        &self,
        account: entity::account::Model,
    ) -> Result<entity::account::Model, TestError> {
        Ok(
            entity::prelude::Account::insert(entity::account::ActiveModel {
                id: ActiveValue::Set(account.id),
                company_id: ActiveValue::Set(account.company_id),
                details: ActiveValue::Set(account.details),
                details_version: ActiveValue::Set(account.details_version),
                edited_by_customer_id: ActiveValue::Set(account.edited_by_customer_id),
                verify_state: ActiveValue::Set(account.verify_state),
                verified_by_customer_id: ActiveValue::Set(account.verified_by_customer_id),
                created_at: ActiveValue::Set(account.created_at),
                modified_at: ActiveValue::Set(account.modified_at),
                deleted_at: ActiveValue::Set(account.deleted_at),
                archived_at: ActiveValue::Set(account.archived_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a game, creating its company if needed.
    pub async fn insert_game(
        &self,
        id: &str,
        company_id: &str,
        name: &str,
    ) -> Result<entity::game::Model, TestError> {
        self.insert_company(company_id, &format!("Company {}", company_id))
            .await?;

        self.insert_game_model(factory::game(id, company_id, name))
            .await
    }

    /// Insert a game model; its company must already exist.
    pub async fn insert_game_model(
        &self,
        game: entity::game::Model,
    ) -> Result<entity::game::Model, TestError> {
        Ok(
            entity::prelude::Game::insert(entity::game::ActiveModel {
                id: ActiveValue::Set(game.id),
                company_id: ActiveValue::Set(game.company_id),
                name: ActiveValue::Set(game.name),
                description: ActiveValue::Set(game.description),
                url: ActiveValue::Set(game.url),
                login_type: ActiveValue::Set(game.login_type),
                social_medias: ActiveValue::Set(game.social_medias),
                game_stores: ActiveValue::Set(game.game_stores),
                locale_default: ActiveValue::Set(game.locale_default),
                created_at: ActiveValue::Set(game.created_at),
                modified_at: ActiveValue::Set(game.modified_at),
                deleted_at: ActiveValue::Set(game.deleted_at),
                archived_at: ActiveValue::Set(game.archived_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a user model; its game must already exist.
    ///
    /// `name` and `email` are stored as given, so pass ciphertext when the code under test
    /// decrypts them.
    pub async fn insert_user(
        &self,
        user: entity::user::Model,
    ) -> Result<entity::user::Model, TestError> {
        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                id: ActiveValue::Set(user.id),
                game_id: ActiveValue::Set(user.game_id),
                name: ActiveValue::Set(user.name),
                email: ActiveValue::Set(user.email),
                sub: ActiveValue::Set(user.sub),
                country: ActiveValue::Set(user.country),
                player_id: ActiveValue::Set(user.player_id),
                banned: ActiveValue::Set(user.banned),
                last_login_at: ActiveValue::Set(user.last_login_at),
                last_verified_at: ActiveValue::Set(user.last_verified_at),
                created_at: ActiveValue::Set(user.created_at),
                modified_at: ActiveValue::Set(user.modified_at),
                deleted_at: ActiveValue::Set(user.deleted_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert the settings row.
    pub async fn insert_settings(
        &self,
        id: &str,
        data: JsonValue,
    ) -> Result<entity::settings::Model, TestError> {
        let settings = factory::settings(id, data);

        Ok(
            entity::prelude::Settings::insert(entity::settings::ActiveModel {
                id: ActiveValue::Set(settings.id),
                data: ActiveValue::Set(settings.data),
                created_at: ActiveValue::Set(settings.created_at),
                modified_at: ActiveValue::Set(settings.modified_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
