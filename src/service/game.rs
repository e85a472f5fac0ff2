//! Game service.

use sea_orm::{ColumnTrait, Condition, DbErr};

use crate::{
    data::{
        customer::CustomerRepository,
        game::{search_condition, GameRepository},
        within,
    },
    error::Error,
    model::{
        app::AppState,
        filter::{non_blank, GameFilter},
        game::GameEntity,
        EntityKind, Page, PageRequest,
    },
    service::cache::{ReferenceCache, ReferenceIds, ReferenceResolver},
    util::{
        link::DashboardLinks,
        time::{format_optional_timestamp, format_timestamp},
    },
};

/// Reads games, resolving company names.
pub struct GameService<'a> {
    state: &'a AppState,
}

impl<'a> GameService<'a> {
    /// Creates a new instance of GameService.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Retrieves one game.
    ///
    /// # Returns
    /// - `Ok(Vec<GameEntity>)` - A one-element vector
    /// - `Err(Error::RetrieveFailed)` - Game not found or a query failed
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<GameEntity>, Error> {
        self.fetch_by_id(id).await.map_err(|e| {
            Error::retrieve_failed(EntityKind::Game, "get_by_id", format!("id {}", id), e)
        })
    }

    /// Retrieves one page of games matching `condition`.
    ///
    /// # Arguments
    /// - `page` - 1-based page number
    /// - `page_size` - Rows per page
    /// - `condition` - Store condition used for both the page and the count
    pub async fn get_page(
        &self,
        page: u64,
        page_size: u64,
        condition: Condition,
    ) -> Result<Page<GameEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), condition)
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::Game, "get_page", format!("page {}", page), e)
            })
    }

    /// Retrieves one page of games matching `filter`.
    ///
    /// A `customer_id` filter first resolves the customer's companies, then restricts games
    /// to those companies.
    pub async fn get_by_filter(
        &self,
        page: u64,
        page_size: u64,
        filter: &GameFilter,
    ) -> Result<Page<GameEntity>, Error> {
        let result = match self.filter_condition(filter).await {
            Ok(condition) => {
                self.fetch_page(PageRequest::new(page, page_size), condition)
                    .await
            }
            Err(e) => Err(e.into()),
        };

        result.map_err(|e| {
            Error::retrieve_failed(EntityKind::Game, "get_by_filter", format!("page {}", page), e)
        })
    }

    /// Retrieves every game of a company, ordered by name.
    pub async fn get_by_company(&self, company_id: &str) -> Result<Vec<GameEntity>, Error> {
        self.fetch_by_company(company_id).await.map_err(|e| {
            Error::retrieve_failed(
                EntityKind::Game,
                "get_by_company",
                format!("company {}", company_id),
                e,
            )
        })
    }

    /// Builds the store condition for a game filter.
    pub async fn filter_condition(&self, filter: &GameFilter) -> Result<Condition, DbErr> {
        let mut condition = Condition::all();

        if let Some(term) = non_blank(&filter.selected_fields) {
            condition = condition.add(search_condition(term));
        }
        if let Some(company_id) = non_blank(&filter.company_id) {
            condition = condition.add(entity::game::Column::CompanyId.eq(company_id));
        }
        if let Some(customer_id) = non_blank(&filter.customer_id) {
            let company_ids = CustomerRepository::new(&self.state.db)
                .get_company_ids(customer_id)
                .await?;
            condition = condition.add(entity::game::Column::CompanyId.is_in(company_ids));
        }
        if let Some(range) = &filter.created_at {
            condition = condition.add(within(entity::game::Column::CreatedAt, range));
        }

        Ok(condition)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Vec<GameEntity>, Error> {
        let game = GameRepository::new(&self.state.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("game {}", id)))?;

        self.map_with_references(vec![game]).await
    }

    async fn fetch_by_company(&self, company_id: &str) -> Result<Vec<GameEntity>, Error> {
        let games = GameRepository::new(&self.state.db)
            .find_by_company(company_id)
            .await?;

        self.map_with_references(games).await
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        condition: Condition,
    ) -> Result<Page<GameEntity>, Error> {
        let game_repo = GameRepository::new(&self.state.db);

        let (games, total) = tokio::try_join!(
            game_repo.find_page(condition.clone(), page),
            game_repo.count(condition),
        )?;

        Ok(Page {
            data: self.map_with_references(games).await?,
            total,
        })
    }

    async fn map_with_references(
        &self,
        games: Vec<entity::game::Model>,
    ) -> Result<Vec<GameEntity>, Error> {
        let mut ids = ReferenceIds::new();
        for game in &games {
            ids.company(Some(&game.company_id));
        }

        let mut cache = ReferenceCache::new();
        ReferenceResolver::new(&self.state.db)
            .resolve(&mut cache, &ids)
            .await?;

        Ok(games
            .into_iter()
            .map(|game| map_game(game, &cache, &self.state.links))
            .collect())
    }
}

/// Maps a game row, reading the company name from `cache`.
pub fn map_game(
    game: entity::game::Model,
    cache: &ReferenceCache,
    links: &DashboardLinks,
) -> GameEntity {
    GameEntity {
        company_name: cache.company_name(&game.company_id),
        game_link: links.game(&game.company_id, &game.id),
        created_at: format_timestamp(game.created_at),
        modified_at: format_optional_timestamp(game.modified_at),
        deleted_at: format_optional_timestamp(game.deleted_at),
        archived_at: format_optional_timestamp(game.archived_at),
        id: game.id,
        company_id: game.company_id,
        name: game.name,
        description: game.description,
        url: game.url,
        login_type: game.login_type,
        social_medias: game.social_medias,
        game_stores: game.game_stores,
        locale_default: game.locale_default,
    }
}
