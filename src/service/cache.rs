//! Request-scoped id→name dictionaries.
//!
//! A [`ReferenceCache`] lives for one service call. After a page is fetched the service
//! collects the foreign keys it needs into [`ReferenceIds`] and hands both to
//! [`ReferenceResolver::resolve`], which looks up only the ids not cached yet, one batched
//! query per dictionary, all dictionaries concurrently. Names are best-effort: an id with no
//! row reads as `None`.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ConnectionTrait, DbErr};

use crate::data::{
    company::CompanyRepository, customer::CustomerRepository, game::GameRepository,
};

/// Names resolved so far in one request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceCache {
    companies: HashMap<String, String>,
    customers: HashMap<String, String>,
    games: HashMap<String, String>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company_name(&self, id: &str) -> Option<String> {
        self.companies.get(id).cloned()
    }

    pub fn customer_name(&self, id: &str) -> Option<String> {
        self.customers.get(id).cloned()
    }

    pub fn game_name(&self, id: &str) -> Option<String> {
        self.games.get(id).cloned()
    }

    pub fn insert_companies(&mut self, names: impl IntoIterator<Item = (String, String)>) {
        self.companies.extend(names);
    }

    pub fn insert_customers(&mut self, names: impl IntoIterator<Item = (String, String)>) {
        self.customers.extend(names);
    }

    pub fn insert_games(&mut self, names: impl IntoIterator<Item = (String, String)>) {
        self.games.extend(names);
    }
}

fn missing(cached: &HashMap<String, String>, wanted: &BTreeSet<String>) -> Vec<String> {
    wanted
        .iter()
        .filter(|id| !cached.contains_key(*id))
        .cloned()
        .collect()
}

/// Distinct, non-empty foreign keys to resolve.
#[derive(Clone, Debug, Default)]
pub struct ReferenceIds {
    companies: BTreeSet<String>,
    customers: BTreeSet<String>,
    games: BTreeSet<String>,
}

impl ReferenceIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(&mut self, id: Option<&str>) {
        insert_non_empty(&mut self.companies, id);
    }

    pub fn customer(&mut self, id: Option<&str>) {
        insert_non_empty(&mut self.customers, id);
    }

    pub fn game(&mut self, id: Option<&str>) {
        insert_non_empty(&mut self.games, id);
    }
}

fn insert_non_empty(set: &mut BTreeSet<String>, id: Option<&str>) {
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        set.insert(id.to_string());
    }
}

/// Fills a [`ReferenceCache`] from the relational store.
pub struct ReferenceResolver<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReferenceResolver<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Looks up every id in `ids` that `cache` doesn't hold yet.
    ///
    /// # Arguments
    /// - `cache` - Request cache, extended in place
    /// - `ids` - Foreign keys needed by the current page
    ///
    /// # Returns
    /// - `Ok(())` - Every found name is now cached
    /// - `Err(DbErr)` - A lookup query failed; the cache is left unchanged
    pub async fn resolve(&self, cache: &mut ReferenceCache, ids: &ReferenceIds) -> Result<(), DbErr> {
        let company_ids = missing(&cache.companies, &ids.companies);
        let customer_ids = missing(&cache.customers, &ids.customers);
        let game_ids = missing(&cache.games, &ids.games);

        let company_repo = CompanyRepository::new(self.db);
        let customer_repo = CustomerRepository::new(self.db);
        let game_repo = GameRepository::new(self.db);

        let (companies, customers, games) = tokio::try_join!(
            company_repo.get_names_by_ids(&company_ids),
            customer_repo.get_names_by_ids(&customer_ids),
            game_repo.get_names_by_ids(&game_ids),
        )?;

        cache.insert_companies(companies);
        cache.insert_customers(customers);
        cache.insert_games(games);

        Ok(())
    }
}
