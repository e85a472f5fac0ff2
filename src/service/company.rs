//! Company service.

use sea_orm::{Condition, DbErr};

use crate::{
    data::{
        company::{member_condition, search_condition, CompanyRepository},
        within,
    },
    error::Error,
    model::{
        app::AppState,
        company::{CompanyEntity, CompanyName},
        filter::{non_blank, CompanyFilter},
        EntityKind, Page, PageRequest,
    },
    service::string_list,
    util::{
        link::DashboardLinks,
        time::{format_optional_timestamp, format_timestamp},
    },
};

/// Reads companies.
pub struct CompanyService<'a> {
    state: &'a AppState,
}

impl<'a> CompanyService<'a> {
    /// Creates a new instance of CompanyService.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Retrieves one company.
    ///
    /// # Arguments
    /// - `id` - Company id
    ///
    /// # Returns
    /// - `Ok(Vec<CompanyEntity>)` - A one-element vector
    /// - `Err(Error::RetrieveFailed)` - Company not found or the query failed
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<CompanyEntity>, Error> {
        self.fetch_by_id(id)
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::Company, "get_by_id", format!("id {}", id), e)
            })
    }

    /// Retrieves one page of companies matching `condition`.
    ///
    /// # Arguments
    /// - `page` - 1-based page number
    /// - `page_size` - Rows per page
    /// - `condition` - Store condition used for both the page and the count
    ///
    /// # Returns
    /// - `Ok(Page<CompanyEntity>)` - Companies on the page plus the total match count
    /// - `Err(Error::RetrieveFailed)` - A query failed
    pub async fn get_page(
        &self,
        page: u64,
        page_size: u64,
        condition: Condition,
    ) -> Result<Page<CompanyEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), condition)
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::Company, "get_page", format!("page {}", page), e)
            })
    }

    /// Retrieves one page of companies matching `filter`.
    ///
    /// # Returns
    /// - `Ok(Page<CompanyEntity>)` - Matching companies plus the total match count
    /// - `Err(Error::RetrieveFailed)` - A query failed
    pub async fn get_by_filter(
        &self,
        page: u64,
        page_size: u64,
        filter: &CompanyFilter,
    ) -> Result<Page<CompanyEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), filter_condition(filter))
            .await
            .map_err(|e| {
                Error::retrieve_failed(
                    EntityKind::Company,
                    "get_by_filter",
                    format!("page {}", page),
                    e,
                )
            })
    }

    /// Retrieves the id and name of every company, ordered by name.
    pub async fn get_all_names(&self) -> Result<Vec<CompanyName>, Error> {
        let names = CompanyRepository::new(&self.state.db)
            .get_all_names()
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::Company, "get_all_names", "all companies", e.into())
            })?;

        Ok(names
            .into_iter()
            .map(|(id, name)| CompanyName { id, name })
            .collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Vec<CompanyEntity>, Error> {
        let company = CompanyRepository::new(&self.state.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("company {}", id)))?;

        Ok(vec![map_company(company, &self.state.links)])
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        condition: Condition,
    ) -> Result<Page<CompanyEntity>, Error> {
        let company_repo = CompanyRepository::new(&self.state.db);

        let (companies, total) = tokio::try_join!(
            company_repo.find_page(condition.clone(), page),
            company_repo.count(condition),
        )?;

        let data = companies
            .into_iter()
            .map(|company| map_company(company, &self.state.links))
            .collect();

        Ok(Page { data, total })
    }
}

/// Builds the store condition for a company filter.
pub fn filter_condition(filter: &CompanyFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = non_blank(&filter.selected_fields) {
        condition = condition.add(search_condition(term));
    }
    if let Some(customer_id) = non_blank(&filter.customer_id) {
        condition = condition.add(member_condition(customer_id));
    }
    if let Some(range) = &filter.created_at {
        condition = condition.add(within(entity::company::Column::CreatedAt, range));
    }

    condition
}

/// Maps a company row.
pub fn map_company(company: entity::company::Model, links: &DashboardLinks) -> CompanyEntity {
    CompanyEntity {
        company_link: links.company(&company.id),
        domains: string_list(&company.domains),
        viewer_domains: string_list(&company.viewer_domains),
        created_at: format_timestamp(company.created_at),
        modified_at: format_optional_timestamp(company.modified_at),
        deleted_at: format_optional_timestamp(company.deleted_at),
        archived_at: format_optional_timestamp(company.archived_at),
        id: company.id,
        name: company.name,
        url: company.url,
        size: company.size,
        logo_url: company.logo_url,
    }
}
