//! Account service.

use sea_orm::{ColumnTrait, Condition, DbErr};

use crate::{
    crypto::{field::ACCOUNT_DETAILS, FieldCipher},
    data::{
        account::{search_condition, AccountRepository},
        within,
    },
    error::Error,
    model::{
        account::AccountEntity,
        app::AppState,
        filter::{non_blank, AccountFilter, VerifyStateFilter},
        EntityKind, Page, PageRequest,
    },
    service::cache::{ReferenceCache, ReferenceIds, ReferenceResolver},
    util::{
        link::DashboardLinks,
        time::{format_optional_timestamp, format_timestamp},
    },
};

/// Reads accounts, decrypting details and resolving company and customer names.
pub struct AccountService<'a> {
    state: &'a AppState,
}

impl<'a> AccountService<'a> {
    /// Creates a new instance of AccountService.
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Retrieves one account.
    ///
    /// # Arguments
    /// - `id` - Account id
    ///
    /// # Returns
    /// - `Ok(Vec<AccountEntity>)` - A one-element vector
    /// - `Err(Error::RetrieveFailed)` - Account not found or a query failed
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<AccountEntity>, Error> {
        self.fetch_by_id(id).await.map_err(|e| {
            Error::retrieve_failed(EntityKind::Account, "get_by_id", format!("id {}", id), e)
        })
    }

    /// Retrieves one page of accounts matching `condition`.
    ///
    /// # Arguments
    /// - `page` - 1-based page number
    /// - `page_size` - Rows per page
    /// - `condition` - Store condition used for both the page and the count
    ///
    /// # Returns
    /// - `Ok(Page<AccountEntity>)` - Accounts on the page plus the total match count
    /// - `Err(Error::RetrieveFailed)` - A query failed
    pub async fn get_page(
        &self,
        page: u64,
        page_size: u64,
        condition: Condition,
    ) -> Result<Page<AccountEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), condition)
            .await
            .map_err(|e| {
                Error::retrieve_failed(EntityKind::Account, "get_page", format!("page {}", page), e)
            })
    }

    /// Retrieves one page of accounts matching `filter`.
    pub async fn get_by_filter(
        &self,
        page: u64,
        page_size: u64,
        filter: &AccountFilter,
    ) -> Result<Page<AccountEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), filter_condition(filter))
            .await
            .map_err(|e| {
                Error::retrieve_failed(
                    EntityKind::Account,
                    "get_by_filter",
                    format!("page {}", page),
                    e,
                )
            })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Vec<AccountEntity>, Error> {
        let account = AccountRepository::new(&self.state.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("account {}", id)))?;

        let accounts = vec![account];
        let cache = self.resolve_references(&accounts).await?;

        Ok(self.map_all(accounts, &cache))
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        condition: Condition,
    ) -> Result<Page<AccountEntity>, Error> {
        let account_repo = AccountRepository::new(&self.state.db);

        let (accounts, total) = tokio::try_join!(
            account_repo.find_page(condition.clone(), page),
            account_repo.count(condition),
        )?;

        let cache = self.resolve_references(&accounts).await?;

        Ok(Page {
            data: self.map_all(accounts, &cache),
            total,
        })
    }

    async fn resolve_references(
        &self,
        accounts: &[entity::account::Model],
    ) -> Result<ReferenceCache, DbErr> {
        let mut ids = ReferenceIds::new();
        for account in accounts {
            ids.company(Some(&account.company_id));
            ids.customer(account.edited_by_customer_id.as_deref());
            ids.customer(account.verified_by_customer_id.as_deref());
        }

        let mut cache = ReferenceCache::new();
        ReferenceResolver::new(&self.state.db)
            .resolve(&mut cache, &ids)
            .await?;

        Ok(cache)
    }

    fn map_all(
        &self,
        accounts: Vec<entity::account::Model>,
        cache: &ReferenceCache,
    ) -> Vec<AccountEntity> {
        accounts
            .into_iter()
            .map(|account| map_account(account, cache, &self.state.cipher, &self.state.links))
            .collect()
    }
}

/// Builds the store condition for an account filter.
///
/// `verify_state` set to `ALL` adds no constraint.
pub fn filter_condition(filter: &AccountFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = non_blank(&filter.selected_fields) {
        condition = condition.add(search_condition(term));
    }
    if let Some(company_id) = non_blank(&filter.company_id) {
        condition = condition.add(entity::account::Column::CompanyId.eq(company_id));
    }
    if let Some(VerifyStateFilter::Only(state)) = &filter.verify_state {
        condition = condition.add(entity::account::Column::VerifyState.eq(state.as_str()));
    }
    if let Some(range) = &filter.created_at {
        condition = condition.add(within(entity::account::Column::CreatedAt, range));
    }

    condition
}

/// Maps an account row, decrypting `details` and reading names from `cache`.
pub fn map_account(
    account: entity::account::Model,
    cache: &ReferenceCache,
    cipher: &FieldCipher,
    links: &DashboardLinks,
) -> AccountEntity {
    let customer_name = |id: &Option<String>| id.as_deref().and_then(|id| cache.customer_name(id));

    AccountEntity {
        company_name: cache.company_name(&account.company_id),
        company_link: links.company(&account.company_id),
        details: cipher.decrypt_field(ACCOUNT_DETAILS, account.details.as_deref()),
        edited_by_customer_name: customer_name(&account.edited_by_customer_id),
        verified_by_customer_name: customer_name(&account.verified_by_customer_id),
        created_at: format_timestamp(account.created_at),
        modified_at: format_optional_timestamp(account.modified_at),
        deleted_at: format_optional_timestamp(account.deleted_at),
        archived_at: format_optional_timestamp(account.archived_at),
        id: account.id,
        company_id: account.company_id,
        details_version: account.details_version,
        edited_by_customer_id: account.edited_by_customer_id,
        verify_state: account.verify_state,
        verified_by_customer_id: account.verified_by_customer_id,
    }
}

#[cfg(test)]
mod tests {
    use backoffice_test_utils::prelude::*;

    use super::*;

    #[test]
    fn maps_account_row() {
        let cipher = FieldCipher::new(Some(TEST_ENCRYPTION_KEY));
        let mut account = factory::account("a1", "c1");
        account.details = Some(cipher.encrypt_field(ACCOUNT_DETAILS, "IBAN DE00 1234"));
        account.edited_by_customer_id = Some("cust1".to_string());
        account.verified_by_customer_id = Some("cust-gone".to_string());

        let mut cache = ReferenceCache::new();
        cache.insert_companies([("c1".to_string(), "Acme".to_string())]);
        cache.insert_customers([("cust1".to_string(), "Ada".to_string())]);

        let entity = map_account(
            account,
            &cache,
            &cipher,
            &DashboardLinks::new(TEST_DASHBOARD_URL),
        );

        assert_eq!(entity.details.as_deref(), Some("IBAN DE00 1234"));
        assert_eq!(entity.company_name.as_deref(), Some("Acme"));
        assert_eq!(entity.edited_by_customer_name.as_deref(), Some("Ada"));
        assert_eq!(entity.verified_by_customer_name, None);
        assert_eq!(entity.company_link, "https://dashboard.test/company/c1");
    }

    #[test]
    fn undecryptable_details_pass_through() {
        let cipher = FieldCipher::new(Some(TEST_ENCRYPTION_KEY));
        let mut account = factory::account("a1", "c1");
        account.details = Some("not-ciphertext".to_string());

        let entity = map_account(
            account,
            &ReferenceCache::new(),
            &cipher,
            &DashboardLinks::new(TEST_DASHBOARD_URL),
        );

        assert_eq!(entity.details.as_deref(), Some("not-ciphertext"));
    }

    #[test]
    fn verify_state_all_adds_no_constraint() {
        let condition = filter_condition(&AccountFilter {
            verify_state: Some(VerifyStateFilter::All),
            ..Default::default()
        });

        assert!(condition.is_empty());
    }
}
