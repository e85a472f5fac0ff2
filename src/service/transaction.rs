//! Transaction service.
//!
//! Payments live in the analytical store while company and game names live in the
//! relational store; the join happens here, after the page is fetched.

use crate::{
    analytics::{
        optional_f64, optional_string, required_string, required_timestamp, AnalyticsClient,
        AnalyticsRow, BigQueryClient,
    },
    crypto::{
        field::{PAYMENT_BILLING_ADDRESS, PAYMENT_BILLING_EMAIL, PAYMENT_USER_NAME},
        FieldCipher,
    },
    data::payment::{PaymentCondition, PaymentRepository},
    error::{analytics::AnalyticsError, Error},
    model::{
        app::AppState,
        filter::{non_blank, TransactionFilter},
        transaction::TransactionEntity,
        EntityKind, Page, PageRequest,
    },
    service::cache::{ReferenceCache, ReferenceIds, ReferenceResolver},
    util::{link::DashboardLinks, time::format_timestamp},
};

/// Reads payments, decrypting PII and resolving company and game names.
pub struct TransactionService<'a, A: AnalyticsClient = BigQueryClient> {
    state: &'a AppState,
    client: &'a A,
}

impl<'a> TransactionService<'a> {
    /// Creates a service using the configured analytical store client.
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            client: &state.analytics,
        }
    }
}

impl<'a, A: AnalyticsClient> TransactionService<'a, A> {
    /// Creates a service querying payments through `client`.
    pub fn with_client(state: &'a AppState, client: &'a A) -> Self {
        Self { state, client }
    }

    /// Retrieves a payment by its payment number, which doubles as its id.
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<TransactionEntity>, Error> {
        self.get_by_payment_number(id).await
    }

    /// Retrieves a payment by its payment number.
    ///
    /// # Returns
    /// - `Ok(Vec<TransactionEntity>)` - The payment, or an empty vector when none matches
    /// - `Err(Error::RetrieveFailed)` - A query failed or a row was malformed
    pub async fn get_by_payment_number(
        &self,
        payment_number: &str,
    ) -> Result<Vec<TransactionEntity>, Error> {
        self.fetch_by_payment_number(payment_number)
            .await
            .map_err(|e| {
                Error::retrieve_failed(
                    EntityKind::Transaction,
                    "get_by_payment_number",
                    format!("payment number {}", payment_number),
                    e,
                )
            })
    }

    /// Retrieves one page of payments matching `condition`, newest first.
    ///
    /// # Arguments
    /// - `page` - 1-based page number
    /// - `page_size` - Rows per page
    /// - `condition` - Condition rendered into both the page and the count query
    pub async fn get_page(
        &self,
        page: u64,
        page_size: u64,
        condition: &PaymentCondition,
    ) -> Result<Page<TransactionEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), condition)
            .await
            .map_err(|e| {
                Error::retrieve_failed(
                    EntityKind::Transaction,
                    "get_page",
                    format!("page {}", page),
                    e,
                )
            })
    }

    /// Retrieves one page of payments matching `filter`.
    pub async fn get_by_filter(
        &self,
        page: u64,
        page_size: u64,
        filter: &TransactionFilter,
    ) -> Result<Page<TransactionEntity>, Error> {
        self.fetch_page(PageRequest::new(page, page_size), &self.filter_condition(filter))
            .await
            .map_err(|e| {
                Error::retrieve_failed(
                    EntityKind::Transaction,
                    "get_by_filter",
                    format!("page {}", page),
                    e,
                )
            })
    }

    /// Builds the payment condition for a filter.
    pub fn filter_condition(&self, filter: &TransactionFilter) -> PaymentCondition {
        let mut condition = PaymentCondition::new();

        if let Some(term) = non_blank(&filter.selected_fields) {
            // user_name and billing_email share a scheme, so one ciphertext matches both
            let encrypted = self.state.cipher.encrypt_field(PAYMENT_BILLING_EMAIL, term);
            condition = condition.search(term, encrypted);
        }
        if let Some(range) = &filter.payment_date {
            condition = condition.payment_date_within(range);
        }
        if let Some(company_id) = non_blank(&filter.company_id) {
            condition = condition.company_id(company_id);
        }
        if let Some(game_id) = non_blank(&filter.game_id) {
            condition = condition.game_id(game_id);
        }
        if let Some(status) = non_blank(&filter.status) {
            condition = condition.status(status);
        }

        condition
    }

    async fn fetch_by_payment_number(
        &self,
        payment_number: &str,
    ) -> Result<Vec<TransactionEntity>, Error> {
        let rows = PaymentRepository::new(self.client)
            .find_by_payment_number(payment_number)
            .await?;

        self.map_with_references(rows).await
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        condition: &PaymentCondition,
    ) -> Result<Page<TransactionEntity>, Error> {
        let payment_repo = PaymentRepository::new(self.client);

        let (rows, total) = tokio::try_join!(
            payment_repo.find_page(condition, page),
            payment_repo.count(condition),
        )?;

        Ok(Page {
            data: self.map_with_references(rows).await?,
            total,
        })
    }

    async fn map_with_references(
        &self,
        rows: Vec<AnalyticsRow>,
    ) -> Result<Vec<TransactionEntity>, Error> {
        let mut ids = ReferenceIds::new();
        for row in &rows {
            ids.company(optional_string(row, "company_id")?.as_deref());
            ids.game(optional_string(row, "game_id")?.as_deref());
        }

        let mut cache = ReferenceCache::new();
        ReferenceResolver::new(&self.state.db)
            .resolve(&mut cache, &ids)
            .await?;

        let entities = rows
            .iter()
            .map(|row| map_transaction(row, &cache, &self.state.cipher, &self.state.links))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entities)
    }
}

/// Maps a payments row, decrypting its PII columns.
///
/// Only `payment_number` and `payment_date` are required; a null company or game id leaves
/// the name and the link absent.
///
/// # Returns
/// - `Ok(TransactionEntity)` - The mapped payment
/// - `Err(AnalyticsError::InvalidColumn)` - A required column is missing or a column has the
///   wrong type
pub fn map_transaction(
    row: &AnalyticsRow,
    cache: &ReferenceCache,
    cipher: &FieldCipher,
    links: &DashboardLinks,
) -> Result<TransactionEntity, AnalyticsError> {
    let payment_number = required_string(row, "payment_number")?;
    let company_id = optional_string(row, "company_id")?;
    let game_id = optional_string(row, "game_id")?;
    let user_name = optional_string(row, "user_name")?;
    let billing_email = optional_string(row, "billing_email")?;
    let billing_address = optional_string(row, "billing_address")?;

    let transaction_link = match (&company_id, &game_id) {
        (Some(company_id), Some(game_id)) => {
            Some(links.transaction(company_id, game_id, &payment_number))
        }
        _ => None,
    };

    Ok(TransactionEntity {
        id: payment_number.clone(),
        transaction_link,
        company_name: company_id.as_deref().and_then(|id| cache.company_name(id)),
        game_name: game_id.as_deref().and_then(|id| cache.game_name(id)),
        user_id: optional_string(row, "user_id")?,
        user_name: cipher.decrypt_field(PAYMENT_USER_NAME, user_name.as_deref()),
        billing_email: cipher.decrypt_field(PAYMENT_BILLING_EMAIL, billing_email.as_deref()),
        billing_address: cipher.decrypt_field(PAYMENT_BILLING_ADDRESS, billing_address.as_deref()),
        amount: optional_f64(row, "amount")?,
        currency: optional_string(row, "currency")?,
        status: optional_string(row, "status")?,
        payment_date: format_timestamp(required_timestamp(row, "payment_date")?),
        payment_number,
        company_id,
        game_id,
    })
}
