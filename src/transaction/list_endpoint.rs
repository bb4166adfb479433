//! Defines the endpoint and query for listing transactions one page at a time.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    pagination::{Page, Pagination},
    stores::TransactionStore,
    transaction::{
        Category, Region, Transaction, TransactionFilter, TransactionStatus, TransactionType,
        state::ListTransactionsState,
    },
};

/// The query string accepted by [list_transactions_endpoint].
///
/// Filter fields are spelled out rather than flattened from
/// [TransactionFilter] since flattened fields lose their numeric types when
/// parsed from a query string.
#[derive(Debug, Default, Deserialize)]
#[allow(missing_docs)]
pub struct ListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub region: Option<Region>,
    pub category: Option<Category>,
    /// The one-based page number.
    pub page: Option<u64>,
    /// The maximum number of transactions per page.
    pub limit: Option<u64>,
}

impl ListQuery {
    fn into_parts(self) -> (TransactionFilter, Option<u64>, Option<u64>) {
        let filter = TransactionFilter {
            search: self.search,
            transaction_type: self.transaction_type,
            status: self.status,
            region: self.region,
            category: self.category,
        };

        (filter, self.page, self.limit)
    }
}

/// Get the page of transactions matching `filter` described by `pagination`.
///
/// Pages past the last one are empty but still report the total number of
/// matches.
pub fn list_transactions<S: TransactionStore + ?Sized>(
    store: &S,
    filter: &TransactionFilter,
    pagination: Pagination,
) -> Result<Page<Transaction>, Error> {
    let (items, total) = store.query(filter, pagination.offset(), pagination.limit())?;

    Ok(Page::new(items, total, pagination))
}

/// A route handler for listing transactions that match the query's filter.
///
/// Responds with `400 Bad Request` if the page or limit is zero.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Transaction>>, Error> {
    let (filter, page, limit) = query.into_parts();
    let pagination = Pagination::new(page, limit, &state.pagination_config)?;

    list_transactions(&state.store, &filter, pagination).map(Json)
}
