use axum::extract::FromRef;

use crate::{AppState, pagination::PaginationConfig, stores::SQLiteTransactionStore};

/// The state needed to create, get, update or delete a single transaction.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The store for managing transactions.
    pub store: SQLiteTransactionStore,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store(),
        }
    }
}

/// The state needed to list transactions one page at a time.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The store for querying transactions.
    pub store: SQLiteTransactionStore,
    /// The defaults for requests that leave out the page or page size.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
