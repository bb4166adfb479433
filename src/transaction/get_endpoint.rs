//! Defines the endpoint for retrieving a single transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, state::TransactionState},
};

/// A route handler for getting a transaction by its ID.
///
/// Responds with `404 Not Found` if there is no such transaction.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    state
        .store
        .get(transaction_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}
