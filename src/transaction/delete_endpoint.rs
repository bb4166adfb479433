//! Defines the endpoint for deleting a transaction.

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

/// A route handler for deleting a transaction, responds with the deleted transaction.
///
/// Responds with `404 Not Found` if there is no such transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let mut store = state.store;

    let transaction = store.get(transaction_id)?.ok_or(Error::NotFound)?;

    if !store.delete(&transaction)? {
        // Deleted by another request after it was read.
        return Err(Error::NotFound);
    }

    Ok(Json(transaction))
}
