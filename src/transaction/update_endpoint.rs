//! Defines the endpoint for changing some fields of a transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionUpdate, core::validate_amount, state::TransactionState},
};

/// A route handler for partially updating a transaction.
///
/// Fields missing from the request body keep their stored value. Responds
/// with the updated transaction, or `404 Not Found` if there is no such
/// transaction.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, Error> {
    if let Some(amount) = update.amount {
        validate_amount(amount)?;
    }

    let mut store = state.store;

    store
        .update(transaction_id, update)?
        .map(Json)
        .ok_or(Error::NotFound)
}
