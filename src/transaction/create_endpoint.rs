//! Defines the endpoint for recording a single transaction.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{CreateTransaction, Transaction, core::validate_amount, state::TransactionState},
};

/// A route handler for recording a transaction dated now.
///
/// Responds with `201 Created` and the stored transaction. Fractional amounts
/// are accepted and floored when the transaction is read back.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(transaction): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    validate_amount(transaction.amount)?;

    let mut store = state.store;
    let transaction = store.create(transaction)?;

    tracing::debug!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
