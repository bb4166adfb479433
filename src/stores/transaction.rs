//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{CreateTransaction, NewTransaction, Transaction, TransactionFilter, TransactionUpdate},
};

/// Handles the creation, retrieval, modification and removal of transactions.
///
/// Query results are returned in the store's natural order, i.e. the order
/// in which the transactions were created.
pub trait TransactionStore {
    /// Remove every transaction from the store.
    fn clear(&mut self) -> Result<(), Error>;

    /// Store every transaction in `transactions`.
    ///
    /// Implementers must have durably stored the whole slice when this
    /// returns `Ok`, and store nothing from the slice when it returns `Err`.
    /// Returns the number of transactions stored.
    fn insert_many(&mut self, transactions: &[NewTransaction]) -> Result<usize, Error>;

    /// Record a single transaction dated now.
    fn create(&mut self, transaction: CreateTransaction) -> Result<Transaction, Error>;

    /// The number of transactions in the store.
    fn count(&self) -> Result<u64, Error>;

    /// Retrieve a transaction by its `id`, or `None` if there is no such transaction.
    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Retrieve up to `limit` transactions matching `filter`, skipping the first
    /// `offset` matches, along with the total number of matches.
    fn query(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Transaction>, u64), Error>;

    /// Replace the fields set in `update` and return the updated transaction,
    /// or `None` if there is no transaction with `id`.
    fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Option<Transaction>, Error>;

    /// Remove `transaction` from the store.
    ///
    /// Returns `false` if the transaction was not in the store.
    fn delete(&mut self, transaction: &Transaction) -> Result<bool, Error>;
}
