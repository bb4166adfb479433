use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{
        CreateTransaction, NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
    },
};

/// A [TransactionStore] backed by a `Vec` that records how it was written to.
#[derive(Debug, Default)]
pub(crate) struct InMemoryTransactionStore {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    chunk_sizes: Vec<usize>,
    fail_on_insert: Option<usize>,
    drop_last_on_insert: bool,
}

impl InMemoryTransactionStore {
    /// Make the `index`th call (zero-based) to `insert_many` fail.
    pub(crate) fn fail_on_insert(mut self, index: usize) -> Self {
        self.fail_on_insert = Some(index);
        self
    }

    /// Silently lose the last transaction of every `insert_many` call.
    pub(crate) fn drop_last_on_insert(mut self) -> Self {
        self.drop_last_on_insert = true;
        self
    }

    /// The sizes of the successful `insert_many` calls, in order.
    pub(crate) fn chunk_sizes(&self) -> &[usize] {
        &self.chunk_sizes
    }

    fn push(&mut self, transaction: NewTransaction) -> Transaction {
        self.next_id += 1;
        let transaction = Transaction {
            id: self.next_id,
            date: transaction.date,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            status: transaction.status,
            region: transaction.region,
            category: transaction.category,
        };
        self.transactions.push(transaction.clone());
        transaction
    }
}

fn disk_error() -> Error {
    Error::SqlError(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("disk I/O error".to_owned()),
    ))
}

impl TransactionStore for InMemoryTransactionStore {
    fn clear(&mut self) -> Result<(), Error> {
        self.transactions.clear();
        Ok(())
    }

    fn insert_many(&mut self, transactions: &[NewTransaction]) -> Result<usize, Error> {
        if self.fail_on_insert == Some(self.chunk_sizes.len()) {
            return Err(disk_error());
        }

        let keep = if self.drop_last_on_insert {
            transactions.len().saturating_sub(1)
        } else {
            transactions.len()
        };

        for transaction in &transactions[..keep] {
            self.push(transaction.clone());
        }

        self.chunk_sizes.push(transactions.len());
        Ok(transactions.len())
    }

    fn create(&mut self, transaction: CreateTransaction) -> Result<Transaction, Error> {
        Ok(self.push(NewTransaction {
            date: OffsetDateTime::now_utc(),
            amount: transaction.amount.floor() as i64,
            transaction_type: transaction.transaction_type,
            status: transaction.status,
            region: transaction.region,
            category: transaction.category,
        }))
    }

    fn count(&self) -> Result<u64, Error> {
        Ok(self.transactions.len() as u64)
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        Ok(self
            .transactions
            .iter()
            .find(|transaction| transaction.id == id)
            .cloned())
    }

    fn query(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Transaction>, u64), Error> {
        let matches: Vec<_> = self
            .transactions
            .iter()
            .filter(|transaction| filter.matches(transaction))
            .collect();
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }

    fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Option<Transaction>, Error> {
        let Some(transaction) = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        else {
            return Ok(None);
        };

        if let Some(amount) = update.amount {
            transaction.amount = amount.floor() as i64;
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(status) = update.status {
            transaction.status = status;
        }
        if let Some(region) = update.region {
            transaction.region = region;
        }
        if let Some(category) = update.category {
            transaction.category = category;
        }

        Ok(Some(transaction.clone()))
    }

    fn delete(&mut self, transaction: &Transaction) -> Result<bool, Error> {
        let before = self.transactions.len();
        self.transactions.retain(|stored| stored.id != transaction.id);
        Ok(self.transactions.len() < before)
    }
}
