//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{
    Connection, OptionalExtension, Row, params_from_iter,
    types::{Type, Value},
};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{
        CreateTransaction, NewTransaction, TRANSACTION_COLUMNS, Transaction, TransactionFilter,
        TransactionUpdate, map_transaction_row,
    },
};

/// Stores transactions in a SQLite database.
///
/// The transaction table must exist, see [initialize](crate::initialize_db).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// Read a `COUNT(..)` result from the first column of `row`.
fn read_count(row: &Row) -> Result<u64, rusqlite::Error> {
    let count: i64 = row.get(0)?;

    u64::try_from(count).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(error))
    })
}

impl TransactionStore for SQLiteTransactionStore {
    fn clear(&mut self) -> Result<(), Error> {
        self.connection()?
            .execute("DELETE FROM \"transaction\"", ())?;

        Ok(())
    }

    /// Insert `transactions` in a single SQLite transaction.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if any row cannot be inserted, in which
    /// case none of the rows are kept.
    fn insert_many(&mut self, transactions: &[NewTransaction]) -> Result<usize, Error> {
        let connection = self.connection()?;
        let tx = connection.unchecked_transaction()?;

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(
            "INSERT INTO \"transaction\" (date, amount, type, status, region, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for transaction in transactions {
            stmt.execute((
                transaction.date,
                transaction.amount,
                transaction.transaction_type,
                transaction.status,
                transaction.region,
                transaction.category,
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(transactions.len())
    }

    fn create(&mut self, transaction: CreateTransaction) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!(
                "INSERT INTO \"transaction\" (date, amount, type, status, region, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    OffsetDateTime::now_utc(),
                    transaction.amount,
                    transaction.transaction_type,
                    transaction.status,
                    transaction.region,
                    transaction.category,
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    fn count(&self) -> Result<u64, Error> {
        self.connection()?
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], read_count)
            .map_err(|error| error.into())
    }

    fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    /// Count the transactions matching `filter` and fetch one window of them,
    /// ordered by ID.
    fn query(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Transaction>, u64), Error> {
        let (where_clause, mut query_parameters) = filter.where_clause();
        let connection = self.connection()?;

        let total = connection.query_row(
            &format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}"),
            params_from_iter(query_parameters.iter()),
            read_count,
        )?;

        let limit_index = query_parameters.len() + 1;
        query_parameters.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        query_parameters.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        let query_string = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause} \
            ORDER BY id ASC LIMIT ?{limit_index} OFFSET ?{}",
            limit_index + 1
        );

        let items = connection
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Option<Transaction>, Error> {
        if update.is_empty() {
            return self.get(id);
        }

        let mut set_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(amount) = update.amount {
            query_parameters.push(Value::Real(amount));
            set_clause_parts.push(format!("amount = ?{}", query_parameters.len()));
        }

        let text_columns = [
            ("type", update.transaction_type.map(|value| value.as_str())),
            ("status", update.status.map(|value| value.as_str())),
            ("region", update.region.map(|value| value.as_str())),
            ("category", update.category.map(|value| value.as_str())),
        ];

        for (column, value) in text_columns {
            if let Some(value) = value {
                query_parameters.push(Value::Text(value.to_owned()));
                set_clause_parts.push(format!("{column} = ?{}", query_parameters.len()));
            }
        }

        query_parameters.push(Value::Integer(id));

        let transaction = self
            .connection()?
            .prepare(&format!(
                "UPDATE \"transaction\" SET {} WHERE id = ?{} RETURNING {TRANSACTION_COLUMNS}",
                set_clause_parts.join(", "),
                query_parameters.len()
            ))?
            .query_row(params_from_iter(query_parameters.iter()), map_transaction_row)
            .optional()?;

        Ok(transaction)
    }

    fn delete(&mut self, transaction: &Transaction) -> Result<bool, Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &transaction.id)],
        )?;

        Ok(rows_affected > 0)
    }
}
