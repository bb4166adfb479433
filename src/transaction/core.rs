//! Defines the core data models and the table schema for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// ENUMS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money earned from a sale.
    Sales,
    /// Money spent.
    Expenses,
}

impl TransactionType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 2] = [Self::Sales, Self::Expenses];

    /// The literal name used for storage and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::Expenses => "EXPENSES",
        }
    }
}

/// Whether the transaction has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// The transaction has settled.
    Completed,
    /// The transaction is still waiting to settle.
    Pending,
}

impl TransactionStatus {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 2] = [Self::Completed, Self::Pending];

    /// The literal name used for storage and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Pending => "PENDING",
        }
    }
}

/// The region a transaction is attributed to.
///
/// The declaration order matters: the seed generator's region weights are
/// listed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    /// North America.
    NorthAmerica,
    /// South America.
    SouthAmerica,
    /// Europe.
    Europe,
    /// Asia.
    Asia,
    /// Africa.
    Africa,
    /// Oceania.
    Oceania,
}

impl Region {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Europe,
        Self::Asia,
        Self::Africa,
        Self::Oceania,
    ];

    /// The literal name used for storage and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NorthAmerica => "NORTH_AMERICA",
            Self::SouthAmerica => "SOUTH_AMERICA",
            Self::Europe => "EUROPE",
            Self::Asia => "ASIA",
            Self::Africa => "AFRICA",
            Self::Oceania => "OCEANIA",
        }
    }
}

/// The business function a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Human resources.
    Hr,
    /// Marketing.
    Marketing,
    /// Operations.
    Operations,
}

impl Category {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 3] = [Self::Hr, Self::Marketing, Self::Operations];

    /// The literal name used for storage and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Marketing => "MARKETING",
            Self::Operations => "OPERATIONS",
        }
    }
}

/// A string did not match any literal name of the enum `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{value}\" is not a valid {kind}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Implements the text conversions shared by the closed enums: `Display`,
/// `FromStr` and the SQLite `TEXT` column mapping.
macro_rules! impl_text_enum {
    ($name:ident, $kind:literal) => {
        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|error| FromSqlError::Other(Box::new(error)))
            }
        }
    };
}

impl_text_enum!(TransactionType, "transaction type");
impl_text_enum!(TransactionStatus, "transaction status");
impl_text_enum!(Region, "region");
impl_text_enum!(Category, "category");

// ============================================================================
// MODELS
// ============================================================================

/// A recorded sale or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The amount of money, in whole units.
    pub amount: i64,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Whether the transaction has settled.
    pub status: TransactionStatus,
    /// The region the transaction is attributed to.
    pub region: Region,
    /// The business function the transaction belongs to.
    pub category: Category,
}

/// A transaction that has not been stored yet.
///
/// This is what the seed generator produces and what
/// [TransactionStore::insert_many](crate::stores::TransactionStore::insert_many) consumes.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewTransaction {
    pub date: OffsetDateTime,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub region: Region,
    pub category: Category,
}

/// The fields a client supplies to record a single transaction.
///
/// The date is assigned by the store when the transaction is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct CreateTransaction {
    /// The amount of money, must not be negative.
    pub amount: f64,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub region: Region,
    pub category: Category,
}

/// A partial replacement of a transaction's fields.
///
/// Fields set to `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Check that a client supplied `amount` is a non-negative number that fits in
/// a stored amount once floored.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `amount` is negative, infinite, NaN or
/// at least `i64::MAX`.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && (0.0..i64::MAX as f64).contains(&amount) {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

impl TransactionUpdate {
    /// Whether the update would not change any field.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.transaction_type.is_none()
            && self.status.is_none()
            && self.region.is_none()
            && self.category.is_none()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The column list used by every query that maps rows with [map_transaction_row].
pub const TRANSACTION_COLUMNS: &str = "id, date, amount, type, status, region, category";

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount INTEGER NOT NULL CHECK (amount >= 0),
                type TEXT NOT NULL,
                status TEXT NOT NULL,
                region TEXT NOT NULL,
                category TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns in [TRANSACTION_COLUMNS] in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = read_amount(row, 2)?;
    let transaction_type = row.get(3)?;
    let status = row.get(4)?;
    let region = row.get(5)?;
    let category = row.get(6)?;

    Ok(Transaction {
        id,
        date,
        amount,
        transaction_type,
        status,
        region,
        category,
    })
}

/// Read the amount column, flooring fractional values.
///
/// Client supplied amounts are stored as given, so a fractional amount is kept
/// as a REAL by SQLite. Amounts leave the store as whole numbers.
fn read_amount(row: &Row, index: usize) -> Result<i64, rusqlite::Error> {
    match row.get_ref(index)? {
        ValueRef::Integer(amount) => Ok(amount),
        ValueRef::Real(amount) => Ok(amount.floor() as i64),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            index,
            other.data_type(),
            "the amount is not a number".into(),
        )),
    }
}
