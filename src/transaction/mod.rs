//! Transaction records and the REST endpoints for managing them.
//!
//! This module contains:
//! - The `Transaction` model, its closed enums and the table schema
//! - The `TransactionFilter` used to select transactions
//! - Route handlers for creating, listing, getting, updating and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod filter;
mod get_endpoint;
mod list_endpoint;
mod state;
mod update_endpoint;

pub use core::{
    Category, CreateTransaction, NewTransaction, Region, TRANSACTION_COLUMNS, Transaction,
    TransactionStatus, TransactionType, TransactionUpdate, UnknownVariant,
    create_transaction_table, map_transaction_row, validate_amount,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use filter::TransactionFilter;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{ListQuery, list_transactions, list_transactions_endpoint};
pub use state::{ListTransactionsState, TransactionState};
pub use update_endpoint::update_transaction_endpoint;
