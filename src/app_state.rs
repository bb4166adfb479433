//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    pagination::PaginationConfig,
    seed::{SeedConfig, Seeder},
    stores::SQLiteTransactionStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how to page transaction listings.
    pub pagination_config: PaginationConfig,

    /// The seeder for the transaction store, shared so seed runs are serialized.
    pub seeder: Arc<Seeder>,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
        seed_config: SeedConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            pagination_config,
            seeder: Arc::new(Seeder::new(seed_config)),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// A store for the transactions in the app's database.
    pub fn transaction_store(&self) -> SQLiteTransactionStore {
        SQLiteTransactionStore::new(self.db_connection.clone())
    }
}
