//! Defines the endpoint that regenerates the transaction history.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, stores::SQLiteTransactionStore};

use super::Seeder;

/// The state needed to seed the store.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The store to replace the contents of.
    pub store: SQLiteTransactionStore,
    /// The seeder shared by everything that seeds `store`.
    pub seeder: Arc<Seeder>,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.transaction_store(),
            seeder: state.seeder.clone(),
        }
    }
}

/// The response body for a completed seed run.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    /// A human readable summary.
    pub message: String,
    /// The number of transactions in the store after seeding.
    pub count: u64,
}

/// A route handler that clears the store and regenerates the full history.
///
/// Seeding runs on the blocking thread pool. Concurrent requests wait for
/// the run in progress to finish and then seed again from a clear store.
pub async fn seed_endpoint(State(state): State<SeedState>) -> Result<Json<SeedResponse>, Error> {
    let SeedState { mut store, seeder } = state;

    let report = tokio::task::spawn_blocking(move || seeder.seed(&mut store, &mut rand::rng()))
        .await
        .map_err(|error| Error::BackgroundTaskFailed(error.to_string()))??;

    Ok(Json(SeedResponse {
        message: "Database seeded successfully".to_owned(),
        count: report.persisted,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, extract::FromRef, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, endpoints,
        pagination::PaginationConfig,
        seed::{SeedConfig, SeedRange},
        stores::TransactionStore,
    };

    use super::{SeedResponse, SeedState, seed_endpoint};

    fn get_test_state() -> SeedState {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
            SeedConfig {
                range: SeedRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 10)).unwrap(),
                ..Default::default()
            },
        )
        .unwrap();

        SeedState::from_ref(&state)
    }

    #[tokio::test]
    async fn seed_responds_with_final_count() {
        let state = get_test_state();
        let store = state.store.clone();
        let app = Router::new()
            .route(endpoints::SEED, post(seed_endpoint))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server.post(endpoints::SEED).await;

        response.assert_status_ok();
        let body: SeedResponse = response.json();
        assert_eq!(body.message, "Database seeded successfully");
        assert_eq!(Ok(body.count), store.count());
        assert!((20..=30).contains(&body.count), "got {} transactions", body.count);
    }
}
