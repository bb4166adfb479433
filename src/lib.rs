//! Tally is a REST service for browsing a history of sales and expense transactions.
//!
//! This library provides:
//! - A SQLite backed store of transactions with filtering and pagination,
//! - A seeder that fills the store with a synthetic multi-year history,
//! - The JSON endpoints and router that expose both.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use time::Date;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod pagination;
mod routing;
pub mod seed;
pub mod stores;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{add_tracing_layer, setup_logging};
pub use pagination::{Page, Pagination, PaginationConfig, total_pages};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has not been deleted.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The client asked for page zero or a page size of zero.
    #[error("page and limit must be at least 1, got page {page} and limit {limit}")]
    InvalidPagination {
        /// The requested one-based page number.
        page: u64,
        /// The requested page size.
        limit: u64,
    },

    /// The client supplied a negative or non-finite amount.
    #[error("{0} is not a valid amount, amounts must be zero or more")]
    InvalidAmount(f64),

    /// A seed range was created with a start date after its end date.
    #[error("the seed range start {start} is after its end {end}")]
    InvalidSeedRange {
        /// The first day of the range.
        start: Date,
        /// The last day of the range.
        end: Date,
    },

    /// The store holds a different number of transactions than a seed run generated.
    #[error("generated {generated} transactions but the store holds {persisted}")]
    SeedCountMismatch {
        /// The number of transactions the run generated.
        generated: usize,
        /// The number of transactions in the store after the run.
        persisted: u64,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A task on the blocking thread pool panicked or was cancelled.
    #[error("a background task failed: {0}")]
    BackgroundTaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidPagination { .. }
            | Error::InvalidAmount(_)
            | Error::InvalidSeedRange { .. } => StatusCode::BAD_REQUEST,
            Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return internal_server_error();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "an unexpected error occurred, check the server logs" })),
    )
        .into_response()
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::ffi;

    use crate::Error;

    #[test]
    fn no_rows_becomes_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn client_errors_map_to_client_status_codes() {
        let cases = [
            (Error::NotFound, StatusCode::NOT_FOUND),
            (
                Error::InvalidPagination { page: 0, limit: 10 },
                StatusCode::BAD_REQUEST,
            ),
            (Error::InvalidAmount(-5.0), StatusCode::BAD_REQUEST),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, want) in cases {
            let label = error.to_string();
            assert_eq!(error.into_response().status(), want, "{label}");
        }
    }

    #[test]
    fn unexpected_errors_are_internal_server_errors() {
        let sql_error = Error::from(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_IOERR),
            None,
        ));
        let mismatch = Error::SeedCountMismatch {
            generated: 3,
            persisted: 2,
        };

        assert_eq!(
            sql_error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            mismatch.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
