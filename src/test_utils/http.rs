use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;

use crate::{
    AppState, build_router, database_id::TransactionId, endpoints, pagination::PaginationConfig,
    seed::SeedConfig,
};

pub(crate) fn get_test_app_state() -> AppState {
    AppState::new(
        Connection::open_in_memory().unwrap(),
        PaginationConfig::default(),
        SeedConfig::default(),
    )
    .unwrap()
}

pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

/// The [endpoints::TRANSACTION] route for `id`.
pub(crate) fn transaction_path(id: TransactionId) -> String {
    format!("{}/{id}", endpoints::TRANSACTIONS)
}

#[track_caller]
pub(crate) fn assert_json_error(response: &TestResponse, status: StatusCode) {
    response.assert_status(status);
    let body: serde_json::Value = response.json();
    assert!(
        body["error"].is_string(),
        "want a JSON body with an error message, got {body}"
    );
}
