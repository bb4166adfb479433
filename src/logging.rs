//! Sets up log output and per-request tracing spans.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log `INFO` and above to stdout and `DEBUG` and above to the file at `log_path`.
///
/// The log file is appended to if it already exists.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
///
/// # Panics
/// Panics if a global subscriber has already been set.
pub fn setup_logging(log_path: &Path) -> io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

/// Wrap every route in `router` with a span recording the request's method, URI and route.
pub fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use crate::{build_router, endpoints, test_utils::get_test_app_state};

    use super::add_tracing_layer;

    #[tokio::test]
    async fn traced_router_still_serves_requests() {
        let app = add_tracing_layer(build_router(get_test_app_state()));
        let server = TestServer::new(app);

        server.get(endpoints::TRANSACTIONS).await.assert_status_ok();
    }
}
