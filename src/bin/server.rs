use std::{error::Error, net::SocketAddr, path::PathBuf};

use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use time::Date;

use tally_rs::{
    AppState, PaginationConfig, add_tracing_layer, build_router, graceful_shutdown,
    seed::{SeedConfig, SeedRange, is_store_empty, parse_seed_date},
    setup_logging,
};

/// The REST API server for tally_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The first day of generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2022-01-01", value_parser = parse_seed_date)]
    seed_start: Date,

    /// The last day of generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2024-11-30", value_parser = parse_seed_date)]
    seed_end: Date,

    /// The number of transactions per page when a request does not give a limit.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;

    let seed_config = SeedConfig {
        range: SeedRange::new(args.seed_start, args.seed_end)?,
        ..Default::default()
    };
    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..Default::default()
    };

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(conn, pagination_config, seed_config)?;

    seed_if_empty(&state).await?;

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

/// Generate the transaction history if the database has none.
async fn seed_if_empty(state: &AppState) -> Result<(), Box<dyn Error>> {
    let mut store = state.transaction_store();

    if !is_store_empty(&store)? {
        tracing::info!("Database already has transactions, skipping seed");
        return Ok(());
    }

    let seeder = state.seeder.clone();
    let report =
        tokio::task::spawn_blocking(move || seeder.seed(&mut store, &mut rand::rng())).await??;

    tracing::info!(
        "Seeded empty database with {} transactions",
        report.persisted
    );

    Ok(())
}
