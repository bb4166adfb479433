use std::{
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;
use time::Date;

use tally_rs::{
    initialize_db,
    seed::{SeedConfig, SeedRange, Seeder, parse_seed_date},
    stores::SQLiteTransactionStore,
};

/// A utility for replacing the transactions in a tally_rs database with a generated history.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database, created if it does not exist.
    #[arg(long, short)]
    db_path: PathBuf,

    /// The first day of generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2022-01-01", value_parser = parse_seed_date)]
    seed_start: Date,

    /// The last day of generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2024-11-30", value_parser = parse_seed_date)]
    seed_end: Date,
}

/// Clear and seed a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let seeder = Seeder::new(SeedConfig {
        range: SeedRange::new(args.seed_start, args.seed_end)?,
        ..Default::default()
    });

    tracing::info!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let mut store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let report = seeder.seed(&mut store, &mut rand::rng())?;

    println!(
        "Seeded {} transactions in {} chunks.",
        report.persisted, report.chunks
    );

    Ok(())
}
