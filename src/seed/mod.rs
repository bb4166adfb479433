//! Populates the store with a synthetic, multi-year transaction history.
//!
//! Seeding is a full replace: the store is cleared and then refilled from a
//! freshly generated sequence. The pieces are:
//! - [weighted_index], which draws from a discrete distribution,
//! - [generate_transaction], which produces one transaction for a day,
//! - [DailyTransactions], which walks a [SeedRange] two or three transactions per day,
//! - [write_in_chunks], which clears the store and writes fixed-size chunks,
//! - [Seeder], which ties them together and serializes concurrent runs.

mod daily;
mod generator;
mod random;
mod sampler;
mod seed_endpoint;
mod writer;

use std::{
    num::NonZeroUsize,
    sync::{Mutex, PoisonError},
};

pub use daily::{DailyTransactions, SeedRange, parse_seed_date};
pub use generator::generate_transaction;
pub use random::RandomSource;
pub use sampler::weighted_index;
pub use seed_endpoint::{SeedResponse, SeedState, seed_endpoint};
pub use writer::{DEFAULT_CHUNK_SIZE, SeedReport, write_in_chunks};

use crate::{Error, stores::TransactionStore};

/// Controls what a seed run generates and how it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// The days to generate transactions for.
    pub range: SeedRange,
    /// The maximum number of transactions written per chunk.
    pub chunk_size: NonZeroUsize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            range: SeedRange::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Runs seeding against a single store, one run at a time.
///
/// Interleaving the clear and chunk writes of two runs would double-write or
/// lose transactions, so [Seeder::seed] holds a lock for the whole run. Share
/// one `Seeder` between every caller that seeds the same store.
#[derive(Debug, Default)]
pub struct Seeder {
    config: SeedConfig,
    lock: Mutex<()>,
}

impl Seeder {
    /// Create a seeder that generates data according to `config`.
    pub fn new(config: SeedConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    /// The config used for every run.
    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Replace everything in `store` with freshly generated transactions.
    ///
    /// Blocks until any other run on this seeder has finished.
    ///
    /// # Errors
    /// Returns the first error from the store, or [Error::SeedCountMismatch]
    /// if the final count does not match what was generated. A failed run
    /// leaves the store partially seeded; running again starts from a clear.
    pub fn seed<S, R>(&self, store: &mut S, rng: &mut R) -> Result<SeedReport, Error>
    where
        S: TransactionStore + ?Sized,
        R: RandomSource + ?Sized,
    {
        // A poisoned lock only means an earlier run panicked part way, and
        // every run starts by clearing the store.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        tracing::info!(
            "Seeding transactions from {} to {}",
            self.config.range.start(),
            self.config.range.end()
        );

        let transactions = DailyTransactions::new(self.config.range, rng);

        write_in_chunks(store, transactions, self.config.chunk_size)
    }
}

/// Whether `store` holds no transactions.
pub fn is_store_empty<S: TransactionStore + ?Sized>(store: &S) -> Result<bool, Error> {
    Ok(store.count()? == 0)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        thread,
    };

    use rand::{SeedableRng, rngs::StdRng};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        stores::{SQLiteTransactionStore, TransactionStore},
        test_utils::InMemoryTransactionStore,
        transaction::{TransactionFilter, TransactionType},
    };

    use super::{SeedConfig, SeedRange, Seeder, is_store_empty};

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn small_config() -> SeedConfig {
        SeedConfig {
            range: SeedRange::new(date!(2024 - 02 - 01), date!(2024 - 03 - 31)).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn store_is_empty_until_seeded() {
        let mut store = get_store();
        assert_eq!(is_store_empty(&store), Ok(true));

        Seeder::new(small_config())
            .seed(&mut store, &mut StdRng::seed_from_u64(5))
            .unwrap();

        assert_eq!(is_store_empty(&store), Ok(false));
    }

    #[test]
    fn seed_count_matches_generated_count() {
        let mut store = get_store();
        let seeder = Seeder::new(small_config());

        let report = seeder
            .seed(&mut store, &mut StdRng::seed_from_u64(11))
            .unwrap();

        // February 2024 has 29 days, March has 31.
        let days = 60;
        assert!(
            (2 * days..=3 * days).contains(&report.generated),
            "got {} transactions for {days} days",
            report.generated
        );
        assert_eq!(store.count(), Ok(report.generated as u64));
        assert_eq!(report.persisted, report.generated as u64);
    }

    #[test]
    fn default_history_is_written_in_chunks_of_one_hundred() {
        let mut store = InMemoryTransactionStore::default();

        let report = Seeder::default()
            .seed(&mut store, &mut StdRng::seed_from_u64(2022))
            .unwrap();

        assert!(store.chunk_sizes().iter().all(|size| *size <= 100));
        assert_eq!(
            store.chunk_sizes().iter().sum::<usize>(),
            report.generated
        );
        assert_eq!(report.chunks, report.generated.div_ceil(100));
    }

    #[test]
    fn seeded_records_respect_range_and_amount_bounds() {
        let mut store = get_store();
        let config = small_config();
        Seeder::new(config.clone())
            .seed(&mut store, &mut StdRng::seed_from_u64(17))
            .unwrap();

        let (items, total) = store
            .query(&TransactionFilter::default(), 0, u64::MAX)
            .unwrap();

        assert_eq!(items.len() as u64, total);
        for transaction in items {
            assert!(config.range.contains(transaction.date.date()));
            let max = match transaction.transaction_type {
                TransactionType::Sales => 200_000,
                TransactionType::Expenses => 21_000,
            };
            assert!((1_000..=max).contains(&transaction.amount));
        }
    }

    #[test]
    fn reseeding_replaces_previous_data() {
        let mut store = get_store();
        let seeder = Seeder::new(small_config());
        seeder
            .seed(&mut store, &mut StdRng::seed_from_u64(1))
            .unwrap();

        let second = seeder
            .seed(&mut store, &mut StdRng::seed_from_u64(2))
            .unwrap();

        assert_eq!(store.count(), Ok(second.generated as u64));
    }

    #[test]
    fn concurrent_runs_do_not_interleave() {
        let store = get_store();
        let seeder = Arc::new(Seeder::new(small_config()));

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let seeder = seeder.clone();
                let mut store = store.clone();
                thread::spawn(move || {
                    seeder.seed(&mut store, &mut StdRng::seed_from_u64(seed))
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("seed thread panicked")
                .expect("seed run failed");
        }

        let count = store.count().unwrap();
        assert!((120..=180).contains(&count), "got {count} transactions");
    }
}
