//! Replaces the stored transactions with a generated sequence, one chunk at a time.

use std::num::NonZeroUsize;

use crate::{Error, stores::TransactionStore, transaction::NewTransaction};

/// The default number of transactions written per chunk.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// The outcome of a completed seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// The number of transactions pulled from the generated sequence.
    pub generated: usize,
    /// The number of transactions in the store after the last chunk.
    pub persisted: u64,
    /// The number of chunks written.
    pub chunks: usize,
}

/// Clear `store`, then write `transactions` in chunks of at most `chunk_size`.
///
/// Chunks are pulled from `transactions` lazily, so the next chunk is only
/// generated once the previous one has been stored.
///
/// # Errors
/// Returns the store's error as soon as clearing or a chunk fails, leaving the
/// chunks written so far in place. Returns [Error::SeedCountMismatch] if the
/// store's count after the last chunk differs from the number generated.
pub fn write_in_chunks<S, I>(
    store: &mut S,
    transactions: I,
    chunk_size: NonZeroUsize,
) -> Result<SeedReport, Error>
where
    S: TransactionStore + ?Sized,
    I: IntoIterator<Item = NewTransaction>,
{
    store.clear()?;
    tracing::info!("Cleared existing transactions");

    let mut transactions = transactions.into_iter();
    let mut generated = 0;
    let mut chunks = 0;

    loop {
        let chunk: Vec<_> = transactions.by_ref().take(chunk_size.get()).collect();

        if chunk.is_empty() {
            break;
        }

        let first = generated + 1;
        let last = generated + chunk.len();

        store.insert_many(&chunk).inspect_err(|error| {
            tracing::error!("Could not save transactions {first} to {last}: {error}")
        })?;
        tracing::info!("Saved transactions {first} to {last}");

        generated = last;
        chunks += 1;
    }

    let persisted = store.count()?;

    if persisted != generated as u64 {
        tracing::error!("Generated {generated} transactions but the store holds {persisted}");
        return Err(Error::SeedCountMismatch {
            generated,
            persisted,
        });
    }

    tracing::info!("Seeded {persisted} transactions");

    Ok(SeedReport {
        generated,
        persisted,
        chunks,
    })
}
