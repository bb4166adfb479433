//! Walks an inclusive date range and produces two or three transactions per day.

use std::vec::IntoIter;

use time::{
    Date,
    macros::{date, format_description},
};

use crate::{Error, transaction::NewTransaction};

use super::{generator::generate_transaction, random::RandomSource};

/// Parse a calendar day written as `YYYY-MM-DD`, e.g. `2022-01-01`.
pub fn parse_seed_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}

/// An inclusive range of calendar days to generate transactions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
    start: Date,
    end: Date,
}

impl SeedRange {
    /// The first day of the default seed history.
    pub const DEFAULT_START: Date = date!(2022 - 01 - 01);
    /// The last day of the default seed history.
    pub const DEFAULT_END: Date = date!(2024 - 11 - 30);

    /// Create a range covering `start` to `end`, both inclusive.
    ///
    /// # Errors
    /// Returns [Error::InvalidSeedRange] if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidSeedRange { start, end });
        }

        Ok(Self { start, end })
    }

    /// The first day of the range.
    pub fn start(&self) -> Date {
        self.start
    }

    /// The last day of the range.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether `day` falls within the range.
    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }
}

impl Default for SeedRange {
    fn default() -> Self {
        Self {
            start: Self::DEFAULT_START,
            end: Self::DEFAULT_END,
        }
    }
}

/// A lazy sequence of generated transactions, ordered by day.
///
/// Each day gets two or three transactions, chosen uniformly. The sequence
/// ends after the last day of the range and cannot be restarted.
pub struct DailyTransactions<'a, R: RandomSource + ?Sized> {
    next_day: Option<Date>,
    end: Date,
    current_day: IntoIter<NewTransaction>,
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> DailyTransactions<'a, R> {
    /// Create a sequence covering every day in `range`.
    pub fn new(range: SeedRange, rng: &'a mut R) -> Self {
        Self {
            next_day: Some(range.start),
            end: range.end,
            current_day: Vec::new().into_iter(),
            rng,
        }
    }

    /// Generate the transactions for `day`.
    fn generate_day(&mut self, day: Date) -> Vec<NewTransaction> {
        let transactions_per_day = self.rng.next_below(2) + 2;

        (0..transactions_per_day)
            .map(|_| generate_transaction(day, &mut *self.rng))
            .collect()
    }
}

impl<R: RandomSource + ?Sized> Iterator for DailyTransactions<'_, R> {
    type Item = NewTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(transaction) = self.current_day.next() {
                return Some(transaction);
            }

            let day = self.next_day.filter(|day| *day <= self.end)?;
            self.next_day = day.next_day();
            self.current_day = self.generate_day(day).into_iter();
        }
    }
}
