//! Produces one synthetic transaction for a given day.

use time::{Date, Duration};

use crate::transaction::{Category, NewTransaction, Region, TransactionStatus, TransactionType};

use super::{random::RandomSource, sampler::weighted_index};

/// The smallest generated amount.
pub const MIN_AMOUNT: i64 = 1_000;

/// The width of the uniform amount draw for sales, giving amounts in `[1000, 200000]`.
const SALES_AMOUNT_RANGE: f64 = 199_000.0;

/// The width of the uniform amount draw for expenses, giving amounts in `[1000, 21000]`.
const EXPENSES_AMOUNT_RANGE: f64 = 20_000.0;

/// The chance that a transaction is still pending.
const PENDING_PROBABILITY: f64 = 0.1;

/// Region weights in [Region::ALL] order.
pub const REGION_WEIGHTS: [f64; 6] = [0.30, 0.15, 0.25, 0.15, 0.10, 0.05];

/// Category weights for sales in [Category::ALL] order.
pub const SALES_CATEGORY_WEIGHTS: [f64; 3] = [0.20, 0.50, 0.30];

/// Category weights for expenses in [Category::ALL] order.
pub const EXPENSES_CATEGORY_WEIGHTS: [f64; 3] = [0.40, 0.30, 0.30];

/// Generate one transaction dated at a random time on `day` (UTC).
///
/// Random values are drawn in a fixed order: type, amount, status, region,
/// category, hour, then minute.
pub fn generate_transaction<R: RandomSource + ?Sized>(day: Date, rng: &mut R) -> NewTransaction {
    let transaction_type = if rng.next_f64() > 0.5 {
        TransactionType::Sales
    } else {
        TransactionType::Expenses
    };

    let amount_range = match transaction_type {
        TransactionType::Sales => SALES_AMOUNT_RANGE,
        TransactionType::Expenses => EXPENSES_AMOUNT_RANGE,
    };
    let amount = (rng.next_f64() * amount_range).floor() as i64 + MIN_AMOUNT;

    let status = if rng.next_f64() > PENDING_PROBABILITY {
        TransactionStatus::Completed
    } else {
        TransactionStatus::Pending
    };

    let region = Region::ALL[weighted_index(&REGION_WEIGHTS, rng)];

    let category_weights = match transaction_type {
        TransactionType::Sales => &SALES_CATEGORY_WEIGHTS,
        TransactionType::Expenses => &EXPENSES_CATEGORY_WEIGHTS,
    };
    let category = Category::ALL[weighted_index(category_weights, rng)];

    let hour = rng.next_below(24);
    let minute = rng.next_below(60);
    let date = day.midnight().assume_utc()
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute));

    NewTransaction {
        date,
        amount,
        transaction_type,
        status,
        region,
        category,
    }
}
