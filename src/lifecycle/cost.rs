//! Rental cost calculation.
//!
//! Cost is computed once, when the request is created, and is immutable
//! thereafter. Re-quoting on a date change is not supported; changing dates
//! means cancelling and recreating the rental.

use crate::config::SECONDS_PER_DAY;
use crate::error::{RentalError, RentalResult};

/// Number of billable days for an inclusive rental period.
///
/// Both endpoints count: a rental starting and ending on the same day is a
/// one-day rental.
pub fn rental_days(start: u64, end: u64) -> RentalResult<u64> {
    if end < start {
        return Err(RentalError::Validation(format!(
            "end date {end} is before start date {start}"
        )));
    }
    Ok((end - start) / SECONDS_PER_DAY + 1)
}

/// Total rental cost: inclusive day count times the daily rate.
///
/// Fails on an inverted period or if the product overflows.
pub fn total_cost(start: u64, end: u64, daily_rate: u64) -> RentalResult<u64> {
    let days = rental_days(start, end)?;
    days.checked_mul(daily_rate).ok_or_else(|| {
        RentalError::Validation(format!(
            "cost overflow: {days} days at rate {daily_rate}"
        ))
    })
}
