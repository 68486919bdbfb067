//! Parking fare calculation
//!
//! `fare = ceil(hours) * hourly_rate + booking_fee`, in exact decimal
//! arithmetic. Partial hours are charged as full hours.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Flat fee added to every parking booking (1.50)
pub const DEFAULT_BOOKING_FEE: Decimal = Decimal::from_parts(150, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareCalculator {
    booking_fee: Decimal,
}

impl FareCalculator {
    pub fn new(booking_fee: Decimal) -> Self {
        Self { booking_fee }
    }

    pub fn booking_fee(&self) -> Decimal {
        self.booking_fee
    }

    /// Whole hours billed for the interval, rounding partial hours up
    pub fn billable_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<i64> {
        let millis = (end - start).num_milliseconds();
        if millis < 0 {
            return Err(DomainError::InvalidInterval(
                "cannot price a negative duration".to_string(),
            ));
        }
        Ok((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR)
    }

    pub fn fare(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        hourly_rate: Decimal,
    ) -> DomainResult<Decimal> {
        let hours = Self::billable_hours(start, end)?;
        Ok(Decimal::from(hours) * hourly_rate + self.booking_fee)
    }
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_BOOKING_FEE)
    }
}

/// Fare with the default booking fee
pub fn compute_fare(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    hourly_rate: Decimal,
) -> DomainResult<Decimal> {
    FareCalculator::default().fare(start, end, hourly_rate)
}
