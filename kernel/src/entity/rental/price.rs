use error_stack::Report;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Duration;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Per-day rate snapshotted from the car when the rental is booked.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PriceForDay(Decimal);

impl PriceForDay {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }

    pub fn total(&self, days: &BillableDays) -> error_stack::Result<PriceSum, KernelError> {
        self.0
            .checked_mul(Decimal::from(*days.as_ref()))
            .map(PriceSum::new)
            .ok_or_else(|| {
                Report::new(KernelError::Validation).attach_printable(format!(
                    "{} per day over {} days is out of range",
                    self.0,
                    days.as_ref()
                ))
            })
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PriceSum(Decimal);

impl PriceSum {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }
}

/// Whole days charged for a span of time: any started day counts, minimum one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BillableDays(i64);

impl BillableDays {
    pub fn new(days: impl Into<i64>) -> Self {
        Self(days.into())
    }

    pub fn from_duration(elapsed: Duration) -> Self {
        let day = Duration::DAY.whole_nanoseconds();
        let elapsed = elapsed.whole_nanoseconds();
        if elapsed <= 0 {
            return Self(1);
        }
        let days = (elapsed + day - 1) / day;
        Self(i64::try_from(days).unwrap_or(i64::MAX).max(1))
    }
}
