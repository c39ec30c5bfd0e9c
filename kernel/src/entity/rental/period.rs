use error_stack::Report;
use time::{Duration, OffsetDateTime};
use vodca::References;

use crate::KernelError;

/// Planned half-open window `[start_date, end_date)` a car is reserved for.
#[derive(Debug, Clone, Eq, PartialEq, Hash, References)]
pub struct RentalPeriod {
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
}

impl RentalPeriod {
    pub fn new(
        start_date: impl Into<OffsetDateTime>,
        end_date: impl Into<OffsetDateTime>,
    ) -> error_stack::Result<Self, KernelError> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        if end_date <= start_date {
            return Err(Report::new(KernelError::InvalidRange)
                .attach_printable(format!("start: {start_date}, end: {end_date}")));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &RentalPeriod) -> bool {
        self.end_date > other.start_date && self.start_date < other.end_date
    }

    pub fn duration(&self) -> Duration {
        self.end_date - self.start_date
    }
}
