use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Caller, DestructRental, Rental};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalDto {
    pub id: Uuid,
    pub car_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub returned_at: Option<OffsetDateTime>,
    pub price_for_day: Decimal,
    pub price_sum: Decimal,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            car_id,
            renter_id,
            period,
            started_at,
            returned_at,
            price_for_day,
            price_sum,
            status,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            car_id: car_id.into(),
            renter_id: renter_id.into(),
            start_date: *period.start_date(),
            end_date: *period.end_date(),
            started_at: started_at.map(Into::into),
            returned_at: returned_at.map(Into::into),
            price_for_day: price_for_day.into(),
            price_sum: price_sum.into(),
            status: status.to_string(),
            created_at: created_at.into(),
        }
    }
}

pub struct CreateRentalDto {
    pub caller: Caller,
    pub car_id: Uuid,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
}

/// Target of `start`, `finish`, `cancel` and single reads.
pub struct RentalActionDto {
    pub caller: Caller,
    pub id: Uuid,
}

pub struct ListRentalsDto {
    pub caller: Caller,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}
