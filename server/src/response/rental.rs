use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::RentalDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: Uuid,
    car_id: Uuid,
    renter_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
    price_for_day: Decimal,
    price_sum: Decimal,
    status: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            car_id: value.car_id,
            renter_id: value.renter_id,
            start_date: value.start_date,
            end_date: value.end_date,
            started_at: value.started_at,
            returned_at: value.returned_at,
            price_for_day: value.price_for_day,
            price_sum: value.price_sum,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

pub struct RentalPresenter;

impl Exhaust<RentalDto> for RentalPresenter {
    type To = Json<RentalResponse>;
    fn emit(&self, input: RentalDto) -> Self::To {
        Json(RentalResponse::from(input))
    }
}

impl Exhaust<Vec<RentalDto>> for RentalPresenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json(input.into_iter().map(RentalResponse::from).collect())
    }
}
