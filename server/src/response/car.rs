use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::CarDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CarResponse {
    id: Uuid,
    brand: String,
    model: String,
    plate: String,
    seats: i32,
    year: i32,
    price_per_day: Decimal,
    status: String,
}

impl From<CarDto> for CarResponse {
    fn from(value: CarDto) -> Self {
        Self {
            id: value.id,
            brand: value.brand,
            model: value.model,
            plate: value.plate,
            seats: value.seats,
            year: value.year,
            price_per_day: value.price_per_day,
            status: value.status,
        }
    }
}

pub struct CarPresenter;

impl Exhaust<CarDto> for CarPresenter {
    type To = Json<CarResponse>;
    fn emit(&self, input: CarDto) -> Self::To {
        Json(CarResponse::from(input))
    }
}

impl Exhaust<Vec<CarDto>> for CarPresenter {
    type To = Json<Vec<CarResponse>>;
    fn emit(&self, input: Vec<CarDto>) -> Self::To {
        Json(input.into_iter().map(CarResponse::from).collect())
    }
}

impl Exhaust<()> for CarPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
