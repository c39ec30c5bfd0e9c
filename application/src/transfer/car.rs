use rust_decimal::Decimal;
use uuid::Uuid;

use kernel::prelude::entity::{Car, Caller, DestructCar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDto {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub seats: i32,
    pub year: i32,
    pub price_per_day: Decimal,
    pub status: String,
}

impl From<Car> for CarDto {
    fn from(value: Car) -> Self {
        let DestructCar {
            id,
            brand,
            model,
            plate,
            seats,
            year,
            price_per_day,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            plate: plate.into(),
            seats: seats.into(),
            year: year.into(),
            price_per_day: price_per_day.into(),
            status: status.to_string(),
        }
    }
}

pub struct GetCarDto {
    pub id: Uuid,
}

#[derive(Default)]
pub struct ListCarsDto {
    pub status: Option<String>,
    pub brand: Option<String>,
    pub price_from: Option<Decimal>,
    pub price_to: Option<Decimal>,
    pub seats: Option<i32>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

pub struct CreateCarDto {
    pub caller: Caller,
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub seats: i32,
    pub year: i32,
    pub price_per_day: Decimal,
}

pub struct UpdateCarDto {
    pub caller: Caller,
    pub id: Uuid,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub plate: Option<String>,
    pub seats: Option<i32>,
    pub year: Option<i32>,
    pub price_per_day: Option<Decimal>,
}

pub struct DeleteCarDto {
    pub caller: Caller,
    pub id: Uuid,
}
