use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateCarDto, DeleteCarDto, GetCarDto, ListCarsDto, UpdateCarDto};
use kernel::prelude::entity::Caller;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
    brand: String,
    model: String,
    plate: String,
    seats: i32,
    year: i32,
    price_per_day: Decimal,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCarRequest {
    brand: Option<String>,
    model: Option<String>,
    plate: Option<String>,
    seats: Option<i32>,
    year: Option<i32>,
    price_per_day: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListCarsRequest {
    status: Option<String>,
    brand: Option<String>,
    price_from: Option<Decimal>,
    price_to: Option<Decimal>,
    seats: Option<i32>,
    limit: Option<i32>,
    offset: Option<i32>,
}

pub struct CarTransformer;

impl Intake<(Caller, CreateCarRequest)> for CarTransformer {
    type To = CreateCarDto;
    fn emit(&self, input: (Caller, CreateCarRequest)) -> Self::To {
        let (caller, input) = input;
        CreateCarDto {
            caller,
            brand: input.brand,
            model: input.model,
            plate: input.plate,
            seats: input.seats,
            year: input.year,
            price_per_day: input.price_per_day,
        }
    }
}

impl Intake<(Caller, Uuid, UpdateCarRequest)> for CarTransformer {
    type To = UpdateCarDto;
    fn emit(&self, input: (Caller, Uuid, UpdateCarRequest)) -> Self::To {
        let (caller, id, input) = input;
        UpdateCarDto {
            caller,
            id,
            brand: input.brand,
            model: input.model,
            plate: input.plate,
            seats: input.seats,
            year: input.year,
            price_per_day: input.price_per_day,
        }
    }
}

impl Intake<(Caller, Uuid)> for CarTransformer {
    type To = DeleteCarDto;
    fn emit(&self, input: (Caller, Uuid)) -> Self::To {
        let (caller, id) = input;
        DeleteCarDto { caller, id }
    }
}

impl Intake<Uuid> for CarTransformer {
    type To = GetCarDto;
    fn emit(&self, input: Uuid) -> Self::To {
        GetCarDto { id: input }
    }
}

impl Intake<ListCarsRequest> for CarTransformer {
    type To = ListCarsDto;
    fn emit(&self, input: ListCarsRequest) -> Self::To {
        ListCarsDto {
            status: input.status,
            brand: input.brand,
            price_from: input.price_from,
            price_to: input.price_to,
            seats: input.seats,
            limit: input.limit,
            offset: input.offset,
        }
    }
}
