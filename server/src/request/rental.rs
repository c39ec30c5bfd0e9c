use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{CreateRentalDto, ListRentalsDto, RentalActionDto};
use kernel::prelude::entity::Caller;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    car_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageRequest {
    limit: Option<i32>,
    offset: Option<i32>,
}

pub struct RentalTransformer;

impl Intake<(Caller, CreateRentalRequest)> for RentalTransformer {
    type To = CreateRentalDto;
    fn emit(&self, input: (Caller, CreateRentalRequest)) -> Self::To {
        let (caller, input) = input;
        CreateRentalDto {
            caller,
            car_id: input.car_id,
            start_date: input.start_date,
            end_date: input.end_date,
        }
    }
}

impl Intake<(Caller, Uuid)> for RentalTransformer {
    type To = RentalActionDto;
    fn emit(&self, input: (Caller, Uuid)) -> Self::To {
        let (caller, id) = input;
        RentalActionDto { caller, id }
    }
}

impl Intake<(Caller, PageRequest)> for RentalTransformer {
    type To = ListRentalsDto;
    fn emit(&self, input: (Caller, PageRequest)) -> Self::To {
        let (caller, page) = input;
        ListRentalsDto {
            caller,
            limit: page.limit,
            offset: page.offset,
        }
    }
}
