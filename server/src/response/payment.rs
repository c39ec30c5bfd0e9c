use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::PaymentDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    id: Uuid,
    rental_id: Uuid,
    amount: Decimal,
    status: String,
    #[serde(with = "time::serde::rfc3339::option")]
    paid_at: Option<OffsetDateTime>,
}

impl From<PaymentDto> for PaymentResponse {
    fn from(value: PaymentDto) -> Self {
        Self {
            id: value.id,
            rental_id: value.rental_id,
            amount: value.amount,
            status: value.status,
            paid_at: value.paid_at,
        }
    }
}

pub struct PaymentPresenter;

impl Exhaust<PaymentDto> for PaymentPresenter {
    type To = Json<PaymentResponse>;
    fn emit(&self, input: PaymentDto) -> Self::To {
        Json(PaymentResponse::from(input))
    }
}

impl Exhaust<Vec<PaymentDto>> for PaymentPresenter {
    type To = Json<Vec<PaymentResponse>>;
    fn emit(&self, input: Vec<PaymentDto>) -> Self::To {
        Json(input.into_iter().map(PaymentResponse::from).collect())
    }
}
