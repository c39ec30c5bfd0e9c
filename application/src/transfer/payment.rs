use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Caller, DestructPayment, Payment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDto {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub paid_at: Option<OffsetDateTime>,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        let DestructPayment {
            id,
            rental_id,
            amount,
            status,
            paid_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            rental_id: rental_id.into(),
            amount: amount.into(),
            status: status.to_string(),
            paid_at: paid_at.map(Into::into),
        }
    }
}

pub struct PaymentActionDto {
    pub caller: Caller,
    pub id: Uuid,
}
