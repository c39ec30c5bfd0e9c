use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PaymentAmount(Decimal);

impl PaymentAmount {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }
}
