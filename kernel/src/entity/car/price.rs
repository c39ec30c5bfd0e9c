use error_stack::Report;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarPricePerDay(Decimal);

impl CarPricePerDay {
    /// Largest rate the `NUMERIC(10, 2)` price columns can hold.
    pub const MAX: Decimal = dec!(99999999.99);

    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }

    pub fn parse(price: impl Into<Decimal>) -> error_stack::Result<Self, KernelError> {
        let price = price.into().round_dp(2);
        if price.is_sign_negative() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("price_per_day must be non-negative"));
        }
        if price > Self::MAX {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("price_per_day must not exceed {}", Self::MAX)));
        }
        Ok(Self(price))
    }
}
