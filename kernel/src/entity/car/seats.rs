use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarSeats(i32);

impl CarSeats {
    pub fn new(seats: impl Into<i32>) -> Self {
        Self(seats.into())
    }

    pub fn parse(seats: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let seats = seats.into();
        if seats < 1 {
            return Err(Report::new(KernelError::Validation).attach_printable("seats must be >= 1"));
        }
        Ok(Self(seats))
    }
}
