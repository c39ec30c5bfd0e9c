use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MAX_PLATE_LENGTH: usize = 10;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarPlate(String);

impl CarPlate {
    pub fn new(plate: impl Into<String>) -> Self {
        Self(plate.into())
    }

    /// Normalizes to upper case and accepts 1-10 of `A-Z`, `0-9` and `-`.
    pub fn parse(plate: impl AsRef<str>) -> error_stack::Result<Self, KernelError> {
        let plate = plate.as_ref().trim().to_uppercase();
        let valid = !plate.is_empty()
            && plate.len() <= MAX_PLATE_LENGTH
            && plate
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(Report::new(KernelError::Validation).attach_printable(
                "plate must be 1-10 characters; letters, numbers and hyphen allowed",
            ));
        }
        Ok(Self(plate))
    }
}
