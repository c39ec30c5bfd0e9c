use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MAX_BRAND_LENGTH: usize = 30;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarBrand(String);

impl CarBrand {
    pub fn new(brand: impl Into<String>) -> Self {
        Self(brand.into())
    }

    pub fn parse(brand: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let brand = brand.into().trim().to_string();
        if brand.is_empty() || brand.chars().count() > MAX_BRAND_LENGTH {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "brand must be 1-{MAX_BRAND_LENGTH} characters"
            )));
        }
        Ok(Self(brand))
    }
}
