use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const MAX_MODEL_LENGTH: usize = 50;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarModel(String);

impl CarModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self(model.into())
    }

    pub fn parse(model: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let model = model.into().trim().to_string();
        if model.is_empty() || model.chars().count() > MAX_MODEL_LENGTH {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "model must be 1-{MAX_MODEL_LENGTH} characters"
            )));
        }
        Ok(Self(model))
    }
}
