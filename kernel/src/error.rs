use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    NotFound,
    InvalidRange,
    Unavailable,
    Conflict,
    WrongState,
    TooEarly,
    Unauthorized,
    Validation,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::InvalidRange => write!(f, "End date must be after start date"),
            KernelError::Unavailable => write!(f, "Car is not available for rental"),
            KernelError::Conflict => write!(f, "Conflicting record exists"),
            KernelError::WrongState => write!(f, "Operation not allowed in current status"),
            KernelError::TooEarly => write!(f, "Operation not allowed yet"),
            KernelError::Unauthorized => write!(f, "Not allowed"),
            KernelError::Validation => write!(f, "Invalid field value"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
