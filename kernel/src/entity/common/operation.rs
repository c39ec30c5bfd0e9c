use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Page size for list queries. Defaults to [`SelectLimit::DEFAULT`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i32);

impl SelectLimit {
    pub const DEFAULT: i32 = 30;

    pub fn new(value: impl Into<i32>) -> Self {
        SelectLimit(value.into())
    }

    /// `None` falls back to the default page size.
    pub fn parse(value: Option<i32>) -> error_stack::Result<Self, KernelError> {
        match value {
            Some(limit) if limit < 1 => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("limit must be positive, got {limit}"))),
            Some(limit) => Ok(Self(limit)),
            None => Ok(Self::default()),
        }
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i32);

impl SelectOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectOffset(value.into())
    }

    pub fn parse(value: Option<i32>) -> error_stack::Result<Self, KernelError> {
        match value {
            Some(offset) if offset < 0 => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("offset must not be negative, got {offset}"))),
            Some(offset) => Ok(Self(offset)),
            None => Ok(Self::default()),
        }
    }
}
