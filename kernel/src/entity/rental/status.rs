use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    NotStarted,
    Active,
    Finished,
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::NotStarted => "NOT_STARTED",
            RentalStatus::Active => "ACTIVE",
            RentalStatus::Finished => "FINISHED",
            RentalStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Finished | RentalStatus::Cancelled)
    }
}

impl Display for RentalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "ACTIVE" => Ok(Self::Active),
            "FINISHED" => Ok(Self::Finished),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown rental status: {s}"))),
        }
    }
}
