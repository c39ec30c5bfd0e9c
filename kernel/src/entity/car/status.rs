use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Unavailable,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "AVAILABLE",
            CarStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl Display for CarStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown car status: {s}"))),
        }
    }
}
