use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Agent,
    Admin,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "USER"),
            UserRole::Agent => write!(f, "AGENT"),
            UserRole::Admin => write!(f, "ADMIN"),
        }
    }
}

impl FromStr for UserRole {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "AGENT" => Ok(Self::Agent),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("unknown user role: {s}"))),
        }
    }
}
