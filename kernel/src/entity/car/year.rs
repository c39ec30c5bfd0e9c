use error_stack::Report;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const FIRST_PRODUCTION_YEAR: i32 = 1886;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarYear(i32);

impl CarYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }

    pub fn parse(year: impl Into<i32>, now: &OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        let year = year.into();
        let current = now.year();
        if !(FIRST_PRODUCTION_YEAR..=current).contains(&year) {
            return Err(Report::new(KernelError::Validation).attach_printable(format!(
                "year must be between {FIRST_PRODUCTION_YEAR} and {current}"
            )));
        }
        Ok(Self(year))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::CarYear;

    #[test]
    fn bounded_by_current_year() {
        let now = datetime!(2024-06-01 0:00 UTC);
        assert!(CarYear::parse(1886, &now).is_ok());
        assert!(CarYear::parse(2024, &now).is_ok());
        assert!(CarYear::parse(1885, &now).is_err());
        assert!(CarYear::parse(2025, &now).is_err());
    }
}
