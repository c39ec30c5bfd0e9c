use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct PaidAt(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl PaidAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}
