use error_stack::Report;

use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;

pub use self::{car::*, payment::*, rental::*};

mod car;
mod payment;
mod rental;

pub(crate) trait LogRejection {
    fn log_rejection(self, operation: &'static str) -> Self;
}

impl<T> LogRejection for error_stack::Result<T, KernelError> {
    fn log_rejection(self, operation: &'static str) -> Self {
        if let Err(report) = &self {
            tracing::debug!(operation, reason = %report.current_context(), "Rejected");
        }
        self
    }
}

pub(crate) fn not_found(what: &str, id: impl std::fmt::Display) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("{what} {id} not found"))
}

pub(crate) fn unauthorized(operation: &str) -> Report<KernelError> {
    Report::new(KernelError::Unauthorized)
        .attach_printable(format!("caller is not allowed to {operation}"))
}

pub(crate) fn paging(
    limit: Option<i32>,
    offset: Option<i32>,
) -> error_stack::Result<(SelectLimit, SelectOffset), KernelError> {
    Ok((SelectLimit::parse(limit)?, SelectOffset::parse(offset)?))
}
