mod amount;
mod id;
mod paid_at;
mod status;

pub use self::{amount::*, id::*, paid_at::*, status::*};
use destructure::Destructure;
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{Rental, RentalId, RentalStatus};
use crate::KernelError;

/// Ledger entry settling a finished rental. At most one exists per rental.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Payment {
    id: PaymentId,
    rental_id: RentalId,
    amount: PaymentAmount,
    status: PaymentStatus,
    paid_at: Option<PaidAt>,
}

impl Payment {
    pub fn new(
        id: PaymentId,
        rental_id: RentalId,
        amount: PaymentAmount,
        status: PaymentStatus,
        paid_at: Option<PaidAt>,
    ) -> Self {
        Self {
            id,
            rental_id,
            amount,
            status,
            paid_at,
        }
    }

    pub fn issue(id: PaymentId, rental: &Rental) -> error_stack::Result<Self, KernelError> {
        if rental.status() != &RentalStatus::Finished {
            return Err(Report::new(KernelError::WrongState).attach_printable(format!(
                "payment can't be issued for rental {} in status {}",
                rental.id().as_ref(),
                rental.status()
            )));
        }
        Ok(Self {
            id,
            rental_id: rental.id().clone(),
            amount: PaymentAmount::new(*rental.price_sum().as_ref()),
            status: PaymentStatus::NotPaid,
            paid_at: None,
        })
    }

    /// `rental` must be the rental this payment settles.
    pub fn pay(
        mut self,
        rental: &Rental,
        now: OffsetDateTime,
    ) -> error_stack::Result<Self, KernelError> {
        if rental.status() != &RentalStatus::Finished {
            return Err(Report::new(KernelError::WrongState)
                .attach_printable("Rental is not finished yet"));
        }
        if self.status == PaymentStatus::Paid {
            return Err(Report::new(KernelError::WrongState)
                .attach_printable(format!("Payment {} is already paid", self.id.as_ref())));
        }
        self.status = PaymentStatus::Paid;
        self.paid_at = Some(PaidAt::new(now));
        Ok(self)
    }
}
