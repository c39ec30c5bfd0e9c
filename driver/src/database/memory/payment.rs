use error_stack::Report;

use kernel::interface::query::PaymentQuery;
use kernel::interface::update::PaymentModifier;
use kernel::prelude::entity::{Payment, PaymentId, RentalId, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryPaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        Ok(con.working.payments.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_rental_id(
        &self,
        con: &mut InMemoryTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError> {
        Ok(con
            .working
            .payments
            .values()
            .find(|payment| payment.rental_id() == rental_id)
            .cloned())
    }

    async fn find_by_renter_id(
        &self,
        con: &mut InMemoryTransaction,
        renter_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rentals = &con.working.rentals;
        let mut payments = con
            .working
            .payments
            .values()
            .filter_map(|payment| {
                rentals
                    .get(payment.rental_id())
                    .filter(|rental| rental.renter_id() == renter_id)
                    .map(|rental| (*rental.created_at().as_ref(), payment.clone()))
            })
            .collect::<Vec<_>>();
        payments.sort_by(|(a_at, a), (b_at, b)| {
            b_at.cmp(a_at)
                .then_with(|| a.id().as_ref().cmp(b.id().as_ref()))
        });
        Ok(payments.into_iter().map(|(_, payment)| payment).collect())
    }
}

#[async_trait::async_trait]
impl PaymentModifier for InMemoryPaymentRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        if !con.working.rentals.contains_key(payment.rental_id()) {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "rental {} does not exist",
                payment.rental_id().as_ref()
            )));
        }
        let issued = con
            .working
            .payments
            .values()
            .any(|other| other.rental_id() == payment.rental_id() || other.id() == payment.id());
        if issued {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "payment for rental {} already exists",
                payment.rental_id().as_ref()
            )));
        }
        con.working
            .payments
            .insert(payment.id().clone(), payment.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        payment: &Payment,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.working.payments.get_mut(payment.id()) {
            *stored = payment.clone();
        }
        Ok(())
    }
}
