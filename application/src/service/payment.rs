use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnPaymentQuery, DependOnRentalQuery, PaymentQuery, RentalQuery};
use kernel::interface::update::{DependOnPaymentModifier, PaymentModifier};
use kernel::prelude::entity::{Caller, PaymentId};
use kernel::KernelError;

use crate::service::{not_found, unauthorized, LogRejection};
use crate::transfer::{PaymentActionDto, PaymentDto};

#[async_trait::async_trait]
pub trait PayPaymentService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnClock
    + DependOnPaymentQuery
    + DependOnPaymentModifier
    + DependOnRentalQuery
{
    async fn pay_payment(&self, dto: PaymentActionDto) -> error_stack::Result<PaymentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let payment = self
            .payment_query()
            .find_by_id_for_update(&mut connection, &PaymentId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("payment", dto.id))
            .log_rejection("pay_payment")?;
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, payment.rental_id())
            .await?
            .ok_or_else(|| not_found("rental", payment.rental_id().as_ref()))
            .log_rejection("pay_payment")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("pay for this rental")).log_rejection("pay_payment");
        }
        let payment = payment
            .pay(&rental, self.clock().now())
            .log_rejection("pay_payment")?;

        self.payment_modifier()
            .update(&mut connection, &payment)
            .await?;
        connection.commit().await?;

        tracing::info!(
            payment_id = %dto.id,
            amount = %payment.amount().as_ref(),
            "Payment settled"
        );
        Ok(PaymentDto::from(payment))
    }
}

impl<T> PayPaymentService for T where
    T: DependOnDatabaseConnection
        + DependOnClock
        + DependOnPaymentQuery
        + DependOnPaymentModifier
        + DependOnRentalQuery
{
}

#[async_trait::async_trait]
pub trait GetPaymentService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnPaymentQuery + DependOnRentalQuery
{
    async fn get_payment(&self, dto: PaymentActionDto) -> error_stack::Result<PaymentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let payment = self
            .payment_query()
            .find_by_id(&mut connection, &PaymentId::new(dto.id))
            .await?
            .ok_or_else(|| not_found("payment", dto.id))
            .log_rejection("get_payment")?;
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, payment.rental_id())
            .await?
            .ok_or_else(|| not_found("rental", payment.rental_id().as_ref()))
            .log_rejection("get_payment")?;
        if !dto.caller.can_act_for(rental.renter_id()) {
            return Err(unauthorized("read this payment")).log_rejection("get_payment");
        }
        Ok(PaymentDto::from(payment))
    }

    async fn list_my_payments(&self, caller: Caller) -> error_stack::Result<Vec<PaymentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let payments = self
            .payment_query()
            .find_by_renter_id(&mut connection, caller.id())
            .await?;
        Ok(payments.into_iter().map(PaymentDto::from).collect())
    }
}

impl<T> GetPaymentService for T where
    T: DependOnDatabaseConnection + DependOnPaymentQuery + DependOnRentalQuery
{
}
