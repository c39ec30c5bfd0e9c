use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Payment, PaymentId, RentalId, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;

    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &PaymentId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;

    async fn find_by_rental_id(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Option<Payment>, KernelError>;

    /// Payments whose rental belongs to `renter_id`.
    async fn find_by_renter_id(
        &self,
        con: &mut Self::Transaction,
        renter_id: &UserId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
}

pub trait DependOnPaymentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentQuery: PaymentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_query(&self) -> &Self::PaymentQuery;
}
