use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Rental, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the rental together with its payment, if one was issued.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
