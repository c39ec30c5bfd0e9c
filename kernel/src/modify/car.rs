use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Car, CarId, CarStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CarModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError>;
    async fn update_status(
        &self,
        con: &mut Self::Transaction,
        car_id: &CarId,
        status: &CarStatus,
    ) -> error_stack::Result<(), KernelError>;
    /// Fails while any rental still references the car.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCarModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CarModifier: CarModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn car_modifier(&self) -> &Self::CarModifier;
}
